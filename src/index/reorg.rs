use super::*;

#[derive(Debug, PartialEq)]
pub enum Error {
  Detected { height: u64 },
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Detected { height } => write!(
        f,
        "reorg detected at height {height}: roll back storage before resuming"
      ),
    }
  }
}

impl std::error::Error for Error {}

pub(crate) fn detect<S: Storage>(storage: &S, block: &Block, height: u64) -> Result {
  if height == 0 {
    return Ok(());
  }

  match storage.block_hash(height - 1)? {
    Some(prev) if prev != block.header.prev_blockhash => {
      Err(anyhow!(Error::Detected { height }))
    }
    _ => Ok(()),
  }
}
