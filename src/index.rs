use {self::updater::RuneUpdater, super::*};

pub use self::entry::{MintError, RuneEntry};

pub(crate) use self::lot::Lot;

mod entry;
mod lot;
pub mod reorg;
#[cfg(test)]
pub(crate) mod testing;
mod updater;

/// Walks confirmed blocks in height order and folds each transaction's
/// decoded artifact into the ledger held by `storage`.
pub struct RunestoneIndexer<S: Storage, C: RpcClient> {
  chain: Chain,
  client: C,
  first_rune_height: u64,
  height_limit: Option<u64>,
  storage: S,
}

impl<S: Storage, C: RpcClient> RunestoneIndexer<S, C> {
  pub fn new(storage: S, client: C, options: &Options) -> Self {
    Self {
      chain: options.chain(),
      client,
      first_rune_height: options.first_rune_height(),
      height_limit: options.height_limit(),
      storage,
    }
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  pub fn height(&self) -> Result<Option<u64>> {
    self.storage.height()
  }

  /// Advances the ledger to the chain tip, committing once per block. On
  /// failure the open block is aborted, so storage never holds a partially
  /// applied block.
  pub fn update(&mut self) -> Result {
    loop {
      let height = match self.storage.height()? {
        Some(height) => height + 1,
        None => 0,
      };

      if let Some(height_limit) = self.height_limit {
        if height >= height_limit {
          return Ok(());
        }
      }

      let Some(hash) = self.client.block_hash(height)? else {
        return Ok(());
      };

      let block = self.client.block(hash)?;

      reorg::detect(&self.storage, &block, height)?;

      if let Err(err) = self.index_block(height, hash, &block) {
        self.storage.abort_block()?;
        return Err(err);
      }
    }
  }

  fn index_block(&mut self, height: u64, hash: BlockHash, block: &Block) -> Result {
    log::debug!(
      "indexing block {height} with {} transactions",
      block.txdata.len()
    );

    if height >= self.first_rune_height {
      let mut updater = RuneUpdater {
        burned: HashMap::new(),
        client: &self.client,
        height,
        minimum: Rune::minimum_at_height(self.chain.network(), Height(height)),
        storage: &mut self.storage,
      };

      for (tx_index, tx) in block.txdata.iter().enumerate() {
        updater.index_runes(u32::try_from(tx_index).unwrap(), tx, tx.txid())?;
      }

      updater.update()?;
    }

    self.storage.set_block_hash(height, hash)?;
    self.storage.commit_block()?;

    Ok(())
  }
}
