use super::*;

#[derive(Debug, PartialEq)]
pub enum Encode {
  Divisibility(u8),
  ScriptSize(usize),
  Spacers(u32),
  SupplyOverflow,
}

impl Display for Encode {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Divisibility(divisibility) => write!(
        f,
        "divisibility {divisibility} is greater than maximum {}",
        Etching::MAX_DIVISIBILITY,
      ),
      Self::ScriptSize(size) => {
        write!(f, "runestone script of {size} bytes overflows one OP_RETURN")
      }
      Self::Spacers(spacers) => write!(
        f,
        "spacers {spacers:#b} have bits set past the maximum name length",
      ),
      Self::SupplyOverflow => write!(f, "premine plus mint cap times mint amount overflows u128"),
    }
  }
}

impl std::error::Error for Encode {}
