use super::*;

mod decode;
mod encode;
mod index;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[command(about = "Decode the runestone in a raw transaction")]
  Decode(decode::Decode),
  #[command(about = "Encode a runestone as an OP_RETURN script")]
  Encode(encode::Encode),
  #[command(about = "Index runes to the chain tip and print the ledger")]
  Index(index::Index),
}

impl Subcommand {
  pub(crate) fn run(self, options: Options) -> Result {
    match self {
      Self::Decode(decode) => decode.run(),
      Self::Encode(encode) => encode.run(),
      Self::Index(index) => index.run(options),
    }
  }
}
