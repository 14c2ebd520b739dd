use super::*;

#[derive(Debug, Parser)]
#[command(version, about = "Runes protocol codec and index")]
pub struct Arguments {
  #[command(flatten)]
  pub(crate) options: Options,
  #[command(subcommand)]
  pub(crate) subcommand: Subcommand,
}

impl Arguments {
  pub fn run(self) -> Result {
    self.subcommand.run(self.options)
  }
}
