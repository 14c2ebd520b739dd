use {super::*, bitcoin::consensus, std::io::Read};

#[derive(Debug, Parser)]
pub(crate) struct Decode {
  #[arg(help = "Decode the runestone in raw transaction hex <TRANSACTION>, defaulting to standard input.")]
  transaction: Option<String>,
}

impl Decode {
  pub(crate) fn run(self) -> Result {
    let hex = match self.transaction {
      Some(hex) => hex,
      None => {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
      }
    };

    let transaction = consensus::encode::deserialize::<Transaction>(
      &hex::decode(hex.trim()).context("invalid transaction hex")?,
    )
    .context("invalid transaction")?;

    print_json(Runestone::decipher(&transaction))?;

    Ok(())
  }
}
