use {super::*, std::io::Read};

#[derive(Debug, Parser)]
pub(crate) struct Encode {
  #[arg(
    long,
    help = "Read the runestone from JSON <FILE>, defaulting to standard input."
  )]
  file: Option<PathBuf>,
}

impl Encode {
  pub(crate) fn run(self) -> Result {
    let json = match self.file {
      Some(path) => std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read `{}`", path.display()))?,
      None => {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
      }
    };

    let runestone = serde_json::from_str::<Runestone>(&json).context("invalid runestone")?;

    print_json(runestone.encipher()?)?;

    Ok(())
  }
}
