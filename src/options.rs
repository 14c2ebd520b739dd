use {
  super::*,
  bitcoincore_rpc::{Auth, Client},
};

#[derive(Clone, Default, Debug, Parser)]
pub struct Options {
  #[arg(
    long = "chain",
    value_enum,
    default_value = "mainnet",
    help = "Index <CHAIN>."
  )]
  pub(crate) chain: Chain,
  #[arg(long, help = "Connect to Bitcoin Core RPC at <BITCOIN_RPC_URL>.")]
  pub(crate) bitcoin_rpc_url: Option<String>,
  #[arg(
    long,
    help = "Authenticate to Bitcoin Core RPC as <BITCOIN_RPC_USERNAME>."
  )]
  pub(crate) bitcoin_rpc_username: Option<String>,
  #[arg(
    long,
    help = "Authenticate to Bitcoin Core RPC with <BITCOIN_RPC_PASSWORD>."
  )]
  pub(crate) bitcoin_rpc_password: Option<String>,
  #[arg(long, help = "Load Bitcoin Core RPC cookie file from <COOKIE_FILE>.")]
  pub(crate) cookie_file: Option<PathBuf>,
  #[arg(
    long,
    help = "Start indexing runes at <FIRST_RUNE_HEIGHT> instead of the chain default."
  )]
  pub(crate) first_rune_height: Option<u64>,
  #[arg(long, help = "Do not index blocks at or above <HEIGHT_LIMIT>.")]
  pub(crate) height_limit: Option<u64>,
}

impl Options {
  pub fn chain(&self) -> Chain {
    self.chain
  }

  pub fn first_rune_height(&self) -> u64 {
    self
      .first_rune_height
      .unwrap_or_else(|| self.chain.first_rune_height())
  }

  pub fn height_limit(&self) -> Option<u64> {
    self.height_limit
  }

  fn rpc_url(&self) -> String {
    self
      .bitcoin_rpc_url
      .clone()
      .unwrap_or_else(|| format!("127.0.0.1:{}", self.chain.default_rpc_port()))
  }

  fn auth(&self) -> Result<Auth> {
    if let Some(cookie_file) = &self.cookie_file {
      return Ok(Auth::CookieFile(cookie_file.clone()));
    }

    match (&self.bitcoin_rpc_username, &self.bitcoin_rpc_password) {
      (Some(username), Some(password)) => Ok(Auth::UserPass(username.clone(), password.clone())),
      (Some(_), None) => bail!("no bitcoin RPC password specified"),
      (None, Some(_)) => bail!("no bitcoin RPC username specified"),
      (None, None) => Ok(Auth::None),
    }
  }

  pub fn bitcoin_rpc_client(&self) -> Result<Client> {
    let rpc_url = self.rpc_url();

    Client::new(&rpc_url, self.auth()?)
      .with_context(|| format!("failed to connect to Bitcoin Core RPC at `{rpc_url}`"))
  }
}
