use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Height(pub u64);

impl Height {
  pub fn n(self) -> u64 {
    self.0
  }
}

impl Display for Height {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl PartialEq<u64> for Height {
  fn eq(&self, other: &u64) -> bool {
    self.0 == *other
  }
}

impl FromStr for Height {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Ok(Self(s.parse()?))
  }
}
