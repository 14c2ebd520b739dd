use super::*;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cenotaph {
  pub etching: Option<Rune>,
  pub flaws: BTreeSet<Flaw>,
  pub mint: Option<RuneId>,
}
