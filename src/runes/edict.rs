use super::*;

#[derive(Default, Serialize, Deserialize, Debug, PartialEq, Copy, Clone, Eq, PartialOrd, Ord)]
pub struct Edict {
  pub id: RuneId,
  pub amount: u128,
  pub output: u32,
}

impl Edict {
  pub fn from_integers(tx: &Transaction, id: RuneId, amount: u128, output: u128) -> Option<Self> {
    let Ok(output) = u32::try_from(output) else {
      return None;
    };

    // an output equal to the output count directs the amount at every
    // non-OP_RETURN output, so it is one past the last valid index
    if usize::try_from(output).unwrap() > tx.output.len() {
      return None;
    }

    Some(Self { id, amount, output })
  }
}
