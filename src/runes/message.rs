use super::{tag::Tag, *};

pub(super) struct Message {
  pub(super) edicts: Vec<Edict>,
  pub(super) fields: HashMap<u128, VecDeque<u128>>,
  pub(super) flaws: BTreeSet<Flaw>,
}

impl Message {
  pub(super) fn from_integers(tx: &Transaction, payload: &[u128]) -> Self {
    let mut edicts = Vec::new();
    let mut fields = HashMap::<u128, VecDeque<u128>>::new();
    let mut flaws = BTreeSet::new();

    for i in (0..payload.len()).step_by(2) {
      let tag = payload[i];

      if Tag::Body == tag {
        let mut id = RuneId::default();
        for chunk in payload[i + 1..].chunks(4) {
          if chunk.len() != 4 {
            flaws.insert(Flaw::TrailingIntegers);
            break;
          }

          let Some(next) = id.next(chunk[0], chunk[1]) else {
            // later deltas are relative to this id, so the rest of the body
            // is unrecoverable
            flaws.insert(Flaw::EdictRuneId);
            break;
          };

          id = next;

          let Some(edict) = Edict::from_integers(tx, next, chunk[2], chunk[3]) else {
            flaws.insert(Flaw::EdictOutput);
            continue;
          };

          edicts.push(edict);
        }
        break;
      }

      let Some(&value) = payload.get(i + 1) else {
        flaws.insert(Flaw::TruncatedField);
        break;
      };

      fields.entry(tag).or_default().push_back(value);
    }

    Self {
      edicts,
      fields,
      flaws,
    }
  }
}
