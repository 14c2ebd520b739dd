use super::*;

#[derive(Default, Serialize, Deserialize, Debug, PartialEq, Copy, Clone, Eq)]
pub struct Etching {
  pub divisibility: Option<u8>,
  pub premine: Option<u128>,
  pub rune: Option<Rune>,
  pub spacers: Option<u32>,
  pub symbol: Option<char>,
  pub terms: Option<Terms>,
  #[serde(default)]
  pub turbo: bool,
}

impl Etching {
  pub const MAX_DIVISIBILITY: u8 = 38;
  pub const MAX_SPACERS: u32 = 0b0000_0111_1111_1111_1111_1111_1111_1111;

  pub fn supply(&self) -> Option<u128> {
    let terms = self.terms.unwrap_or_default();

    let premine = self.premine.unwrap_or_default();
    let cap = terms.cap.unwrap_or_default();
    let amount = terms.amount.unwrap_or_default();

    premine.checked_add(cap.checked_mul(amount)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn max_spacers_covers_a_maximum_length_name() {
    let mut rune = String::new();

    for (i, c) in "BCGDENLQRQWDSLRUGSNLBTMFIJAV".chars().enumerate() {
      if i > 0 {
        rune.push('•');
      }

      rune.push(c);
    }

    assert_eq!(
      Etching::MAX_SPACERS,
      rune.parse::<SpacedRune>().unwrap().spacers
    );
  }

  #[test]
  fn supply() {
    #[track_caller]
    fn case(premine: Option<u128>, amount: Option<u128>, cap: Option<u128>, supply: Option<u128>) {
      assert_eq!(
        Etching {
          premine,
          terms: Some(Terms {
            amount,
            cap,
            ..default()
          }),
          ..default()
        }
        .supply(),
        supply,
      );
    }

    case(None, None, None, Some(0));
    case(Some(0), Some(0), Some(0), Some(0));
    case(Some(1), Some(0), Some(0), Some(1));
    case(Some(1), Some(2), Some(3), Some(7));
    case(Some(u128::MAX), Some(1), Some(1), None);
    case(Some(0), Some(u128::MAX), Some(2), None);
    case(Some(u128::MAX), Some(0), Some(0), Some(u128::MAX));
  }

  #[test]
  fn supply_with_no_terms() {
    assert_eq!(
      Etching {
        premine: Some(100),
        ..default()
      }
      .supply(),
      Some(100),
    );
  }
}
