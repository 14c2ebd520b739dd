use super::*;

pub use self::{
  artifact::Artifact,
  cenotaph::Cenotaph,
  edict::Edict,
  etching::Etching,
  flaw::Flaw,
  pile::Pile,
  rune::Rune,
  rune_id::RuneId,
  runestone::{Encoded, Runestone},
  spaced_rune::SpacedRune,
  terms::Terms,
};

mod artifact;
mod cenotaph;
mod edict;
pub mod error;
mod etching;
mod flag;
mod flaw;
mod message;
mod pile;
mod rune;
mod rune_id;
mod runestone;
mod spaced_rune;
mod tag;
mod terms;
pub mod varint;
