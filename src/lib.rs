#![allow(clippy::too_many_arguments, clippy::result_large_err)]
#![deny(
  clippy::cast_lossless,
  clippy::cast_possible_truncation,
  clippy::cast_possible_wrap,
  clippy::cast_sign_loss
)]

use {
  self::{deserialize_from_str::DeserializeFromStr, subcommand::Subcommand},
  anyhow::{anyhow, bail, Context, Error},
  bitcoin::{
    constants::{MAX_SCRIPT_ELEMENT_SIZE, SUBSIDY_HALVING_INTERVAL},
    opcodes,
    script::{self, Instruction, ScriptBuf},
    Block, BlockHash, Network, OutPoint, Transaction, Txid,
  },
  clap::Parser,
  serde::{Deserialize, Deserializer, Serialize, Serializer},
  std::{
    collections::{BTreeMap, BTreeSet, HashMap, VecDeque},
    fmt::{self, Display, Formatter},
    path::PathBuf,
    str::FromStr,
  },
};

pub use crate::{
  chain::Chain,
  height::Height,
  index::{MintError, RuneEntry, RunestoneIndexer},
  options::Options,
  rpc::{RpcClient, TransactionInfo},
  runes::{
    varint, Artifact, Cenotaph, Edict, Encoded, Etching, Flaw, Pile, Rune, RuneId, Runestone,
    SpacedRune, Terms,
  },
  storage::{MemoryStorage, Storage},
};

pub mod arguments;
mod chain;
mod deserialize_from_str;
mod height;
pub mod index;
mod options;
pub mod rpc;
pub mod runes;
pub mod storage;
mod subcommand;

type Result<T = (), E = Error> = std::result::Result<T, E>;

fn print_json(output: impl Serialize) -> Result {
  serde_json::to_writer_pretty(std::io::stdout(), &output)?;
  println!();
  Ok(())
}

fn default<T: Default>() -> T {
  Default::default()
}
