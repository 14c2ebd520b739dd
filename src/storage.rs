use super::*;

/// Ledger storage consumed by the indexer.
///
/// Writes are buffered until `commit_block` and must be observable through
/// the getters in the meantime, so the indexer sees its own writes while a
/// block is open. `abort_block` discards everything since the last commit.
pub trait Storage {
  fn height(&self) -> Result<Option<u64>>;

  fn block_hash(&self, height: u64) -> Result<Option<BlockHash>>;

  fn set_block_hash(&mut self, height: u64, hash: BlockHash) -> Result;

  fn rune_entry(&self, id: RuneId) -> Result<Option<RuneEntry>>;

  fn rune_id(&self, rune: Rune) -> Result<Option<RuneId>>;

  fn set_rune_entry(&mut self, id: RuneId, entry: RuneEntry) -> Result;

  fn balances(&self, outpoint: OutPoint) -> Result<Option<Vec<(RuneId, u128)>>>;

  fn set_balances(&mut self, outpoint: OutPoint, balances: &[(RuneId, u128)]) -> Result;

  fn take_balances(&mut self, outpoint: OutPoint) -> Result<Option<Vec<(RuneId, u128)>>>;

  fn increment_mints(&mut self, id: RuneId) -> Result;

  fn add_burned(&mut self, id: RuneId, amount: u128) -> Result;

  fn commit_block(&mut self) -> Result;

  fn abort_block(&mut self) -> Result;
}

#[derive(Debug, Default, Clone, PartialEq)]
struct State {
  balances: BTreeMap<OutPoint, Vec<(RuneId, u128)>>,
  block_hashes: BTreeMap<u64, BlockHash>,
  entries: BTreeMap<RuneId, RuneEntry>,
  rune_to_id: BTreeMap<Rune, RuneId>,
}

/// In-memory storage with write-transaction semantics: every write lands in
/// `pending`, which replaces `committed` on `commit_block` and is reset to it
/// on `abort_block`.
#[derive(Debug, Default, PartialEq)]
pub struct MemoryStorage {
  committed: State,
  pending: State,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn runes(&self) -> Vec<(RuneId, RuneEntry)> {
    self
      .committed
      .entries
      .iter()
      .map(|(id, entry)| (*id, *entry))
      .collect()
  }

  pub fn unspent_balances(&self) -> Vec<(OutPoint, Vec<(RuneId, u128)>)> {
    self
      .committed
      .balances
      .iter()
      .map(|(outpoint, balances)| (*outpoint, balances.clone()))
      .collect()
  }
}

impl Storage for MemoryStorage {
  fn height(&self) -> Result<Option<u64>> {
    Ok(self.pending.block_hashes.keys().next_back().copied())
  }

  fn block_hash(&self, height: u64) -> Result<Option<BlockHash>> {
    Ok(self.pending.block_hashes.get(&height).copied())
  }

  fn set_block_hash(&mut self, height: u64, hash: BlockHash) -> Result {
    self.pending.block_hashes.insert(height, hash);
    Ok(())
  }

  fn rune_entry(&self, id: RuneId) -> Result<Option<RuneEntry>> {
    Ok(self.pending.entries.get(&id).copied())
  }

  fn rune_id(&self, rune: Rune) -> Result<Option<RuneId>> {
    Ok(self.pending.rune_to_id.get(&rune).copied())
  }

  fn set_rune_entry(&mut self, id: RuneId, entry: RuneEntry) -> Result {
    self.pending.rune_to_id.insert(entry.spaced_rune.rune, id);
    self.pending.entries.insert(id, entry);
    Ok(())
  }

  fn balances(&self, outpoint: OutPoint) -> Result<Option<Vec<(RuneId, u128)>>> {
    Ok(self.pending.balances.get(&outpoint).cloned())
  }

  fn set_balances(&mut self, outpoint: OutPoint, balances: &[(RuneId, u128)]) -> Result {
    self.pending.balances.insert(outpoint, balances.into());
    Ok(())
  }

  fn take_balances(&mut self, outpoint: OutPoint) -> Result<Option<Vec<(RuneId, u128)>>> {
    Ok(self.pending.balances.remove(&outpoint))
  }

  fn increment_mints(&mut self, id: RuneId) -> Result {
    let entry = self
      .pending
      .entries
      .get_mut(&id)
      .ok_or_else(|| anyhow!("increment mints of unknown rune {id}"))?;

    entry.mints = entry
      .mints
      .checked_add(1)
      .ok_or_else(|| anyhow!("mint count of rune {id} overflows"))?;

    Ok(())
  }

  fn add_burned(&mut self, id: RuneId, amount: u128) -> Result {
    let entry = self
      .pending
      .entries
      .get_mut(&id)
      .ok_or_else(|| anyhow!("burn of unknown rune {id}"))?;

    entry.burned = entry
      .burned
      .checked_add(amount)
      .ok_or_else(|| anyhow!("burned amount of rune {id} overflows"))?;

    Ok(())
  }

  fn commit_block(&mut self) -> Result {
    self.committed = self.pending.clone();
    Ok(())
  }

  fn abort_block(&mut self) -> Result {
    self.pending = self.committed.clone();
    Ok(())
  }
}
