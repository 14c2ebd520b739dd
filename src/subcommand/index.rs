use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Index {}

#[derive(Serialize)]
struct Output {
  height: Option<u64>,
  runes: Vec<RuneSummary>,
}

#[derive(Serialize)]
struct RuneSummary {
  id: RuneId,
  rune: SpacedRune,
  etching: Txid,
  supply: String,
  mints: u128,
  burned: String,
}

impl Index {
  pub(crate) fn run(self, options: Options) -> Result {
    let client = options.bitcoin_rpc_client()?;

    let mut indexer = RunestoneIndexer::new(MemoryStorage::new(), client, &options);

    indexer.update()?;

    let storage = indexer.storage();

    log::info!(
      "indexed to height {}",
      storage
        .height()?
        .map(|height| height.to_string())
        .unwrap_or_else(|| "none".into()),
    );

    print_json(Output {
      height: storage.height()?,
      runes: storage
        .runes()
        .into_iter()
        .map(|(id, entry)| RuneSummary {
          id,
          rune: entry.spaced_rune,
          etching: entry.etching,
          supply: entry.pile(entry.supply()).to_string(),
          mints: entry.mints,
          burned: entry.pile(entry.burned).to_string(),
        })
        .collect(),
    })?;

    Ok(())
  }
}
