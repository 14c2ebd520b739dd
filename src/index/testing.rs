use {
  super::*,
  bitcoin::{
    block::{Header, Version},
    blockdata::locktime::absolute::LockTime,
    hash_types::TxMerkleNode,
    hashes::Hash,
    CompactTarget, Sequence, TxIn, TxOut, Witness,
  },
  std::{cell::{Cell, RefCell}, rc::Rc},
};

pub(crate) struct TransactionTemplate<'a> {
  pub(crate) inputs: &'a [(usize, usize, usize, Witness)],
  pub(crate) op_return: Option<ScriptBuf>,
  pub(crate) op_return_index: Option<usize>,
  pub(crate) output_values: &'a [u64],
  pub(crate) outputs: usize,
}

impl Default for TransactionTemplate<'_> {
  fn default() -> Self {
    Self {
      inputs: &[],
      op_return: None,
      op_return_index: None,
      output_values: &[],
      outputs: 1,
    }
  }
}

pub(crate) fn commitment_witness(commitment: &[u8]) -> Witness {
  let script = script::Builder::new()
    .push_slice::<&script::PushBytes>(commitment.try_into().unwrap())
    .into_script();

  Witness::from_slice(&[script.into_bytes(), Vec::new()])
}

fn p2tr() -> ScriptBuf {
  script::Builder::new()
    .push_opcode(opcodes::all::OP_PUSHNUM_1)
    .push_slice([1; 32])
    .into_script()
}

#[derive(Clone)]
pub(crate) struct MockChain {
  blocks: Rc<RefCell<Vec<Block>>>,
  mempool: Rc<RefCell<Vec<Transaction>>>,
  nonce: Rc<Cell<u32>>,
}

impl MockChain {
  pub(crate) fn new() -> Self {
    Self {
      blocks: Rc::new(RefCell::new(Vec::new())),
      mempool: Rc::new(RefCell::new(Vec::new())),
      nonce: Rc::new(Cell::new(0)),
    }
  }

  pub(crate) fn block_count(&self) -> u64 {
    self.blocks.borrow().len().try_into().unwrap()
  }

  pub(crate) fn mine_blocks(&self, n: u64) -> Vec<Block> {
    let mut mined = Vec::new();

    for _ in 0..n {
      let mut blocks = self.blocks.borrow_mut();
      let height = blocks.len();

      let nonce = self.nonce.get();
      self.nonce.set(nonce + 1);

      let coinbase = Transaction {
        version: 2,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
          previous_output: OutPoint::null(),
          script_sig: script::Builder::new()
            .push_int(i64::try_from(height).unwrap())
            .into_script(),
          sequence: Sequence::MAX,
          witness: Witness::new(),
        }],
        output: vec![TxOut {
          value: 50 * 100_000_000,
          script_pubkey: p2tr(),
        }],
      };

      let mut txdata = vec![coinbase];
      txdata.append(&mut self.mempool.borrow_mut());

      let block = Block {
        header: Header {
          version: Version::ONE,
          prev_blockhash: blocks
            .last()
            .map(|block| block.block_hash())
            .unwrap_or_else(BlockHash::all_zeros),
          merkle_root: TxMerkleNode::all_zeros(),
          time: height.try_into().unwrap(),
          bits: CompactTarget::from_consensus(0),
          nonce,
        },
        txdata,
      };

      mined.push(block.clone());
      blocks.push(block);
    }

    mined
  }

  pub(crate) fn invalidate_tip(&self) {
    self.blocks.borrow_mut().pop();
  }

  pub(crate) fn broadcast(&self, template: TransactionTemplate) -> Txid {
    let transaction = self.transaction(template);
    let txid = transaction.txid();
    self.mempool.borrow_mut().push(transaction);
    txid
  }

  fn transaction(&self, template: TransactionTemplate) -> Transaction {
    let input = template
      .inputs
      .iter()
      .map(|(block, tx, vout, witness)| {
        let txid = self.blocks.borrow()[*block].txdata[*tx].txid();
        TxIn {
          previous_output: OutPoint {
            txid,
            vout: (*vout).try_into().unwrap(),
          },
          script_sig: ScriptBuf::new(),
          sequence: Sequence::MAX,
          witness: witness.clone(),
        }
      })
      .collect();

    let mut output = (0..template.outputs)
      .map(|i| TxOut {
        value: template.output_values.get(i).copied().unwrap_or(5_000),
        script_pubkey: p2tr(),
      })
      .collect::<Vec<TxOut>>();

    if let Some(script_pubkey) = template.op_return.clone() {
      output.insert(
        template.op_return_index.unwrap_or(output.len()),
        TxOut {
          value: 0,
          script_pubkey,
        },
      );
    }

    Transaction {
      version: 2,
      lock_time: LockTime::ZERO,
      input,
      output,
    }
  }
}

impl RpcClient for MockChain {
  fn block_hash(&self, height: u64) -> Result<Option<BlockHash>> {
    Ok(
      self
        .blocks
        .borrow()
        .get(usize::try_from(height)?)
        .map(Block::block_hash),
    )
  }

  fn block(&self, hash: BlockHash) -> Result<Block> {
    self
      .blocks
      .borrow()
      .iter()
      .find(|block| block.block_hash() == hash)
      .cloned()
      .ok_or_else(|| anyhow!("block {hash} not found"))
  }

  fn transaction_info(&self, txid: &Txid) -> Result<Option<TransactionInfo>> {
    for (height, block) in self.blocks.borrow().iter().enumerate() {
      for tx in &block.txdata {
        if tx.txid() == *txid {
          return Ok(Some(TransactionInfo {
            transaction: tx.clone(),
            height: Some(height.try_into().unwrap()),
          }));
        }
      }
    }

    for tx in self.mempool.borrow().iter() {
      if tx.txid() == *txid {
        return Ok(Some(TransactionInfo {
          transaction: tx.clone(),
          height: None,
        }));
      }
    }

    Ok(None)
  }
}

pub(crate) struct Context {
  pub(crate) chain: MockChain,
  pub(crate) indexer: RunestoneIndexer<MemoryStorage, MockChain>,
}

impl Context {
  pub(crate) fn new() -> Self {
    let chain = MockChain::new();

    let mut context = Context {
      indexer: RunestoneIndexer::new(
        MemoryStorage::new(),
        chain.clone(),
        &Options::try_parse_from(["runix", "--chain", "regtest"]).unwrap(),
      ),
      chain,
    };

    context.mine_blocks(1);

    context
  }

  pub(crate) fn mine_blocks(&mut self, n: u64) -> Vec<Block> {
    let blocks = self.chain.mine_blocks(n);
    self.indexer.update().unwrap();
    blocks
  }

  pub(crate) fn broadcast(&self, template: TransactionTemplate) -> Txid {
    self.chain.broadcast(template)
  }

  /// Mines a commitment, waits out the maturity window, then reveals the
  /// etching in a fresh transaction. Returns the reveal txid and the id the
  /// etched rune is assigned.
  pub(crate) fn etch(&mut self, runestone: Runestone, outputs: usize) -> (Txid, RuneId) {
    let commit_block = usize::try_from(self.chain.block_count() - 1).unwrap();

    self.mine_blocks(Runestone::COMMIT_CONFIRMATIONS.into());

    let witness = match runestone.etching.and_then(|etching| etching.rune) {
      Some(rune) => commitment_witness(&rune.commitment()),
      None => Witness::new(),
    };

    let txid = self.broadcast(TransactionTemplate {
      inputs: &[(commit_block, 0, 0, witness)],
      op_return: Some(runestone.encipher().unwrap().script_pubkey),
      outputs,
      ..default()
    });

    self.mine_blocks(1);

    (
      txid,
      RuneId {
        block: self.chain.block_count() - 1,
        tx: 1,
      },
    )
  }

  #[track_caller]
  pub(crate) fn assert_runes(&self, entries: Vec<(RuneId, RuneEntry)>) {
    assert_eq!(self.indexer.storage().runes(), entries);
  }

  #[track_caller]
  pub(crate) fn assert_balances(&self, balances: Vec<(OutPoint, Vec<(RuneId, u128)>)>) {
    assert_eq!(self.indexer.storage().unspent_balances(), balances);
  }
}
