use {
  super::*,
  bitcoincore_rpc::{Client, RpcApi},
};

/// Bitcoin node queries consumed by the indexer. `block_hash` returns `None`
/// past the chain tip, and `transaction_info` returns `None` for unknown
/// transactions; every other failure is an error.
pub trait RpcClient {
  fn block_hash(&self, height: u64) -> Result<Option<BlockHash>>;

  fn block(&self, hash: BlockHash) -> Result<Block>;

  fn transaction_info(&self, txid: &Txid) -> Result<Option<TransactionInfo>>;
}

#[derive(Debug, Clone)]
pub struct TransactionInfo {
  pub transaction: Transaction,
  /// Height of the block containing the transaction, `None` if unconfirmed.
  pub height: Option<u64>,
}

impl RpcClient for Client {
  fn block_hash(&self, height: u64) -> Result<Option<BlockHash>> {
    into_option(self.get_block_hash(height))
  }

  fn block(&self, hash: BlockHash) -> Result<Block> {
    Ok(self.get_block(&hash)?)
  }

  fn transaction_info(&self, txid: &Txid) -> Result<Option<TransactionInfo>> {
    let Some(info) = into_option(self.get_raw_transaction_info(txid, None))? else {
      return Ok(None);
    };

    let height = match info.blockhash {
      Some(blockhash) => Some(u64::try_from(
        self.get_block_header_info(&blockhash)?.height,
      )?),
      None => None,
    };

    Ok(Some(TransactionInfo {
      transaction: info.transaction()?,
      height,
    }))
  }
}

fn into_option<T>(result: bitcoincore_rpc::Result<T>) -> Result<Option<T>> {
  match result {
    Ok(ok) => Ok(Some(ok)),
    Err(bitcoincore_rpc::Error::JsonRpc(bitcoincore_rpc::jsonrpc::error::Error::Rpc(
      bitcoincore_rpc::jsonrpc::error::RpcError { code: -8, .. },
    ))) => Ok(None),
    Err(bitcoincore_rpc::Error::JsonRpc(bitcoincore_rpc::jsonrpc::error::Error::Rpc(
      bitcoincore_rpc::jsonrpc::error::RpcError { message, .. },
    ))) if message.ends_with("not found") => Ok(None),
    Err(err) => Err(err.into()),
  }
}
