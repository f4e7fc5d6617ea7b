//! Error type for `graft-eth`.

use graft_core::{chain::TxHash, wallet::WalletError};
use thiserror::Error;

/// EIP-1193: the wallet does not recognise the requested chain.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Http(#[from] reqwest::Error),

  #[error("endpoint answered HTTP {0}")]
  Status(reqwest::StatusCode),

  /// A JSON-RPC error object. The message is passed through untouched; it is
  /// what the user gets to see.
  #[error("{message}")]
  Rpc { code: i64, message: String },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("malformed ABI data: {0}")]
  Abi(String),

  #[error("malformed hex value: {0:?}")]
  Hex(String),

  #[error("transaction {0} reverted")]
  Reverted(TxHash),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for WalletError {
  fn from(e: Error) -> Self {
    match e {
      Error::Rpc {
        code: UNRECOGNIZED_CHAIN,
        message,
      } => WalletError::UnrecognizedChain(message),
      Error::Rpc { code, message } => WalletError::Rejected { code, message },
      other => WalletError::Transport(other.to_string()),
    }
  }
}
