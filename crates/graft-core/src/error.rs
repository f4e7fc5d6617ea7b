//! Error types for `graft-core`.

use thiserror::Error;

use crate::{form::ValidationErrors, record::RecordId};

#[derive(Debug, Error)]
pub enum Error {
  // ── Connectivity ─────────────────────────────────────────────────────────
  #[error("No Ethereum wallet found. Please install MetaMask.")]
  NoWallet,

  #[error("the wallet did not expose any account")]
  NoAccounts,

  /// The wallet refused to switch to (or register) the required network.
  #[error("{0}")]
  Connection(String),

  // ── Validation ───────────────────────────────────────────────────────────
  #[error("invalid form: {0}")]
  Validation(ValidationErrors),

  #[error("invalid address: {0:?}")]
  InvalidAddress(String),

  // ── Transactions ─────────────────────────────────────────────────────────
  /// The wallet, the contract, or the transport rejected a write. The message
  /// is the underlying error text, unmodified.
  #[error("{0}")]
  Transaction(String),

  // ── Reads ────────────────────────────────────────────────────────────────
  /// A count read failed, so the whole refresh was abandoned.
  #[error("failed to load registry data: {0}")]
  Fetch(String),

  // ── Matching ─────────────────────────────────────────────────────────────
  #[error("Please select both a donor and receiver to match")]
  NothingSelected,

  #[error("donor {0} is not in the loaded registry data")]
  UnknownDonor(RecordId),

  #[error("receiver {0} is not in the loaded registry data")]
  UnknownReceiver(RecordId),

  #[error(
    "These donor and receiver are not compatible. Please select a different pair."
  )]
  Incompatible {
    donor:    RecordId,
    receiver: RecordId,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
