//! The `Wallet` trait: an EIP-1193 style wallet provider.
//!
//! The wallet authenticates the user, owns the active network selection and
//! signs writes. It also hands out [`Registry`] handles bound to one of its
//! accounts.

use std::future::Future;

use thiserror::Error;

use crate::{
  chain::{Address, Network},
  registry::Registry,
};

/// Failures reported by a wallet provider. The connection flow matches on
/// [`WalletError::UnrecognizedChain`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
  /// The wallet does not know the requested chain (EIP-1193 code 4902).
  #[error("{0}")]
  UnrecognizedChain(String),

  /// Any other JSON-RPC error answered by the wallet, including the user
  /// rejecting the request (code 4001).
  #[error("{message}")]
  Rejected { code: i64, message: String },

  /// The wallet could not be reached or answered something unparseable.
  #[error("{0}")]
  Transport(String),
}

pub trait Wallet: Send + Sync {
  type Registry: Registry;

  /// `eth_requestAccounts`. May prompt the user.
  fn request_accounts(
    &self,
  ) -> impl Future<Output = Result<Vec<Address>, WalletError>> + Send + '_;

  /// `eth_accounts`: accounts already exposed to us, without prompting.
  fn accounts(
    &self,
  ) -> impl Future<Output = Result<Vec<Address>, WalletError>> + Send + '_;

  /// `eth_chainId`
  fn chain_id(&self) -> impl Future<Output = Result<u64, WalletError>> + Send + '_;

  /// `wallet_switchEthereumChain`
  fn switch_chain(
    &self,
    chain_id: u64,
  ) -> impl Future<Output = Result<(), WalletError>> + Send + '_;

  /// `wallet_addEthereumChain`
  fn add_chain<'a>(
    &'a self,
    network: &'a Network,
  ) -> impl Future<Output = Result<(), WalletError>> + Send + 'a;

  /// A registry handle for `contract`, signing as `account`.
  fn registry(&self, contract: Address, account: Address) -> Self::Registry;
}
