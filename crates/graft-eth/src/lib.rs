//! JSON-RPC backend for `graft-core`.
//!
//! [`RpcWallet`] implements [`Wallet`](graft_core::wallet::Wallet) against an
//! endpoint that answers EIP-1193 wallet methods and signs
//! `eth_sendTransaction`. The [`ContractRegistry`] handles it hands out
//! implement [`Registry`](graft_core::registry::Registry) by ABI-encoding calls
//! to the registry contract.

pub mod abi;
pub mod contract;
pub mod error;
pub mod rpc;
pub mod wallet;

pub use contract::ContractRegistry;
pub use error::{Error, Result};
pub use rpc::RpcClient;
pub use wallet::RpcWallet;
