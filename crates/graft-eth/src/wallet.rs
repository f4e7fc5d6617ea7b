//! [`RpcWallet`]: a wallet provider that speaks EIP-1193 methods over
//! JSON-RPC, such as a desktop wallet's local HTTP endpoint or a development
//! node with unlocked accounts.

use std::time::Duration;

use graft_core::{
  chain::{Address, Network},
  wallet::{Wallet, WalletError},
};
use serde_json::{Value, json};

use crate::{
  Result,
  contract::{ContractRegistry, DEFAULT_POLL_INTERVAL},
  rpc::{RpcClient, parse_quantity},
};

#[derive(Clone, Debug)]
pub struct RpcWallet {
  rpc:           RpcClient,
  poll_interval: Duration,
}

impl RpcWallet {
  pub fn new(rpc: RpcClient) -> Self {
    Self {
      rpc,
      poll_interval: DEFAULT_POLL_INTERVAL,
    }
  }

  /// Open a wallet at `url`.
  pub fn connect(url: &str) -> Result<Self> { Ok(Self::new(RpcClient::new(url)?)) }

  /// How often registries handed out by this wallet poll for receipts.
  pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
    self.poll_interval = poll_interval;
    self
  }

  async fn addresses(&self, method: &str) -> Result<Vec<Address>, WalletError> {
    let raw: Vec<String> = self.rpc.call(method, json!([])).await?;
    raw
      .iter()
      .map(|s| s.parse::<Address>())
      .collect::<Result<_, _>>()
      .map_err(|e| WalletError::Transport(e.to_string()))
  }
}

impl Wallet for RpcWallet {
  type Registry = ContractRegistry;

  async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
    self.addresses("eth_requestAccounts").await
  }

  async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
    self.addresses("eth_accounts").await
  }

  async fn chain_id(&self) -> Result<u64, WalletError> {
    let raw: String = self.rpc.call("eth_chainId", json!([])).await?;
    Ok(parse_quantity(&raw)?)
  }

  async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
    let _: Value = self
      .rpc
      .call(
        "wallet_switchEthereumChain",
        json!([{ "chainId": format!("{chain_id:#x}") }]),
      )
      .await?;
    Ok(())
  }

  async fn add_chain(&self, network: &Network) -> Result<(), WalletError> {
    let _: Value = self
      .rpc
      .call(
        "wallet_addEthereumChain",
        json!([{
          "chainId":   network.chain_id_hex(),
          "chainName": network.chain_name,
          "nativeCurrency": {
            "name":     network.native_currency.name,
            "symbol":   network.native_currency.symbol,
            "decimals": network.native_currency.decimals,
          },
          "rpcUrls":           network.rpc_urls,
          "blockExplorerUrls": network.explorer_urls,
        }]),
      )
      .await?;
    Ok(())
  }

  fn registry(&self, contract: Address, account: Address) -> ContractRegistry {
    ContractRegistry::new(self.rpc.clone(), contract, account)
      .with_poll_interval(self.poll_interval)
  }
}
