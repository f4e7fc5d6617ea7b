//! Layered settings: optional TOML file, then `GRAFT_*` environment variables.
//! Command-line flags are applied on top by the caller.

use std::{path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File, Source};
use graft_core::chain::{DEFAULT_CONTRACT, NativeCurrency, Network};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// JSON-RPC endpoint of the wallet provider. Unset means no wallet.
  pub wallet_url:       Option<String>,
  pub contract_address: String,
  pub poll_interval_ms: u64,
  pub network:          NetworkSettings,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      wallet_url:       None,
      contract_address: DEFAULT_CONTRACT.to_owned(),
      poll_interval_ms: 2_000,
      network:          NetworkSettings::default(),
    }
  }
}

/// The `[network]` table. Keys left out keep their Sepolia values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
  pub chain_id:          u64,
  pub chain_name:        String,
  pub currency_name:     String,
  pub currency_symbol:   String,
  pub currency_decimals: u8,
  pub rpc_urls:          Vec<String>,
  pub explorer_urls:     Vec<String>,
}

impl Default for NetworkSettings {
  fn default() -> Self {
    let n = Network::sepolia();
    Self {
      chain_id:          n.chain_id,
      chain_name:        n.chain_name,
      currency_name:     n.native_currency.name,
      currency_symbol:   n.native_currency.symbol,
      currency_decimals: n.native_currency.decimals,
      rpc_urls:          n.rpc_urls,
      explorer_urls:     n.explorer_urls,
    }
  }
}

impl From<NetworkSettings> for Network {
  fn from(s: NetworkSettings) -> Self {
    Self {
      chain_id:        s.chain_id,
      chain_name:      s.chain_name,
      native_currency: NativeCurrency {
        name:     s.currency_name,
        symbol:   s.currency_symbol,
        decimals: s.currency_decimals,
      },
      rpc_urls:        s.rpc_urls,
      explorer_urls:   s.explorer_urls,
    }
  }
}

impl Settings {
  /// Read `path` (if it exists) and the process environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::layered(File::from(path).required(false), environment())
  }

  fn layered<S>(file: S, env: Environment) -> Result<Self, ConfigError>
  where
    S: Source + Send + Sync + 'static,
  {
    Config::builder()
      .add_source(file)
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn poll_interval(&self) -> Duration { Duration::from_millis(self.poll_interval_ms) }
}

/// `GRAFT_WALLET_URL`, `GRAFT_NETWORK__CHAIN_ID`, `GRAFT_NETWORK__RPC_URLS=a,b`.
fn environment() -> Environment {
  Environment::with_prefix("GRAFT")
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
    .list_separator(",")
    .with_list_parse_key("network.rpc_urls")
    .with_list_parse_key("network.explorer_urls")
}
