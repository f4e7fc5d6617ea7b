//! Chain-level primitives: account/contract addresses, transaction hashes and
//! the description of the network the registry lives on.

use std::{fmt, str::FromStr};

use crate::Error;

// ─── Address ─────────────────────────────────────────────────────────────────

/// A 20-byte account or contract address, displayed as `0x`-prefixed
/// lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
  pub const fn new(bytes: [u8; 20]) -> Self { Self(bytes) }

  /// Abbreviated form for status lines: `0x54bd...4b77`.
  pub fn short(&self) -> String {
    let full = self.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let digits = s
      .strip_prefix("0x")
      .or_else(|| s.strip_prefix("0X"))
      .unwrap_or(s);
    let bytes = hex::decode(digits).map_err(|_| Error::InvalidAddress(s.to_owned()))?;
    let bytes: [u8; 20] = bytes
      .try_into()
      .map_err(|_| Error::InvalidAddress(s.to_owned()))?;
    Ok(Self(bytes))
  }
}

impl fmt::Display for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "0x{}", hex::encode(self.0))
  }
}

// ─── Transaction hash ────────────────────────────────────────────────────────

/// Hash of a submitted write, as reported by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Network ─────────────────────────────────────────────────────────────────

/// The native currency advertised when asking a wallet to add a network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeCurrency {
  pub name:     String,
  pub symbol:   String,
  pub decimals: u8,
}

/// The network the registry contract is deployed on, with the descriptive
/// parameters handed to the wallet if it does not know the network yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
  pub chain_id:        u64,
  pub chain_name:      String,
  pub native_currency: NativeCurrency,
  pub rpc_urls:        Vec<String>,
  pub explorer_urls:   Vec<String>,
}

impl Network {
  /// Sepolia testnet.
  pub fn sepolia() -> Self {
    Self {
      chain_id:        11_155_111,
      chain_name:      "Sepolia Testnet".into(),
      native_currency: NativeCurrency {
        name:     "Sepolia ETH".into(),
        symbol:   "ETH".into(),
        decimals: 18,
      },
      rpc_urls:        vec!["https://sepolia.infura.io/v3/".into()],
      explorer_urls:   vec!["https://sepolia.etherscan.io".into()],
    }
  }

  /// Chain id as the `0x`-prefixed hex quantity wallets expect.
  pub fn chain_id_hex(&self) -> String { format!("{:#x}", self.chain_id) }
}

impl Default for Network {
  fn default() -> Self { Self::sepolia() }
}

/// Address of the deployed registry contract on Sepolia.
pub const DEFAULT_CONTRACT: &str = "0x54bDc44AC11c0956F44e04F2d2b811d0Fa154B77";
