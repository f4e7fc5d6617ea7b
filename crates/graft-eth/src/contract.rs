//! [`ContractRegistry`]: the registry contract reached through JSON-RPC.
//!
//! Reads are `eth_call` against the latest block. Writes are
//! `eth_sendTransaction` through the wallet endpoint, which signs them;
//! confirmation polls `eth_getTransactionReceipt`.

use std::time::Duration;

use graft_core::{
  chain::{Address, TxHash},
  record::{Donor, Match, NewDonor, NewReceiver, Receiver, RecordId},
  registry::Registry,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{
  Error, Result,
  abi::{self, Decoder, Token},
  rpc::{RpcClient, from_hex, to_hex},
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Receipt {
  /// `0x1` success, `0x0` reverted. Absent on pre-Byzantium chains.
  status:       Option<String>,
  block_number: Option<String>,
}

/// A registry handle bound to one contract and one signing account.
#[derive(Clone, Debug)]
pub struct ContractRegistry {
  rpc:           RpcClient,
  contract:      Address,
  account:       Address,
  poll_interval: Duration,
}

impl ContractRegistry {
  pub fn new(rpc: RpcClient, contract: Address, account: Address) -> Self {
    Self {
      rpc,
      contract,
      account,
      poll_interval: DEFAULT_POLL_INTERVAL,
    }
  }

  pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
    self.poll_interval = poll_interval;
    self
  }

  pub fn contract(&self) -> Address { self.contract }

  pub fn account(&self) -> Address { self.account }

  async fn read(&self, signature: &str, args: &[Token<'_>]) -> Result<Vec<u8>> {
    let data = abi::encode_call(signature, args);
    let raw: String = self
      .rpc
      .call(
        "eth_call",
        json!([
          {
            "from": self.account.to_string(),
            "to":   self.contract.to_string(),
            "data": to_hex(&data),
          },
          "latest"
        ]),
      )
      .await?;
    from_hex(&raw)
  }

  async fn read_count(&self, signature: &str) -> Result<u64> {
    let out = self.read(signature, &[]).await?;
    Decoder::new(&out).uint(0)
  }

  async fn write(&self, signature: &str, args: &[Token<'_>]) -> Result<TxHash> {
    let data = abi::encode_call(signature, args);
    let hash: String = self
      .rpc
      .call(
        "eth_sendTransaction",
        json!([{
          "from": self.account.to_string(),
          "to":   self.contract.to_string(),
          "data": to_hex(&data),
        }]),
      )
      .await?;
    debug!(signature, %hash, "transaction sent");
    Ok(TxHash(hash))
  }
}

impl Registry for ContractRegistry {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn register_donor(&self, donor: &NewDonor) -> Result<TxHash> {
    self
      .write(abi::REGISTER_DONOR, &[
        Token::Str(&donor.name),
        Token::Uint(donor.age.into()),
        Token::Str(donor.blood_type.as_str()),
        Token::Str(donor.organ_type.as_str()),
        Token::Str(&donor.contact_info),
      ])
      .await
  }

  async fn register_receiver(&self, receiver: &NewReceiver) -> Result<TxHash> {
    self
      .write(abi::REGISTER_RECEIVER, &[
        Token::Str(&receiver.name),
        Token::Uint(receiver.age.into()),
        Token::Str(receiver.blood_type.as_str()),
        Token::Str(receiver.organ_needed.as_str()),
        Token::Uint(receiver.urgency_level.into()),
        Token::Str(&receiver.medical_history),
        Token::Str(&receiver.contact_info),
      ])
      .await
  }

  async fn create_match(&self, donor_id: RecordId, receiver_id: RecordId) -> Result<TxHash> {
    self
      .write(abi::CREATE_MATCH, &[
        Token::Uint(donor_id),
        Token::Uint(receiver_id),
      ])
      .await
  }

  async fn confirm(&self, tx: &TxHash) -> Result<()> {
    loop {
      let receipt: Option<Receipt> = self
        .rpc
        .call("eth_getTransactionReceipt", json!([tx.0]))
        .await?;
      match receipt {
        Some(r) if r.status.as_deref() == Some("0x0") => {
          return Err(Error::Reverted(tx.clone()));
        }
        Some(r) => {
          debug!(%tx, block = ?r.block_number, "transaction mined");
          return Ok(());
        }
        None => tokio::time::sleep(self.poll_interval).await,
      }
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn donor_count(&self) -> Result<u64> { self.read_count(abi::GET_DONOR_COUNT).await }

  async fn get_donor(&self, id: RecordId) -> Result<Donor> {
    let out = self.read(abi::GET_DONOR, &[Token::Uint(id)]).await?;
    let d = Decoder::new(&out);
    Ok(Donor {
      id,
      name: d.string(0)?,
      age: d.uint(1)?,
      blood_type: d.string(2)?,
      organ_type: d.string(3)?,
      contact_info: d.string(4)?,
      is_matched: d.boolean(5)?,
    })
  }

  async fn receiver_count(&self) -> Result<u64> {
    self.read_count(abi::GET_RECEIVER_COUNT).await
  }

  async fn get_receiver(&self, id: RecordId) -> Result<Receiver> {
    let out = self.read(abi::GET_RECEIVER, &[Token::Uint(id)]).await?;
    let d = Decoder::new(&out);
    Ok(Receiver {
      id,
      name: d.string(0)?,
      age: d.uint(1)?,
      blood_type: d.string(2)?,
      organ_needed: d.string(3)?,
      urgency_level: d.uint(4)?,
      contact_info: d.string(5)?,
      is_matched: d.boolean(6)?,
    })
  }

  async fn match_count(&self) -> Result<u64> { self.read_count(abi::GET_MATCH_COUNT).await }

  async fn get_match(&self, id: RecordId) -> Result<Match> {
    let out = self.read(abi::GET_MATCH, &[Token::Uint(id)]).await?;
    let d = Decoder::new(&out);
    Ok(Match {
      id,
      donor_id: d.uint(0)?,
      receiver_id: d.uint(1)?,
      created_at: d.uint(2)?,
    })
  }
}
