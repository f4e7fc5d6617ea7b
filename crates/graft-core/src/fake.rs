//! In-memory wallet and registry doubles for component tests.

use std::{
  collections::{BTreeSet, VecDeque},
  sync::{Arc, Mutex},
};

use thiserror::Error;

use crate::{
  chain::{Address, Network, TxHash},
  record::{Donor, Match, NewDonor, NewReceiver, Receiver, RecordId},
  registry::Registry,
  wallet::{Wallet, WalletError},
};

// ─── Registry ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
#[error("{0}")]
pub struct FakeError(pub String);

#[derive(Debug, Default)]
pub struct RegistryState {
  pub donors:           Vec<Donor>,
  pub receivers:        Vec<Receiver>,
  pub matches:          Vec<Match>,
  /// Indices whose `get_donor` read fails.
  pub bad_donors:       BTreeSet<RecordId>,
  pub bad_receivers:    BTreeSet<RecordId>,
  pub fail_counts:      bool,
  /// Only `match_count` fails.
  pub fail_match_count: bool,
  /// Error returned by the next write instead of a hash.
  pub reject_send:      Option<String>,
  /// Error returned by the next confirmation.
  pub revert:           Option<String>,
  /// Every write, in order, e.g. `registerDonor(Ada,36,O+,kidney,...)`.
  pub writes:           Vec<String>,
  pub confirmed:        Vec<TxHash>,
  /// Number of read calls, counts included.
  pub reads:            usize,
}

#[derive(Debug, Clone, Default)]
pub struct FakeRegistry(pub Arc<Mutex<RegistryState>>);

impl FakeRegistry {
  pub fn state(&self) -> std::sync::MutexGuard<'_, RegistryState> { self.0.lock().unwrap() }

  pub fn with_donor(self, blood: &str, organ: &str) -> Self {
    {
      let mut s = self.state();
      let id = s.donors.len() as RecordId;
      s.donors.push(Donor {
        id,
        name: format!("Donor {id}"),
        age: 40,
        blood_type: blood.into(),
        organ_type: organ.into(),
        contact_info: "donor@example.org".into(),
        is_matched: false,
      });
    }
    self
  }

  pub fn with_receiver(self, blood: &str, organ: &str) -> Self {
    {
      let mut s = self.state();
      let id = s.receivers.len() as RecordId;
      s.receivers.push(Receiver {
        id,
        name: format!("Receiver {id}"),
        age: 30,
        blood_type: blood.into(),
        organ_needed: organ.into(),
        urgency_level: 5,
        contact_info: "receiver@example.org".into(),
        is_matched: false,
      });
    }
    self
  }

  fn write(&self, call: String) -> Result<TxHash, FakeError> {
    let mut s = self.state();
    if let Some(message) = s.reject_send.take() {
      return Err(FakeError(message));
    }
    s.writes.push(call);
    Ok(TxHash(format!("0x{:064x}", s.writes.len())))
  }
}

impl Registry for FakeRegistry {
  type Error = FakeError;

  async fn register_donor(&self, d: &NewDonor) -> Result<TxHash, FakeError> {
    self.write(format!(
      "registerDonor({},{},{},{},{})",
      d.name, d.age, d.blood_type, d.organ_type, d.contact_info
    ))
  }

  async fn register_receiver(&self, r: &NewReceiver) -> Result<TxHash, FakeError> {
    self.write(format!(
      "registerReceiver({},{},{},{},{},{},{})",
      r.name,
      r.age,
      r.blood_type,
      r.organ_needed,
      r.urgency_level,
      r.medical_history,
      r.contact_info
    ))
  }

  async fn create_match(
    &self,
    donor_id: RecordId,
    receiver_id: RecordId,
  ) -> Result<TxHash, FakeError> {
    let tx = self.write(format!("createMatch({donor_id},{receiver_id})"))?;
    let mut s = self.state();
    s.donors[donor_id as usize].is_matched = true;
    s.receivers[receiver_id as usize].is_matched = true;
    let id = s.matches.len() as RecordId;
    s.matches.push(Match {
      id,
      donor_id,
      receiver_id,
      created_at: 1_700_000_000 + id,
    });
    Ok(tx)
  }

  async fn confirm(&self, tx: &TxHash) -> Result<(), FakeError> {
    let mut s = self.state();
    if let Some(message) = s.revert.take() {
      return Err(FakeError(message));
    }
    s.confirmed.push(tx.clone());
    Ok(())
  }

  async fn donor_count(&self) -> Result<u64, FakeError> {
    let mut s = self.state();
    s.reads += 1;
    if s.fail_counts {
      return Err(FakeError("execution reverted".into()));
    }
    Ok(s.donors.len() as u64)
  }

  async fn get_donor(&self, id: RecordId) -> Result<Donor, FakeError> {
    let mut s = self.state();
    s.reads += 1;
    if s.bad_donors.contains(&id) {
      return Err(FakeError(format!("could not decode donor {id}")));
    }
    Ok(s.donors[id as usize].clone())
  }

  async fn receiver_count(&self) -> Result<u64, FakeError> {
    let mut s = self.state();
    s.reads += 1;
    Ok(s.receivers.len() as u64)
  }

  async fn get_receiver(&self, id: RecordId) -> Result<Receiver, FakeError> {
    let mut s = self.state();
    s.reads += 1;
    if s.bad_receivers.contains(&id) {
      return Err(FakeError(format!("could not decode receiver {id}")));
    }
    Ok(s.receivers[id as usize].clone())
  }

  async fn match_count(&self) -> Result<u64, FakeError> {
    let mut s = self.state();
    s.reads += 1;
    if s.fail_match_count {
      return Err(FakeError("execution reverted".into()));
    }
    Ok(s.matches.len() as u64)
  }

  async fn get_match(&self, id: RecordId) -> Result<Match, FakeError> {
    let mut s = self.state();
    s.reads += 1;
    Ok(s.matches[id as usize].clone())
  }
}

// ─── Wallet ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct WalletState {
  pub accounts:        Vec<Address>,
  pub chain_id:        u64,
  /// Answers to successive `switch_chain` calls; `Ok` once exhausted.
  pub switch_replies:  VecDeque<Result<(), WalletError>>,
  pub add_reply:       Option<WalletError>,
  /// Method names in call order.
  pub calls:           Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeWallet {
  pub state:    Arc<Mutex<WalletState>>,
  pub registry: FakeRegistry,
}

impl FakeWallet {
  pub fn on_chain(chain_id: u64) -> Self {
    let wallet = Self::default();
    {
      let mut s = wallet.state();
      s.chain_id = chain_id;
      s.accounts = vec![account()];
    }
    wallet
  }

  pub fn state(&self) -> std::sync::MutexGuard<'_, WalletState> { self.state.lock().unwrap() }

  pub fn calls(&self) -> Vec<String> { self.state().calls.clone() }
}

pub fn account() -> Address { Address::new([0x11; 20]) }

pub fn contract() -> Address { Address::new([0xc0; 20]) }

impl Wallet for FakeWallet {
  type Registry = FakeRegistry;

  async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
    let mut s = self.state();
    s.calls.push("eth_requestAccounts".into());
    Ok(s.accounts.clone())
  }

  async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
    let mut s = self.state();
    s.calls.push("eth_accounts".into());
    Ok(s.accounts.clone())
  }

  async fn chain_id(&self) -> Result<u64, WalletError> {
    let mut s = self.state();
    s.calls.push("eth_chainId".into());
    Ok(s.chain_id)
  }

  async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
    let mut s = self.state();
    s.calls.push("wallet_switchEthereumChain".into());
    let reply = s.switch_replies.pop_front().unwrap_or(Ok(()));
    if reply.is_ok() {
      s.chain_id = chain_id;
    }
    reply
  }

  async fn add_chain(&self, _network: &Network) -> Result<(), WalletError> {
    let mut s = self.state();
    s.calls.push("wallet_addEthereumChain".into());
    match s.add_reply.take() {
      Some(e) => Err(e),
      None => Ok(()),
    }
  }

  fn registry(&self, _contract: Address, _account: Address) -> FakeRegistry {
    self.registry.clone()
  }
}
