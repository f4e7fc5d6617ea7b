//! The `Registry` trait, the fixed surface of the external registry contract.
//!
//! Implemented by backends (e.g. `graft-eth`'s `ContractRegistry`). Every
//! handle is bound to one contract and one signing account; reads are plain
//! queries and writes go out signed by that account.

use std::future::Future;

use crate::{
  chain::TxHash,
  record::{Donor, Match, NewDonor, NewReceiver, Receiver, RecordId},
};

/// Abstraction over the registry contract.
///
/// Writes return as soon as the transaction is accepted for inclusion; callers
/// that need the outcome follow up with [`Registry::confirm`].
pub trait Registry: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// `registerDonor(name, age, bloodType, organType, contactInfo)`
  fn register_donor<'a>(
    &'a self,
    donor: &'a NewDonor,
  ) -> impl Future<Output = Result<TxHash, Self::Error>> + Send + 'a;

  /// `registerReceiver(name, age, bloodType, organNeeded, urgencyLevel,
  /// medicalHistory, contactInfo)`
  fn register_receiver<'a>(
    &'a self,
    receiver: &'a NewReceiver,
  ) -> impl Future<Output = Result<TxHash, Self::Error>> + Send + 'a;

  /// `createMatch(donorId, receiverId)`
  fn create_match(
    &self,
    donor_id: RecordId,
    receiver_id: RecordId,
  ) -> impl Future<Output = Result<TxHash, Self::Error>> + Send + '_;

  /// Wait until `tx` is included. Fails if it reverted.
  fn confirm<'a>(
    &'a self,
    tx: &'a TxHash,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn donor_count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn get_donor(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Donor, Self::Error>> + Send + '_;

  fn receiver_count(&self)
  -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn get_receiver(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Receiver, Self::Error>> + Send + '_;

  fn match_count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn get_match(
    &self,
    id: RecordId,
  ) -> impl Future<Output = Result<Match, Self::Error>> + Send + '_;
}
