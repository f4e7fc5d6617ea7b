//! Registry records: donors, receivers and matches.
//!
//! Read-side records mirror what the contract returns. Blood type and organ
//! fields stay the raw strings the registry stored, since the contract does
//! not validate them. Write-side records ([`NewDonor`], [`NewReceiver`]) are
//! only ever produced by form validation and carry the typed enumerations.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Positional index assigned by the registry.
pub type RecordId = u64;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// The eight canonical ABO/Rh blood-type strings.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
pub enum BloodType {
  #[strum(serialize = "A+")]
  APos,
  #[strum(serialize = "A-")]
  ANeg,
  #[strum(serialize = "B+")]
  BPos,
  #[strum(serialize = "B-")]
  BNeg,
  #[strum(serialize = "AB+")]
  AbPos,
  #[strum(serialize = "AB-")]
  AbNeg,
  #[strum(serialize = "O+")]
  OPos,
  #[strum(serialize = "O-")]
  ONeg,
}

impl BloodType {
  /// The string written to (and compared against) the registry.
  pub fn as_str(self) -> &'static str { self.into() }
}

/// Organs the registry knows about. Stored lowercase.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum OrganType {
  Kidney,
  Liver,
  Heart,
  Lung,
  Pancreas,
  Cornea,
}

impl OrganType {
  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── Read side ───────────────────────────────────────────────────────────────

/// A donor as returned by `getDonor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Donor {
  pub id:           RecordId,
  pub name:         String,
  pub age:          u64,
  pub blood_type:   String,
  pub organ_type:   String,
  pub contact_info: String,
  pub is_matched:   bool,
}

/// A receiver as returned by `getReceiver`. The contract does not hand back
/// the medical history, so it is absent here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receiver {
  pub id:            RecordId,
  pub name:          String,
  pub age:           u64,
  pub blood_type:    String,
  pub organ_needed:  String,
  pub urgency_level: u64,
  pub contact_info:  String,
  pub is_matched:    bool,
}

/// An append-only link between one donor and one receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
  pub id:          RecordId,
  pub donor_id:    RecordId,
  pub receiver_id: RecordId,
  /// Block timestamp of the `createMatch` call, in unix seconds.
  pub created_at:  u64,
}

// ─── Write side ──────────────────────────────────────────────────────────────

/// Positional arguments of `registerDonor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonor {
  pub name:         String,
  pub age:          u8,
  pub blood_type:   BloodType,
  pub organ_type:   OrganType,
  pub contact_info: String,
}

/// Positional arguments of `registerReceiver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReceiver {
  pub name:            String,
  pub age:             u8,
  pub blood_type:      BloodType,
  pub organ_needed:    OrganType,
  pub urgency_level:   u8,
  pub medical_history: String,
  pub contact_info:    String,
}
