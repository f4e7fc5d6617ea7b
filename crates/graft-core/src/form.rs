//! Registration forms and their local validation.
//!
//! Forms hold the fields exactly as typed. Validation collects every field
//! violation at once and either yields the positional record for the contract
//! call or a [`ValidationErrors`] list; nothing is sent in the latter case.

use std::fmt;

use crate::record::{BloodType, NewDonor, NewReceiver, OrganType};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A single violated constraint, keyed by the form field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: &'static str,
}

/// All violations found in one validation pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
  fn check(&mut self, ok: bool, field: &'static str, message: &'static str) {
    if !ok {
      self.0.push(FieldError { field, message });
    }
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// The message for `field`, if it failed.
  pub fn get(&self, field: &str) -> Option<&'static str> {
    self.0.iter().find(|e| e.field == field).map(|e| e.message)
  }

  pub fn iter(&self) -> impl Iterator<Item = &FieldError> { self.0.iter() }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, e) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{}: {}", e.field, e.message)?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

// ─── Field rules ─────────────────────────────────────────────────────────────

const NAME_MIN: usize = 2;
const CONTACT_MIN: usize = 10;
const HISTORY_MIN: usize = 10;

fn min_chars(value: &str, min: usize) -> bool { value.chars().count() >= min }

/// Parse an integer field and check it against an inclusive range.
fn in_range(value: &str, min: u8, max: u8) -> Option<u8> {
  value
    .trim()
    .parse::<u8>()
    .ok()
    .filter(|n| (min..=max).contains(n))
}

// ─── Donor ───────────────────────────────────────────────────────────────────

/// The donor registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonorForm {
  pub name:         String,
  pub age:          String,
  pub blood_type:   String,
  pub organ_type:   String,
  pub contact_info: String,
  /// Explicit consent to donation; submission is refused without it.
  pub consent:      bool,
}

impl DonorForm {
  pub const MIN_AGE: u8 = 18;
  pub const MAX_AGE: u8 = 100;

  pub fn validate(&self) -> Result<NewDonor, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    errors.check(
      min_chars(&self.name, NAME_MIN),
      "name",
      "Name must be at least 2 characters.",
    );
    let age = in_range(&self.age, Self::MIN_AGE, Self::MAX_AGE);
    errors.check(age.is_some(), "age", "Age must be between 18 and 100.");
    let blood_type = self.blood_type.parse::<BloodType>().ok();
    errors.check(
      blood_type.is_some(),
      "blood_type",
      "Please select a blood type.",
    );
    let organ_type = self.organ_type.parse::<OrganType>().ok();
    errors.check(
      organ_type.is_some(),
      "organ_type",
      "Please select an organ type.",
    );
    errors.check(
      min_chars(&self.contact_info, CONTACT_MIN),
      "contact_info",
      "Contact information is required.",
    );
    errors.check(self.consent, "consent", "You must consent to donation.");

    match (age, blood_type, organ_type) {
      (Some(age), Some(blood_type), Some(organ_type)) if errors.is_empty() => {
        Ok(NewDonor {
          name: self.name.clone(),
          age,
          blood_type,
          organ_type,
          contact_info: self.contact_info.clone(),
        })
      }
      _ => Err(errors),
    }
  }

  /// Clear every field back to its default.
  pub fn reset(&mut self) { *self = Self::default(); }
}

// ─── Receiver ────────────────────────────────────────────────────────────────

/// The receiver registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverForm {
  pub name:            String,
  pub age:             String,
  pub blood_type:      String,
  pub organ_needed:    String,
  /// 1 (low) to 10 (critical).
  pub urgency_level:   String,
  pub medical_history: String,
  pub contact_info:    String,
}

impl Default for ReceiverForm {
  fn default() -> Self {
    Self {
      name:            String::new(),
      age:             String::new(),
      blood_type:      String::new(),
      organ_needed:    String::new(),
      urgency_level:   "5".into(),
      medical_history: String::new(),
      contact_info:    String::new(),
    }
  }
}

impl ReceiverForm {
  pub const MIN_AGE: u8 = 0;
  pub const MAX_AGE: u8 = 100;

  pub fn validate(&self) -> Result<NewReceiver, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    errors.check(
      min_chars(&self.name, NAME_MIN),
      "name",
      "Name must be at least 2 characters.",
    );
    let age = in_range(&self.age, Self::MIN_AGE, Self::MAX_AGE);
    errors.check(age.is_some(), "age", "Age must be between 0 and 100.");
    let blood_type = self.blood_type.parse::<BloodType>().ok();
    errors.check(
      blood_type.is_some(),
      "blood_type",
      "Please select a blood type.",
    );
    let organ_needed = self.organ_needed.parse::<OrganType>().ok();
    errors.check(
      organ_needed.is_some(),
      "organ_needed",
      "Please select an organ type.",
    );
    let urgency_level = in_range(&self.urgency_level, 1, 10);
    errors.check(
      urgency_level.is_some(),
      "urgency_level",
      "Urgency level must be between 1 and 10.",
    );
    errors.check(
      min_chars(&self.medical_history, HISTORY_MIN),
      "medical_history",
      "Please provide a brief medical history.",
    );
    errors.check(
      min_chars(&self.contact_info, CONTACT_MIN),
      "contact_info",
      "Contact information is required.",
    );

    match (age, blood_type, organ_needed, urgency_level) {
      (Some(age), Some(blood_type), Some(organ_needed), Some(urgency_level))
        if errors.is_empty() =>
      {
        Ok(NewReceiver {
          name: self.name.clone(),
          age,
          blood_type,
          organ_needed,
          urgency_level,
          medical_history: self.medical_history.clone(),
          contact_info: self.contact_info.clone(),
        })
      }
      _ => Err(errors),
    }
  }

  pub fn reset(&mut self) { *self = Self::default(); }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn donor() -> DonorForm {
    DonorForm {
      name:         "Ada Lovelace".into(),
      age:          "36".into(),
      blood_type:   "O+".into(),
      organ_type:   "kidney".into(),
      contact_info: "ada@example.org".into(),
      consent:      true,
    }
  }

  fn receiver() -> ReceiverForm {
    ReceiverForm {
      name:            "Charles Babbage".into(),
      age:             "0".into(),
      blood_type:      "AB-".into(),
      organ_needed:    "liver".into(),
      urgency_level:   "10".into(),
      medical_history: "Chronic liver failure since 2019".into(),
      contact_info:    "+44 20 7946 0000".into(),
    }
  }

  #[test]
  fn valid_donor_is_packaged() {
    let d = donor().validate().unwrap();
    assert_eq!(d.age, 36);
    assert_eq!(d.blood_type, BloodType::OPos);
    assert_eq!(d.organ_type, OrganType::Kidney);
  }

  #[test]
  fn donor_age_bounds() {
    for (age, ok) in [("17", false), ("18", true), ("100", true), ("101", false)] {
      let form = DonorForm { age: age.into(), ..donor() };
      let result = form.validate();
      assert_eq!(result.is_ok(), ok, "age {age}");
      if !ok {
        assert_eq!(
          result.unwrap_err().get("age"),
          Some("Age must be between 18 and 100.")
        );
      }
    }
  }

  #[test]
  fn donor_age_must_be_numeric() {
    for age in ["", "abc", "-5", "18.5"] {
      let form = DonorForm { age: age.into(), ..donor() };
      assert!(form.validate().unwrap_err().get("age").is_some(), "age {age:?}");
    }
  }

  #[test]
  fn donor_without_consent_is_rejected() {
    let form = DonorForm { consent: false, ..donor() };
    let errs = form.validate().unwrap_err();
    assert_eq!(errs.0.len(), 1);
    assert_eq!(errs.get("consent"), Some("You must consent to donation."));
  }

  #[test]
  fn empty_donor_form_reports_every_field() {
    let errs = DonorForm::default().validate().unwrap_err();
    let fields: Vec<_> = errs.iter().map(|e| e.field).collect();
    assert_eq!(
      fields,
      ["name", "age", "blood_type", "organ_type", "contact_info", "consent"]
    );
  }

  #[test]
  fn unknown_selection_is_rejected() {
    let form = DonorForm {
      blood_type: "C+".into(),
      organ_type: "Kidney".into(),
      ..donor()
    };
    let errs = form.validate().unwrap_err();
    assert_eq!(errs.get("blood_type"), Some("Please select a blood type."));
    assert_eq!(errs.get("organ_type"), Some("Please select an organ type."));
  }

  #[test]
  fn short_name_and_contact_are_rejected() {
    let form = DonorForm {
      name: "A".into(),
      contact_info: "123".into(),
      ..donor()
    };
    let errs = form.validate().unwrap_err();
    assert!(errs.get("name").is_some());
    assert!(errs.get("contact_info").is_some());
  }

  #[test]
  fn receiver_age_allows_newborns() {
    assert_eq!(receiver().validate().unwrap().age, 0);
    let form = ReceiverForm { age: "101".into(), ..receiver() };
    assert_eq!(
      form.validate().unwrap_err().get("age"),
      Some("Age must be between 0 and 100.")
    );
  }

  #[test]
  fn receiver_urgency_bounds() {
    for (urgency, ok) in [("0", false), ("1", true), ("10", true), ("11", false)] {
      let form = ReceiverForm { urgency_level: urgency.into(), ..receiver() };
      assert_eq!(form.validate().is_ok(), ok, "urgency {urgency}");
    }
  }

  #[test]
  fn receiver_requires_history() {
    let form = ReceiverForm { medical_history: "none".into(), ..receiver() };
    assert_eq!(
      form.validate().unwrap_err().get("medical_history"),
      Some("Please provide a brief medical history.")
    );
  }

  #[test]
  fn reset_restores_defaults() {
    let mut form = receiver();
    form.reset();
    assert_eq!(form, ReceiverForm::default());
    assert_eq!(form.urgency_level, "5");
  }
}
