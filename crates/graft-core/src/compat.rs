//! The donor/receiver compatibility predicate.
//!
//! This is plain string equality on blood type and organ, not a model of real
//! ABO/Rh transplant compatibility (an O- donor is not treated as universal).
//! The registry is the authority on whether a match is accepted; this check
//! only gates what the client is willing to submit.

use crate::record::{Donor, Receiver};

/// `true` iff neither party is matched yet, the blood-type strings are
/// identical, and the donated organ is the one the receiver needs. All
/// comparisons are case-sensitive.
pub fn is_compatible(donor: &Donor, receiver: &Receiver) -> bool {
  !donor.is_matched
    && !receiver.is_matched
    && donor.blood_type == receiver.blood_type
    && donor.organ_type == receiver.organ_needed
}
