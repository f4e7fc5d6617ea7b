//! Terminal rendering: notices and the registry listing.

use std::fmt::Write as _;

use graft_core::{
  dashboard::Dashboard,
  notice::{Notice, Notices},
};
use tracing::{info, warn};

/// Prints notices as they arrive. Errors go to stderr.
#[derive(Debug, Default)]
pub struct Terminal {
  errors: usize,
}

impl Terminal {
  /// Whether any destructive notice was printed.
  pub fn reported_error(&self) -> bool { self.errors > 0 }
}

impl Notices for Terminal {
  fn notify(&mut self, notice: Notice) {
    if notice.is_error() {
      self.errors += 1;
      warn!(title = %notice.title, "{}", notice.description);
      eprintln!("✗ {}: {}", notice.title, notice.description);
    } else {
      info!(title = %notice.title, "{}", notice.description);
      println!("• {}: {}", notice.title, notice.description);
    }
  }
}

/// The loaded snapshot as pretty-printed JSON, for scripting.
pub fn json(dashboard: &Dashboard) -> serde_json::Result<String> {
  serde_json::to_string_pretty(dashboard.snapshot())
}

pub fn listing(dashboard: &Dashboard) -> String {
  let mut out = String::new();

  out.push_str("Available donors\n");
  let mut any = false;
  for d in dashboard.available_donors() {
    any = true;
    let _ = writeln!(
      out,
      "  #{:<4} {:<24} {:>3}  {:<4} {:<10} {}",
      d.id, d.name, d.age, d.blood_type, d.organ_type, d.contact_info
    );
  }
  if !any {
    out.push_str("  (none)\n");
  }

  out.push_str("\nWaiting receivers\n");
  any = false;
  for r in dashboard.waiting_receivers() {
    any = true;
    let _ = writeln!(
      out,
      "  #{:<4} {:<24} {:>3}  {:<4} {:<10} urgency {:>2}  {}",
      r.id, r.name, r.age, r.blood_type, r.organ_needed, r.urgency_level, r.contact_info
    );
  }
  if !any {
    out.push_str("  (none)\n");
  }

  out.push_str("\nMatches\n");
  let matches = dashboard.matches();
  if matches.is_empty() {
    out.push_str("  (none)\n");
  }
  for m in matches {
    let donor = m.donor.map_or("?", |d| d.name.as_str());
    let receiver = m.receiver.map_or("?", |r| r.name.as_str());
    let organ = m.donor.map_or("?", |d| d.organ_type.as_str());
    let _ = writeln!(
      out,
      "  #{:<4} {donor} (#{}) → {receiver} (#{})  {organ}",
      m.record.id, m.record.donor_id, m.record.receiver_id
    );
  }

  out
}
