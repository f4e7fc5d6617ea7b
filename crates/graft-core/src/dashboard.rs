//! Registry reader and matcher.
//!
//! A refresh reads every donor, receiver and match index by index. Reading is
//! split from applying: [`fetch`] needs only the registry, and
//! [`Dashboard::apply`] installs whatever snapshot arrives. Two overlapping
//! refreshes therefore race, and whichever snapshot is applied last is what
//! the dashboard shows. The registry stays the source of truth either way.

use std::{fmt::Display, future::Future};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
  Error, Result,
  chain::TxHash,
  compat::is_compatible,
  notice::{Notice, Notices},
  record::{Donor, Match, Receiver, RecordId},
  registry::Registry,
  submit::{Outcome, track},
};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Everything one refresh read from the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
  pub donors:    Vec<Donor>,
  pub receivers: Vec<Receiver>,
  pub matches:   Vec<Match>,
}

/// Read the full registry: a count, then each index in turn, per collection.
///
/// A failing donor or receiver count aborts with [`Error::Fetch`]; a failing
/// match count leaves the matches empty. A failing index is logged and
/// skipped, so `k` bad reads out of `n` yield `n - k` records in index order.
pub async fn fetch<R: Registry>(registry: &R) -> Result<Snapshot> {
  let donor_count = registry.donor_count().await.map_err(fetch_error)?;
  let donors = read_each("donor", donor_count, |i| registry.get_donor(i)).await;

  let receiver_count = registry.receiver_count().await.map_err(fetch_error)?;
  let receivers =
    read_each("receiver", receiver_count, |i| registry.get_receiver(i)).await;

  // Without a match count the donor and receiver views still stand.
  let matches = match registry.match_count().await {
    Ok(count) => read_each("match", count, |i| registry.get_match(i)).await,
    Err(e) => {
      warn!(error = %e, "match count unreadable, showing no matches");
      Vec::new()
    }
  };

  debug!(
    donors = donors.len(),
    receivers = receivers.len(),
    matches = matches.len(),
    "registry fetched"
  );
  Ok(Snapshot {
    donors,
    receivers,
    matches,
  })
}

async fn read_each<T, E, F, Fut>(kind: &'static str, count: u64, mut read: F) -> Vec<T>
where
  F: FnMut(RecordId) -> Fut,
  Fut: Future<Output = Result<T, E>>,
  E: Display,
{
  let mut records = Vec::new();
  for index in 0..count {
    match read(index).await {
      Ok(record) => records.push(record),
      Err(e) => warn!(kind, index, error = %e, "skipping unreadable record"),
    }
  }
  records
}

fn fetch_error(e: impl Display) -> Error { Error::Fetch(e.to_string()) }

// ─── Match view ──────────────────────────────────────────────────────────────

/// A stored match with its two parties resolved by id. A party is `None` when
/// its own record could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchView<'a> {
  pub record:   &'a Match,
  pub donor:    Option<&'a Donor>,
  pub receiver: Option<&'a Receiver>,
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// Display state for the matching screen: the last applied snapshot plus the
/// current donor/receiver selection.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
  snapshot:          Snapshot,
  selected_donor:    Option<RecordId>,
  selected_receiver: Option<RecordId>,
}

impl Dashboard {
  pub fn new() -> Self { Self::default() }

  // ── Loading ───────────────────────────────────────────────────────────

  /// Fetch and apply. On failure the display is emptied and a notice is
  /// raised.
  pub async fn refresh<R, N>(&mut self, registry: &R, notices: &mut N) -> Result<()>
  where
    R: Registry,
    N: Notices,
  {
    match fetch(registry).await {
      Ok(snapshot) => {
        self.apply(snapshot);
        Ok(())
      }
      Err(e) => {
        warn!(error = %e, "refresh failed");
        self.apply(Snapshot::default());
        notices.notify(Notice::error(
          "Error",
          "Failed to load donors and receivers from the contract",
        ));
        Err(e)
      }
    }
  }

  /// Replace the displayed data wholesale. The selection is kept.
  pub fn apply(&mut self, snapshot: Snapshot) { self.snapshot = snapshot; }

  pub fn snapshot(&self) -> &Snapshot { &self.snapshot }

  // ── Views ─────────────────────────────────────────────────────────────

  pub fn donor(&self, id: RecordId) -> Option<&Donor> {
    self.snapshot.donors.iter().find(|d| d.id == id)
  }

  pub fn receiver(&self, id: RecordId) -> Option<&Receiver> {
    self.snapshot.receivers.iter().find(|r| r.id == id)
  }

  /// Donors that can still be matched.
  pub fn available_donors(&self) -> impl Iterator<Item = &Donor> {
    self.snapshot.donors.iter().filter(|d| !d.is_matched)
  }

  /// Receivers still waiting for a match.
  pub fn waiting_receivers(&self) -> impl Iterator<Item = &Receiver> {
    self.snapshot.receivers.iter().filter(|r| !r.is_matched)
  }

  /// Existing matches, straight from the stored match records.
  pub fn matches(&self) -> Vec<MatchView<'_>> {
    self
      .snapshot
      .matches
      .iter()
      .map(|m| MatchView {
        record:   m,
        donor:    self.donor(m.donor_id),
        receiver: self.receiver(m.receiver_id),
      })
      .collect()
  }

  // ── Selection ─────────────────────────────────────────────────────────

  pub fn select_donor(&mut self, id: RecordId) -> Result<()> {
    self.donor(id).ok_or(Error::UnknownDonor(id))?;
    self.selected_donor = Some(id);
    Ok(())
  }

  pub fn select_receiver(&mut self, id: RecordId) -> Result<()> {
    self.receiver(id).ok_or(Error::UnknownReceiver(id))?;
    self.selected_receiver = Some(id);
    Ok(())
  }

  pub fn clear_selection(&mut self) {
    self.selected_donor = None;
    self.selected_receiver = None;
  }

  pub fn selected_donor(&self) -> Option<&Donor> {
    self.selected_donor.and_then(|id| self.donor(id))
  }

  pub fn selected_receiver(&self) -> Option<&Receiver> {
    self.selected_receiver.and_then(|id| self.receiver(id))
  }

  /// `None` until both sides are selected; then whether the pair passes
  /// [`is_compatible`].
  pub fn selection_compatible(&self) -> Option<bool> {
    Some(is_compatible(self.selected_donor()?, self.selected_receiver()?))
  }

  // ── Matching ──────────────────────────────────────────────────────────

  /// The selected pair, if both sides are present in the snapshot and
  /// compatible.
  fn matchable_selection(&self) -> Result<(RecordId, RecordId)> {
    let (Some(donor_id), Some(receiver_id)) = (self.selected_donor, self.selected_receiver)
    else {
      return Err(Error::NothingSelected);
    };
    let donor = self.donor(donor_id).ok_or(Error::UnknownDonor(donor_id))?;
    let receiver = self
      .receiver(receiver_id)
      .ok_or(Error::UnknownReceiver(receiver_id))?;
    if !is_compatible(donor, receiver) {
      return Err(Error::Incompatible {
        donor:    donor_id,
        receiver: receiver_id,
      });
    }
    Ok((donor_id, receiver_id))
  }

  /// Submit a match for the current selection.
  ///
  /// Refuses locally, with an error notice, unless both sides are selected
  /// and compatible. After a confirmed write the registry is re-read in full
  /// and the selection is cleared.
  pub async fn create_match<R, N>(&mut self, registry: &R, notices: &mut N) -> Result<TxHash>
  where
    R: Registry,
    N: Notices,
  {
    let (donor_id, receiver_id) = match self.matchable_selection() {
      Ok(pair) => pair,
      Err(e) => {
        notices.notify(Notice::error("Error", e.to_string()));
        return Err(e);
      }
    };

    let sent = registry.create_match(donor_id, receiver_id).await;
    let tx = track(
      registry,
      notices,
      sent,
      Outcome {
        pending:       |_: &TxHash| {
          "Your matching request is being processed on the blockchain.".to_owned()
        },
        success_title: "Match Successful",
        success:       "The donor and receiver have been successfully matched.".into(),
        failure_title: "Match Failed",
        fallback:      "There was an error creating the match.".into(),
      },
    )
    .await?;

    // The match itself succeeded; a failed re-read has already raised its
    // own notice.
    let _ = self.refresh(registry, notices).await;
    self.clear_selection();
    Ok(tx)
  }
}
