//! Registration submitter, shared by the donor and receiver forms.
//!
//! Validate → one write → pending notice → confirmation → success or failure
//! notice → clear the form. Failures are reported with the underlying error
//! text and never retried.

use std::future::Future;

use tracing::{error, info};

use crate::{
  Error, Result,
  chain::TxHash,
  form::{DonorForm, ReceiverForm, ValidationErrors},
  notice::{Notice, Notices},
  record::{NewDonor, NewReceiver},
  registry::Registry,
};

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A validated record that knows which registry write carries it.
pub trait Registration: Send + Sync {
  /// "donor" or "receiver", used in notices.
  const PARTY: &'static str;

  fn send<'a, R: Registry>(
    &'a self,
    registry: &'a R,
  ) -> impl Future<Output = Result<TxHash, R::Error>> + Send + 'a;
}

impl Registration for NewDonor {
  const PARTY: &'static str = "donor";

  fn send<'a, R: Registry>(
    &'a self,
    registry: &'a R,
  ) -> impl Future<Output = Result<TxHash, R::Error>> + Send + 'a {
    registry.register_donor(self)
  }
}

impl Registration for NewReceiver {
  const PARTY: &'static str = "receiver";

  fn send<'a, R: Registry>(
    &'a self,
    registry: &'a R,
  ) -> impl Future<Output = Result<TxHash, R::Error>> + Send + 'a {
    registry.register_receiver(self)
  }
}

/// A form that validates into a [`Registration`].
pub trait Form {
  type Record: Registration;

  fn validate(&self) -> Result<Self::Record, ValidationErrors>;
  fn reset(&mut self);
}

impl Form for DonorForm {
  type Record = NewDonor;

  fn validate(&self) -> Result<NewDonor, ValidationErrors> { DonorForm::validate(self) }

  fn reset(&mut self) { DonorForm::reset(self) }
}

impl Form for ReceiverForm {
  type Record = NewReceiver;

  fn validate(&self) -> Result<NewReceiver, ValidationErrors> {
    ReceiverForm::validate(self)
  }

  fn reset(&mut self) { ReceiverForm::reset(self) }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// Validate `form` and, if it passes, register it.
///
/// A validation failure returns [`Error::Validation`] before anything is sent
/// and leaves the form untouched. After a confirmed write the form is reset.
pub async fn submit<F, R, N>(form: &mut F, registry: &R, notices: &mut N) -> Result<TxHash>
where
  F: Form,
  R: Registry,
  N: Notices,
{
  let record = form.validate().map_err(Error::Validation)?;
  let party = <F::Record as Registration>::PARTY;
  info!(party, "submitting registration");

  let sent = record.send(registry).await;
  let tx = track(
    registry,
    notices,
    sent,
    Outcome {
      pending:       |tx: &TxHash| {
        format!(
          "Your {party} registration is being processed on the blockchain. \
           Transaction hash: {tx}"
        )
      },
      success_title: "Registration Successful",
      success:       format!("You have been registered as an organ {party} on the blockchain."),
      failure_title: "Registration Failed",
      fallback:      format!("There was an error registering you as a {party}."),
    },
  )
  .await?;

  form.reset();
  Ok(tx)
}

/// Notice texts for one tracked write.
pub(crate) struct Outcome<P> {
  pub pending:       P,
  pub success_title: &'static str,
  pub success:       String,
  pub failure_title: &'static str,
  /// Shown when the underlying error has no message of its own.
  pub fallback:      String,
}

/// Follow a sent write through to confirmation, emitting notices on the way.
pub(crate) async fn track<R, N, P>(
  registry: &R,
  notices: &mut N,
  sent: Result<TxHash, R::Error>,
  outcome: Outcome<P>,
) -> Result<TxHash>
where
  R: Registry,
  N: Notices,
  P: FnOnce(&TxHash) -> String,
{
  let fail = |notices: &mut N, e: R::Error| {
    error!(error = %e, "{}", outcome.failure_title);
    let mut message = e.to_string();
    if message.is_empty() {
      message = outcome.fallback.clone();
    }
    notices.notify(Notice::error(outcome.failure_title, message.clone()));
    Error::Transaction(message)
  };

  let tx = match sent {
    Ok(tx) => tx,
    Err(e) => return Err(fail(notices, e)),
  };
  notices.notify(Notice::info("Transaction Submitted", (outcome.pending)(&tx)));

  if let Err(e) = registry.confirm(&tx).await {
    return Err(fail(notices, e));
  }
  info!(%tx, "transaction confirmed");
  notices.notify(Notice::info(outcome.success_title, outcome.success.clone()));
  Ok(tx)
}
