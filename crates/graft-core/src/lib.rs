//! Core types and components for the graft organ-donor registry client.
//!
//! The registry itself is an external contract. This crate only shapes calls
//! into it and results out of it: forms and their validation, the
//! compatibility predicate, the [`Registry`](registry::Registry) and
//! [`Wallet`](wallet::Wallet) abstractions, and the three components built on
//! top of them (session, submitter, dashboard).
//!
//! This crate has no HTTP dependencies; `graft-eth` provides
//! the JSON-RPC backend.

// Native `async fn` in traits; the returned futures are declared `Send`
// explicitly in the trait signatures.
#![allow(async_fn_in_trait)]

pub mod chain;
pub mod compat;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod notice;
pub mod record;
pub mod registry;
pub mod session;
pub mod submit;
pub mod wallet;

pub use error::{Error, Result};

#[cfg(test)]
mod fake;
