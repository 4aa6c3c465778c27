//! Moderation Engine - the pending/approved state machine for signals.
//!
//! A signal enters the system through [`ModerationEngine::submit`], lives in
//! the `pending` collection, and leaves it through exactly one terminal
//! transition:
//!
//! ```text
//!                  submit            approve
//!   client ──────▶ pending ────────▶ approved   (published)
//!                     │
//!                     │ reject
//!                     ▼
//!                 discarded          (no trace retained)
//! ```
//!
//! There is no transition out of `approved`. All moderation lookups address
//! records by stable id, never by list position, so a stale admin page can
//! never approve or reject the wrong record after the list has shifted.
//!
//! Every mutating operation is serialized behind a single in-process lock;
//! the read-modify-write cycle over a collection file is otherwise not
//! atomic and concurrent full-file writers would silently lose updates.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod engine;

pub use domain::errors::ModerationError;
pub use domain::record::{SignalRecord, SignalStatus};
pub use domain::validator::validate_submission;
pub use engine::{mint_signal_id, ModerationEngine};
