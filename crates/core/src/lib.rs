//! Quote follow-up reminder engine: pure domain logic.
//!
//! This crate has no I/O and reads no clock; every operation takes the
//! current date explicitly.
//!
//! - [`generation`] derives time-offset reminders from a sent quote.
//! - [`reconcile`] merges generated candidates into stored reminders.
//! - [`lifecycle`] guards complete / snooze / cancel transitions.
//! - [`bucketing`] classifies pending reminders into overdue / due today /
//!   upcoming.
//! - [`custom`] builds operator-authored reminders.

pub mod bucketing;
pub mod custom;
pub mod error;
pub mod generation;
pub mod lifecycle;
pub mod quote;
pub mod reconcile;
pub mod reminder;
pub mod types;

pub use error::CoreError;
