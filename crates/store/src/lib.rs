//! In-process storage and service layer for the quote follow-up reminder
//! engine.
//!
//! - [`QuoteBook`]: read model of the quote feed, keyed by quote id.
//! - [`ReminderStore`]: keyed reminder storage with merge-by-key semantics.
//! - [`ReminderService`]: the facade the dashboard calls: regenerate,
//!   list, bucket, and the operator actions.

pub mod error;
pub mod quotes;
pub mod reminders;
pub mod service;

pub use error::StoreError;
pub use quotes::QuoteBook;
pub use reminders::ReminderStore;
pub use service::{RegenerationReport, ReminderService};
