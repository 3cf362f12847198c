//! Quote records consumed by the reminder engine.
//!
//! Quotes are owned by the surrounding sales application; the engine only
//! reads them. Only `sent` quotes with a `date_sent` drive automatic
//! reminder generation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const QUOTE_STATUS_DRAFT: &str = "draft";
pub const QUOTE_STATUS_SENT: &str = "sent";
pub const QUOTE_STATUS_ACCEPTED: &str = "accepted";
pub const QUOTE_STATUS_REJECTED: &str = "rejected";
pub const QUOTE_STATUS_EXPIRED: &str = "expired";

/// All valid quote statuses.
pub const VALID_QUOTE_STATUSES: &[&str] = &[
    QUOTE_STATUS_DRAFT,
    QUOTE_STATUS_SENT,
    QUOTE_STATUS_ACCEPTED,
    QUOTE_STATUS_REJECTED,
    QUOTE_STATUS_EXPIRED,
];

/// Sales-cycle state of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => QUOTE_STATUS_DRAFT,
            Self::Sent => QUOTE_STATUS_SENT,
            Self::Accepted => QUOTE_STATUS_ACCEPTED,
            Self::Rejected => QUOTE_STATUS_REJECTED,
            Self::Expired => QUOTE_STATUS_EXPIRED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            QUOTE_STATUS_DRAFT => Ok(Self::Draft),
            QUOTE_STATUS_SENT => Ok(Self::Sent),
            QUOTE_STATUS_ACCEPTED => Ok(Self::Accepted),
            QUOTE_STATUS_REJECTED => Ok(Self::Rejected),
            QUOTE_STATUS_EXPIRED => Ok(Self::Expired),
            other => Err(CoreError::Validation(format!(
                "Unknown quote status: '{other}'. Valid statuses: {}",
                VALID_QUOTE_STATUSES.join(", ")
            ))),
        }
    }
}

/// A priced proposal sent to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: DbId,
    pub customer_id: DbId,
    pub customer_name: String,
    pub value: f64,
    pub status: QuoteStatus,
    pub date_created: Date,
    #[serde(default)]
    pub date_sent: Option<Date>,
    #[serde(default)]
    pub expiration_date: Option<Date>,
    /// Number of follow-up contacts that have actually happened.
    #[serde(default)]
    pub follow_up_count: u32,
    #[serde(default)]
    pub last_follow_up: Option<Date>,
}

impl Quote {
    /// Whether this quote is still in the part of the sales cycle that
    /// generates automatic reminders.
    pub fn is_awaiting_response(&self) -> bool {
        self.status == QuoteStatus::Sent
    }
}
