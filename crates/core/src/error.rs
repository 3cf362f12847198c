use crate::reminder::ReminderStatus;
use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid state transition: cannot {action} reminder {id} while it is {from}")]
    InvalidStateTransition {
        id: String,
        from: ReminderStatus,
        action: &'static str,
    },

    #[error("Malformed quote {quote_id}: {reason}")]
    MalformedQuote { quote_id: DbId, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a missing quote.
    pub fn quote_not_found(id: DbId) -> Self {
        Self::NotFound {
            entity: "quote",
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing reminder.
    pub fn reminder_not_found(id: &str) -> Self {
        Self::NotFound {
            entity: "reminder",
            id: id.to_string(),
        }
    }
}
