//! Reminder entity and its enumerations.
//!
//! Each enum maps to the snake_case string used in serialized records and
//! offers `as_str` / `from_str` conversions with a validation error for
//! unknown input.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId, ReminderId};

macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $val)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Return the serialized string representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $val ),+
                }
            }

            /// Parse from a string, returning an error for unknown values.
            pub fn from_str(s: &str) -> Result<Self, CoreError> {
                match s {
                    $( $val => Ok(Self::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Unknown {}: '{other}'. Valid values: {}",
                        $label,
                        [$( $val ),+].join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_string_enum! {
    /// What stage of the follow-up cadence a reminder represents.
    ReminderType, "reminder type" {
        Initial = "initial",
        FollowUp1 = "follow_up_1",
        FollowUp2 = "follow_up_2",
        Final = "final",
        ExpirationWarning = "expiration_warning",
        Expired = "expired",
        /// Authored by an operator; never regenerated.
        Custom = "custom",
    }
}

define_string_enum! {
    /// Reminder lifecycle status.
    ReminderStatus, "reminder status" {
        Pending = "pending",
        Completed = "completed",
        Snoozed = "snoozed",
        Cancelled = "cancelled",
    }
}

define_string_enum! {
    /// Urgency of a reminder. Declaration order is ascending urgency.
    #[derive(PartialOrd, Ord)]
    ReminderPriority, "priority" {
        Low = "low",
        Medium = "medium",
        High = "high",
        Urgent = "urgent",
    }
}

define_string_enum! {
    /// How the operator is expected to reach the customer.
    CommunicationMethod, "communication method" {
        Email = "email",
        Phone = "phone",
        Both = "both",
    }
}

impl ReminderType {
    /// Whether reminders of this type are produced by the generator.
    pub fn is_automatic(&self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Fixed priority for automatic reminders.
    ///
    /// Custom reminders carry an operator-chosen priority; `Medium` is only
    /// the fallback default.
    pub fn default_priority(&self) -> ReminderPriority {
        match self {
            Self::Initial | Self::FollowUp1 => ReminderPriority::Medium,
            Self::FollowUp2 | Self::Final => ReminderPriority::High,
            Self::ExpirationWarning => ReminderPriority::Urgent,
            Self::Expired => ReminderPriority::Low,
            Self::Custom => ReminderPriority::Medium,
        }
    }

    /// Channel used for automatic reminders of this type.
    pub fn default_method(&self) -> CommunicationMethod {
        match self {
            Self::Initial | Self::Expired | Self::Custom => CommunicationMethod::Email,
            Self::FollowUp1 | Self::Final => CommunicationMethod::Phone,
            Self::FollowUp2 | Self::ExpirationWarning => CommunicationMethod::Both,
        }
    }

    /// Number of follow-up contacts made before this tier is due.
    ///
    /// A tier is already satisfied once the quote's contact count exceeds
    /// this level. Expiration-based and custom types have no level.
    pub fn follow_up_level(&self) -> Option<u32> {
        match self {
            Self::Initial => Some(0),
            Self::FollowUp1 => Some(1),
            Self::FollowUp2 => Some(2),
            Self::Final => Some(3),
            Self::ExpirationWarning | Self::Expired | Self::Custom => None,
        }
    }
}

impl ReminderStatus {
    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Deterministic id for an automatic reminder: one per `(quote, type)`.
pub fn automatic_reminder_id(quote_id: DbId, reminder_type: ReminderType) -> ReminderId {
    format!("{quote_id}-{}", reminder_type.as_str())
}

/// A scheduled follow-up action tied to a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub quote_id: DbId,
    pub customer_id: DbId,
    pub customer_name: String,
    pub quote_value: f64,
    pub reminder_type: ReminderType,
    /// Date the reminder becomes active.
    pub reminder_date: Date,
    pub status: ReminderStatus,
    pub priority: ReminderPriority,
    pub message: String,
    pub communication_method: CommunicationMethod,
    #[serde(default)]
    pub completed_date: Option<Date>,
    #[serde(default)]
    pub snooze_until: Option<Date>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Reminder {
    /// Merge key for automatic reminders. `None` for custom ones.
    pub fn key(&self) -> Option<(DbId, ReminderType)> {
        self.reminder_type
            .is_automatic()
            .then_some((self.quote_id, self.reminder_type))
    }

    /// Append a line to the reminder's notes.
    pub fn append_note(&mut self, note: &str) {
        match &mut self.notes {
            Some(existing) if !existing.is_empty() => {
                existing.push('\n');
                existing.push_str(note);
            }
            _ => self.notes = Some(note.to_string()),
        }
    }
}

/// Criteria for listing reminders. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderFilter {
    #[serde(default)]
    pub status: Option<ReminderStatus>,
    #[serde(default)]
    pub priority: Option<ReminderPriority>,
    #[serde(default)]
    pub customer_id: Option<DbId>,
    #[serde(default)]
    pub quote_id: Option<DbId>,
    #[serde(default)]
    pub reminder_type: Option<ReminderType>,
}

impl ReminderFilter {
    pub fn matches(&self, reminder: &Reminder) -> bool {
        self.status.map_or(true, |s| reminder.status == s)
            && self.priority.map_or(true, |p| reminder.priority == p)
            && self.customer_id.map_or(true, |c| reminder.customer_id == c)
            && self.quote_id.map_or(true, |q| reminder.quote_id == q)
            && self.reminder_type.map_or(true, |t| reminder.reminder_type == t)
    }
}
