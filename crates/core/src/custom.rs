//! Operator-authored one-off reminders.
//!
//! Custom reminders bypass generation and reconciliation; they are born
//! `pending` and never regenerated.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::quote::Quote;
use crate::reminder::{
    CommunicationMethod, Reminder, ReminderPriority, ReminderStatus, ReminderType,
};
use crate::types::{Date, DbId, ReminderId};

/// Maximum length of a custom reminder message or its notes.
pub const MAX_MESSAGE_LENGTH: u64 = 2_000;

/// Prefix distinguishing custom reminder ids from automatic ones.
pub const CUSTOM_ID_PREFIX: &str = "custom-";

/// DTO for creating a custom reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateCustomReminder {
    pub quote_id: DbId,
    pub reminder_date: Date,
    pub priority: ReminderPriority,
    #[validate(length(min = 1, max = MAX_MESSAGE_LENGTH))]
    pub message: String,
    pub communication_method: CommunicationMethod,
    #[serde(default)]
    #[validate(length(max = MAX_MESSAGE_LENGTH))]
    pub notes: Option<String>,
}

/// Build a custom reminder for `quote` from validated input.
///
/// `id_suffix` is appended to [`CUSTOM_ID_PREFIX`]; callers supply a unique
/// value (a UUID in the store).
pub fn build_custom_reminder(
    quote: &Quote,
    input: CreateCustomReminder,
    id_suffix: &str,
) -> Result<Reminder, CoreError> {
    if input.quote_id != quote.id {
        return Err(CoreError::Internal(format!(
            "Custom reminder for quote {} built against quote {}",
            input.quote_id, quote.id
        )));
    }
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let message = input.message.trim().to_string();
    if message.is_empty() {
        return Err(CoreError::Validation(
            "Reminder message cannot be blank".to_string(),
        ));
    }

    Ok(Reminder {
        id: custom_reminder_id(id_suffix),
        quote_id: quote.id,
        customer_id: quote.customer_id,
        customer_name: quote.customer_name.clone(),
        quote_value: quote.value,
        reminder_type: ReminderType::Custom,
        reminder_date: input.reminder_date,
        status: ReminderStatus::Pending,
        priority: input.priority,
        message,
        communication_method: input.communication_method,
        completed_date: None,
        snooze_until: None,
        notes: input.notes.filter(|n| !n.trim().is_empty()),
    })
}

pub fn custom_reminder_id(suffix: &str) -> ReminderId {
    format!("{CUSTOM_ID_PREFIX}{suffix}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::quote::QuoteStatus;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn quote() -> Quote {
        Quote {
            id: 9,
            customer_id: 30,
            customer_name: "Initech".to_string(),
            value: 4_200.0,
            status: QuoteStatus::Accepted,
            date_created: d(2025, 1, 2),
            date_sent: Some(d(2025, 1, 3)),
            expiration_date: None,
            follow_up_count: 2,
            last_follow_up: Some(d(2025, 1, 10)),
        }
    }

    fn input(message: &str) -> CreateCustomReminder {
        CreateCustomReminder {
            quote_id: 9,
            reminder_date: d(2025, 2, 1),
            priority: ReminderPriority::Urgent,
            message: message.to_string(),
            communication_method: CommunicationMethod::Both,
            notes: Some("CFO prefers mornings".to_string()),
        }
    }

    #[test]
    fn builds_pending_custom_reminder() {
        let r = build_custom_reminder(&quote(), input("Send revised pricing"), "abc").unwrap();
        assert_eq!(r.id, "custom-abc");
        assert_eq!(r.reminder_type, ReminderType::Custom);
        assert_eq!(r.status, ReminderStatus::Pending);
        assert_eq!(r.priority, ReminderPriority::Urgent);
        assert_eq!(r.customer_name, "Initech");
        assert_eq!(r.quote_value, 4_200.0);
        assert_eq!(r.notes.as_deref(), Some("CFO prefers mornings"));
        assert_eq!(r.key(), None);
    }

    #[test]
    fn any_quote_status_accepts_custom_reminders() {
        // Custom reminders are not tied to the sent-quote cadence.
        assert!(build_custom_reminder(&quote(), input("Thank-you call"), "x").is_ok());
    }

    #[test]
    fn empty_message_is_rejected() {
        assert_matches!(
            build_custom_reminder(&quote(), input(""), "x"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn blank_message_is_rejected() {
        assert_matches!(
            build_custom_reminder(&quote(), input("   "), "x"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn overlong_message_is_rejected() {
        let long = "x".repeat(MAX_MESSAGE_LENGTH as usize + 1);
        assert_matches!(
            build_custom_reminder(&quote(), input(&long), "x"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn length_limit_applies_to_message_and_notes() {
        let at_limit = "x".repeat(MAX_MESSAGE_LENGTH as usize);
        assert!(build_custom_reminder(&quote(), input(&at_limit), "x").is_ok());

        let mut dto = input("call");
        dto.notes = Some("n".repeat(MAX_MESSAGE_LENGTH as usize + 1));
        assert_matches!(
            build_custom_reminder(&quote(), dto, "x"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn mismatched_quote_is_an_internal_error() {
        let mut dto = input("call");
        dto.quote_id = 99;
        assert_matches!(
            build_custom_reminder(&quote(), dto, "x"),
            Err(CoreError::Internal(_))
        );
    }
}
