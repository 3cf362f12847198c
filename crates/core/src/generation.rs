//! Automatic reminder generation.
//!
//! Pure logic: maps a quote and the current date to the candidate reminders
//! whose offset has been reached. Identical inputs always yield an identical
//! candidate list. Candidates are reconciled against stored reminders by
//! [`crate::reconcile`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::quote::Quote;
use crate::reminder::{automatic_reminder_id, Reminder, ReminderStatus, ReminderType};
use crate::types::{add_days, sub_days, Date};

// ---------------------------------------------------------------------------
// Default offsets (days)
// ---------------------------------------------------------------------------

/// Days after sending before the first check-in.
pub const DEFAULT_INITIAL_DAYS: u32 = 3;
/// Days after sending before the first follow-up call.
pub const DEFAULT_FOLLOW_UP_1_DAYS: u32 = 7;
/// Days after sending before the second follow-up.
pub const DEFAULT_FOLLOW_UP_2_DAYS: u32 = 14;
/// Days before expiry at which the expiration warning fires.
pub const DEFAULT_EXPIRY_WARNING_DAYS: u32 = 5;
/// Width of the "upcoming" bucket, in days after today.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 3;

/// Day offsets driving the follow-up cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSchedule {
    pub initial_days: u32,
    pub follow_up_1_days: u32,
    pub follow_up_2_days: u32,
    /// Offset of the closing call. `None` disables the `final` tier.
    pub final_days: Option<u32>,
    pub expiry_warning_days: u32,
    pub upcoming_window_days: u32,
}

impl Default for ReminderSchedule {
    fn default() -> Self {
        Self {
            initial_days: DEFAULT_INITIAL_DAYS,
            follow_up_1_days: DEFAULT_FOLLOW_UP_1_DAYS,
            follow_up_2_days: DEFAULT_FOLLOW_UP_2_DAYS,
            final_days: None,
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
        }
    }
}

impl ReminderSchedule {
    /// Offset-from-sent tiers, in cadence order.
    fn sent_offsets(&self) -> Vec<(ReminderType, u32)> {
        let mut tiers = vec![
            (ReminderType::Initial, self.initial_days),
            (ReminderType::FollowUp1, self.follow_up_1_days),
            (ReminderType::FollowUp2, self.follow_up_2_days),
        ];
        if let Some(days) = self.final_days {
            tiers.push((ReminderType::Final, days));
        }
        tiers
    }
}

/// Templated action text for an automatic reminder.
pub fn reminder_message(reminder_type: ReminderType, quote: &Quote) -> String {
    let who = &quote.customer_name;
    let id = quote.id;
    match reminder_type {
        ReminderType::Initial => format!(
            "Initial follow-up on quote #{id} for {who}: confirm receipt and check for questions."
        ),
        ReminderType::FollowUp1 => format!(
            "Follow-up call with {who} about quote #{id}: address concerns and gauge interest."
        ),
        ReminderType::FollowUp2 => format!(
            "Second follow-up on quote #{id} for {who}: offer clarifications or revised terms."
        ),
        ReminderType::Final => format!(
            "Final follow-up on quote #{id} for {who}: ask for a decision."
        ),
        ReminderType::ExpirationWarning => format!(
            "Quote #{id} for {who} expires soon: contact the customer before it lapses."
        ),
        ReminderType::Expired => format!(
            "Quote #{id} for {who} has expired: decide whether to renew or close it."
        ),
        ReminderType::Custom => format!("Custom reminder for quote #{id} ({who})."),
    }
}

/// Generate the candidate reminders for `quote` as of `now`.
///
/// - Quotes not in `sent` status yield no candidates.
/// - A `sent` quote without `date_sent` is malformed; the caller should log
///   and skip it.
/// - Tiers whose follow-up level has already been exceeded by the quote's
///   contact count are emitted as `completed`, dated `last_follow_up`.
/// - `expiration_warning` is emitted only while `now < expiration_date`;
///   `expired` only once `now >= expiration_date`.
pub fn generate(
    quote: &Quote,
    now: Date,
    schedule: &ReminderSchedule,
) -> Result<Vec<Reminder>, CoreError> {
    if !quote.is_awaiting_response() {
        return Ok(Vec::new());
    }

    let sent = quote.date_sent.ok_or_else(|| CoreError::MalformedQuote {
        quote_id: quote.id,
        reason: "status is sent but date_sent is missing".to_string(),
    })?;

    let mut candidates = Vec::new();

    for (reminder_type, days) in schedule.sent_offsets() {
        let due = add_days(sent, days);
        if due <= now {
            candidates.push(candidate(quote, reminder_type, due));
        }
    }

    if let Some(expires) = quote.expiration_date {
        let warning = sub_days(expires, schedule.expiry_warning_days);
        if warning <= now && now < expires {
            candidates.push(candidate(quote, ReminderType::ExpirationWarning, warning));
        }
        if expires <= now {
            candidates.push(candidate(quote, ReminderType::Expired, expires));
        }
    }

    Ok(candidates)
}

fn candidate(quote: &Quote, reminder_type: ReminderType, reminder_date: Date) -> Reminder {
    let satisfied = reminder_type
        .follow_up_level()
        .is_some_and(|level| quote.follow_up_count > level);

    let (status, completed_date) = if satisfied {
        (ReminderStatus::Completed, quote.last_follow_up)
    } else {
        (ReminderStatus::Pending, None)
    };

    Reminder {
        id: automatic_reminder_id(quote.id, reminder_type),
        quote_id: quote.id,
        customer_id: quote.customer_id,
        customer_name: quote.customer_name.clone(),
        quote_value: quote.value,
        reminder_type,
        reminder_date,
        status,
        priority: reminder_type.default_priority(),
        message: reminder_message(reminder_type, quote),
        communication_method: reminder_type.default_method(),
        completed_date,
        snooze_until: None,
        notes: None,
    }
}
