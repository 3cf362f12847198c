//! Reminder state machine.
//!
//! ```text
//! pending -> completed   (terminal)
//! pending -> snoozed
//! pending -> cancelled   (terminal)
//! snoozed -> cancelled   (terminal)
//! snoozed -> pending     (time-driven, once snooze_until is reached)
//! ```
//!
//! Every operation checks the guard before touching the reminder, so a
//! rejected transition leaves it unchanged.

use crate::error::CoreError;
use crate::reminder::{Reminder, ReminderStatus};
use crate::types::{add_days, Date};

/// Returns the statuses reachable from `from`.
pub fn valid_transitions(from: ReminderStatus) -> &'static [ReminderStatus] {
    match from {
        ReminderStatus::Pending => &[
            ReminderStatus::Completed,
            ReminderStatus::Snoozed,
            ReminderStatus::Cancelled,
        ],
        ReminderStatus::Snoozed => &[ReminderStatus::Pending, ReminderStatus::Cancelled],
        ReminderStatus::Completed | ReminderStatus::Cancelled => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: ReminderStatus, to: ReminderStatus) -> bool {
    valid_transitions(from).contains(&to)
}

fn guard(
    reminder: &Reminder,
    to: ReminderStatus,
    action: &'static str,
) -> Result<(), CoreError> {
    if can_transition(reminder.status, to) {
        Ok(())
    } else {
        Err(CoreError::InvalidStateTransition {
            id: reminder.id.clone(),
            from: reminder.status,
            action,
        })
    }
}

/// Mark a pending reminder as done on `now`.
pub fn complete(reminder: &mut Reminder, now: Date) -> Result<(), CoreError> {
    guard(reminder, ReminderStatus::Completed, "complete")?;
    reminder.status = ReminderStatus::Completed;
    reminder.completed_date = Some(now);
    Ok(())
}

/// Defer a pending reminder by `days` (at least one).
///
/// The reminder becomes due again on `now + days`. Snoozed reminders cannot
/// be snoozed again until they have woken up.
pub fn snooze(reminder: &mut Reminder, now: Date, days: u32) -> Result<(), CoreError> {
    if days == 0 {
        return Err(CoreError::Validation(
            "Snooze duration must be at least one day".to_string(),
        ));
    }
    guard(reminder, ReminderStatus::Snoozed, "snooze")?;
    let until = add_days(now, days);
    reminder.status = ReminderStatus::Snoozed;
    reminder.snooze_until = Some(until);
    reminder.reminder_date = until;
    Ok(())
}

/// Cancel a pending or snoozed reminder. The reminder is kept as a tombstone.
pub fn cancel(reminder: &mut Reminder) -> Result<(), CoreError> {
    guard(reminder, ReminderStatus::Cancelled, "cancel")?;
    reminder.status = ReminderStatus::Cancelled;
    reminder.snooze_until = None;
    Ok(())
}

/// Return a snoozed reminder to `pending` once its snooze period is over.
///
/// Returns `true` if the reminder woke up. Reminders in any other status,
/// or still inside their snooze period, are left alone.
pub fn wake_if_due(reminder: &mut Reminder, now: Date) -> bool {
    if reminder.status != ReminderStatus::Snoozed {
        return false;
    }
    // A snoozed reminder without a wake date is treated as due on its reminder date.
    let until = reminder.snooze_until.unwrap_or(reminder.reminder_date);
    if until > now {
        return false;
    }
    reminder.status = ReminderStatus::Pending;
    reminder.reminder_date = until;
    reminder.snooze_until = None;
    true
}
