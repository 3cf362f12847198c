//! Merge freshly generated candidates into the stored reminder set.
//!
//! Stored automatic reminders are authoritative: a candidate is only
//! inserted when no stored reminder shares its `(quote_id, reminder_type)`
//! key, whatever that reminder's status. Custom reminders pass through
//! untouched. The merge is pure; applying it twice to the same inputs
//! yields the same result.

use std::collections::HashSet;

use crate::lifecycle;
use crate::reminder::{Reminder, ReminderStatus, ReminderType};
use crate::types::{DbId, ReminderId};

/// Note attached to a warning cancelled because the quote has expired.
pub const SUPERSEDED_BY_EXPIRY_NOTE: &str = "superseded by expiry";

/// Result of a merge pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// The merged reminder set: stored reminders in their original order,
    /// followed by newly inserted candidates.
    pub reminders: Vec<Reminder>,
    /// Ids of candidates that were newly inserted.
    pub inserted: Vec<ReminderId>,
    /// Ids of expiration warnings cancelled because `expired` was reached.
    pub superseded: Vec<ReminderId>,
}

/// Merge `candidates` into `existing`.
pub fn reconcile(existing: &[Reminder], candidates: &[Reminder]) -> Reconciliation {
    let mut reminders = existing.to_vec();
    let mut known: HashSet<(DbId, ReminderType)> =
        existing.iter().filter_map(Reminder::key).collect();
    let mut inserted = Vec::new();

    for candidate in candidates {
        let Some(key) = candidate.key() else {
            continue;
        };
        if known.insert(key) {
            inserted.push(candidate.id.clone());
            reminders.push(candidate.clone());
        }
    }

    let expired_quotes: HashSet<DbId> = candidates
        .iter()
        .filter(|c| c.reminder_type == ReminderType::Expired)
        .map(|c| c.quote_id)
        .collect();

    let mut superseded = Vec::new();
    for reminder in reminders.iter_mut().filter(|r| {
        r.reminder_type == ReminderType::ExpirationWarning
            && expired_quotes.contains(&r.quote_id)
            && matches!(r.status, ReminderStatus::Pending | ReminderStatus::Snoozed)
    }) {
        if lifecycle::cancel(reminder).is_ok() {
            reminder.append_note(SUPERSEDED_BY_EXPIRY_NOTE);
            superseded.push(reminder.id.clone());
        }
    }

    Reconciliation {
        reminders,
        inserted,
        superseded,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::generation::{generate, ReminderSchedule};
    use crate::quote::{Quote, QuoteStatus};
    use crate::reminder::{CommunicationMethod, ReminderPriority};
    use crate::types::Date;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn quote() -> Quote {
        Quote {
            id: 5,
            customer_id: 20,
            customer_name: "Globex".to_string(),
            value: 8_000.0,
            status: QuoteStatus::Sent,
            date_created: d(2025, 1, 10),
            date_sent: Some(d(2025, 1, 16)),
            expiration_date: Some(d(2025, 2, 15)),
            follow_up_count: 0,
            last_follow_up: None,
        }
    }

    fn index_by_key(reminders: &[Reminder]) -> HashMap<(DbId, ReminderType), &Reminder> {
        reminders
            .iter()
            .filter_map(|r| r.key().map(|k| (k, r)))
            .collect()
    }

    fn candidates(now: Date) -> Vec<Reminder> {
        generate(&quote(), now, &ReminderSchedule::default()).unwrap()
    }

    fn custom() -> Reminder {
        Reminder {
            id: "custom-abc".to_string(),
            quote_id: 5,
            customer_id: 20,
            customer_name: "Globex".to_string(),
            quote_value: 8_000.0,
            reminder_type: ReminderType::Custom,
            reminder_date: d(2025, 1, 20),
            status: ReminderStatus::Pending,
            priority: ReminderPriority::Low,
            message: "send brochure".to_string(),
            communication_method: CommunicationMethod::Email,
            completed_date: None,
            snooze_until: None,
            notes: None,
        }
    }

    #[test]
    fn empty_store_takes_all_candidates() {
        let c = candidates(d(2025, 1, 23));
        let merged = reconcile(&[], &c);
        assert_eq!(merged.reminders, c);
        assert_eq!(merged.inserted, vec!["5-initial", "5-follow_up_1"]);
    }

    #[test]
    fn stored_reminder_wins_over_candidate() {
        let mut stored = candidates(d(2025, 1, 23));
        lifecycle::complete(&mut stored[1], d(2025, 1, 24)).unwrap();

        let merged = reconcile(&stored, &candidates(d(2025, 1, 30)));
        let by_key = index_by_key(&merged.reminders);
        assert_eq!(
            by_key[&(5, ReminderType::FollowUp1)].status,
            ReminderStatus::Completed
        );
        assert_eq!(merged.inserted, vec!["5-follow_up_2"]);
        assert_eq!(merged.reminders.len(), 3);
    }

    #[test]
    fn cancelled_tombstone_blocks_regeneration() {
        let mut stored = candidates(d(2025, 1, 19));
        lifecycle::cancel(&mut stored[0]).unwrap();

        let merged = reconcile(&stored, &candidates(d(2025, 1, 19)));
        assert_eq!(merged.reminders.len(), 1);
        assert_eq!(merged.reminders[0].status, ReminderStatus::Cancelled);
        assert!(merged.inserted.is_empty());
    }

    #[test]
    fn custom_reminders_pass_through() {
        let stored = vec![custom()];
        let merged = reconcile(&stored, &candidates(d(2025, 1, 19)));
        assert_eq!(merged.reminders[0], custom());
        assert_eq!(merged.reminders.len(), 2);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let c = candidates(d(2025, 2, 12));
        let once = reconcile(&[custom()], &c);
        let twice = reconcile(&once.reminders, &c);
        assert_eq!(once.reminders, twice.reminders);
        assert!(twice.inserted.is_empty());
    }

    #[test]
    fn expiry_cancels_pending_warning() {
        let stored = reconcile(&[], &candidates(d(2025, 2, 12))).reminders;
        assert!(stored
            .iter()
            .any(|r| r.reminder_type == ReminderType::ExpirationWarning
                && r.status == ReminderStatus::Pending));

        let merged = reconcile(&stored, &candidates(d(2025, 2, 15)));
        let by_key = index_by_key(&merged.reminders);
        let warning = by_key[&(5, ReminderType::ExpirationWarning)];
        assert_eq!(warning.status, ReminderStatus::Cancelled);
        assert_eq!(warning.notes.as_deref(), Some(SUPERSEDED_BY_EXPIRY_NOTE));
        assert_eq!(
            by_key[&(5, ReminderType::Expired)].status,
            ReminderStatus::Pending
        );
        assert_eq!(merged.superseded, vec!["5-expiration_warning"]);
    }

    #[test]
    fn completed_warning_survives_expiry() {
        let mut stored = reconcile(&[], &candidates(d(2025, 2, 12))).reminders;
        let warning = stored
            .iter_mut()
            .find(|r| r.reminder_type == ReminderType::ExpirationWarning)
            .unwrap();
        lifecycle::complete(warning, d(2025, 2, 12)).unwrap();

        let merged = reconcile(&stored, &candidates(d(2025, 2, 16)));
        assert!(merged.superseded.is_empty());
    }
}
