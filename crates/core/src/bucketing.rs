//! Display-time classification of pending reminders.
//!
//! Pure logic. Callers must wake expired snoozes (see
//! [`crate::lifecycle::wake_if_due`]) before bucketing so that reminders
//! whose snooze period has ended are classified as pending.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::reminder::{Reminder, ReminderStatus};
use crate::types::{add_days, Date};

/// Where a pending reminder falls relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Overdue,
    DueToday,
    Upcoming,
}

/// Classify a reminder date. `None` means beyond the upcoming window.
pub fn classify(reminder_date: Date, today: Date, upcoming_window_days: u32) -> Option<Bucket> {
    match reminder_date.cmp(&today) {
        Ordering::Less => Some(Bucket::Overdue),
        Ordering::Equal => Some(Bucket::DueToday),
        Ordering::Greater if reminder_date <= add_days(today, upcoming_window_days) => {
            Some(Bucket::Upcoming)
        }
        Ordering::Greater => None,
    }
}

/// Display order within a bucket: highest priority first, then earliest
/// date, then id for a stable result.
pub fn display_order(a: &Reminder, b: &Reminder) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.reminder_date.cmp(&b.reminder_date))
        .then_with(|| a.id.cmp(&b.id))
}

/// Pending reminders partitioned and sorted for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderBuckets {
    pub overdue: Vec<Reminder>,
    pub due_today: Vec<Reminder>,
    pub upcoming: Vec<Reminder>,
}

/// Bucket sizes, as shown on the dashboard badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub overdue: usize,
    pub due_today: usize,
    pub upcoming: usize,
}

impl ReminderBuckets {
    pub fn counts(&self) -> BucketCounts {
        BucketCounts {
            overdue: self.overdue.len(),
            due_today: self.due_today.len(),
            upcoming: self.upcoming.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.due_today.is_empty() && self.upcoming.is_empty()
    }
}

/// Partition the pending reminders among `reminders` into buckets.
///
/// Non-pending reminders and those beyond the upcoming window are skipped.
pub fn bucket_reminders<'a, I>(reminders: I, today: Date, upcoming_window_days: u32) -> ReminderBuckets
where
    I: IntoIterator<Item = &'a Reminder>,
{
    let mut buckets = ReminderBuckets::default();

    for reminder in reminders {
        if reminder.status != ReminderStatus::Pending {
            continue;
        }
        let target = match classify(reminder.reminder_date, today, upcoming_window_days) {
            Some(Bucket::Overdue) => &mut buckets.overdue,
            Some(Bucket::DueToday) => &mut buckets.due_today,
            Some(Bucket::Upcoming) => &mut buckets.upcoming,
            None => continue,
        };
        target.push(reminder.clone());
    }

    buckets.overdue.sort_by(display_order);
    buckets.due_today.sort_by(display_order);
    buckets.upcoming.sort_by(display_order);
    buckets
}
