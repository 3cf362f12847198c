//! Keyed in-memory reminder storage.
//!
//! Reminders are keyed by id. Automatic reminder ids are derived from
//! `(quote_id, reminder_type)`, so the map also enforces one reminder per
//! merge key. Reminders are never removed; cancellation is a status.
//!
//! The store itself is not synchronised. [`crate::ReminderService`] wraps it
//! in a mutex so that each guard check and write happens under one lock.

use std::collections::BTreeMap;

use followup_core::lifecycle;
use followup_core::reminder::{Reminder, ReminderFilter};
use followup_core::types::{Date, ReminderId};
use followup_core::CoreError;

#[derive(Debug, Clone, Default)]
pub struct ReminderStore {
    reminders: BTreeMap<ReminderId, Reminder>,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate a store from previously saved reminders.
    ///
    /// Later entries win when ids repeat.
    pub fn from_reminders(reminders: impl IntoIterator<Item = Reminder>) -> Self {
        let mut store = Self::new();
        store.replace_all(reminders);
        store
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&Reminder, CoreError> {
        self.reminders
            .get(id)
            .ok_or_else(|| CoreError::reminder_not_found(id))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Reminder, CoreError> {
        self.reminders
            .get_mut(id)
            .ok_or_else(|| CoreError::reminder_not_found(id))
    }

    /// Insert a new reminder. Fails if the id is already taken.
    pub fn insert(&mut self, reminder: Reminder) -> Result<(), CoreError> {
        if self.reminders.contains_key(&reminder.id) {
            return Err(CoreError::Internal(format!(
                "Reminder id {} already exists",
                reminder.id
            )));
        }
        self.reminders.insert(reminder.id.clone(), reminder);
        Ok(())
    }

    /// All reminders, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Reminder> {
        self.reminders.values_mut()
    }

    /// Owned copy of every reminder, in id order.
    pub fn snapshot(&self) -> Vec<Reminder> {
        self.reminders.values().cloned().collect()
    }

    /// Replace the whole contents, e.g. with the output of a merge pass.
    pub fn replace_all(&mut self, reminders: impl IntoIterator<Item = Reminder>) {
        self.reminders = reminders
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();
    }

    /// Return every snoozed reminder whose snooze period has ended to
    /// `pending`. Returns the ids that woke up.
    pub fn wake_due(&mut self, today: Date) -> Vec<ReminderId> {
        self.reminders
            .values_mut()
            .filter_map(|r| lifecycle::wake_if_due(r, today).then(|| r.id.clone()))
            .collect()
    }

    /// Reminders matching `filter`, ordered by reminder date then id.
    pub fn filter(&self, filter: &ReminderFilter) -> Vec<Reminder> {
        let mut matched: Vec<Reminder> = self
            .reminders
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            a.reminder_date
                .cmp(&b.reminder_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        matched
    }
}
