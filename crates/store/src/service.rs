//! Reminder engine facade consumed by the dashboard layer.
//!
//! [`ReminderService`] owns the quote feed and the reminder store and
//! exposes the operator actions (complete / snooze / cancel / create) and
//! the read paths (list / buckets / counts). All mutations run under the
//! store mutex, so the state-machine guard and the write are atomic.
//!
//! Lock order is always quotes, then reminders.

use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use followup_core::bucketing::{bucket_reminders, BucketCounts, ReminderBuckets};
use followup_core::custom::{build_custom_reminder, CreateCustomReminder};
use followup_core::generation::{generate, ReminderSchedule};
use followup_core::lifecycle;
use followup_core::quote::Quote;
use followup_core::reconcile::reconcile;
use followup_core::reminder::{Reminder, ReminderFilter, ReminderStatus};
use followup_core::types::Date;
use followup_core::CoreError;

use crate::quotes::QuoteBook;
use crate::reminders::ReminderStore;

/// Note attached to automatic reminders retired because their quote closed.
pub const QUOTE_CLOSED_NOTE: &str = "quote closed";

/// Outcome of a [`ReminderService::regenerate`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegenerationReport {
    pub quotes_scanned: usize,
    pub malformed_quotes: usize,
    pub inserted: usize,
    pub superseded: usize,
    pub retired: usize,
}

pub struct ReminderService {
    quotes: RwLock<QuoteBook>,
    reminders: Mutex<ReminderStore>,
    schedule: ReminderSchedule,
}

impl ReminderService {
    /// Create a service with an empty reminder store.
    pub fn new(quotes: QuoteBook, schedule: ReminderSchedule) -> Self {
        Self::with_store(quotes, ReminderStore::new(), schedule)
    }

    /// Create a service over previously stored reminders.
    pub fn with_store(quotes: QuoteBook, store: ReminderStore, schedule: ReminderSchedule) -> Self {
        Self {
            quotes: RwLock::new(quotes),
            reminders: Mutex::new(store),
            schedule,
        }
    }

    pub fn schedule(&self) -> &ReminderSchedule {
        &self.schedule
    }

    // -----------------------------------------------------------------------
    // Quote feed
    // -----------------------------------------------------------------------

    /// Insert or refresh a quote from the sales application.
    pub fn upsert_quote(&self, quote: Quote) -> Result<(), CoreError> {
        let quote_id = quote.id;
        let previous = self.quotes_mut()?.upsert(quote);
        tracing::debug!(quote_id, replaced = previous.is_some(), "Quote upserted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    /// Run the generator over every quote and merge the candidates into the
    /// store.
    ///
    /// Snoozes that have ended by `today` are woken first. Malformed quotes
    /// are logged and skipped. Stored reminders are never overwritten. Pending or snoozed automatic reminders of quotes that
    /// are no longer `sent` are cancelled.
    pub fn regenerate(&self, today: Date) -> Result<RegenerationReport, CoreError> {
        let quotes = self.quotes()?;
        let mut report = RegenerationReport::default();
        let mut candidates = Vec::new();

        for quote in quotes.iter() {
            report.quotes_scanned += 1;
            match generate(quote, today, &self.schedule) {
                Ok(mut generated) => candidates.append(&mut generated),
                Err(e) => {
                    report.malformed_quotes += 1;
                    tracing::warn!(quote_id = quote.id, error = %e, "Skipping malformed quote");
                }
            }
        }

        let mut store = self.store()?;
        wake(&mut store, today);
        let merged = reconcile(&store.snapshot(), &candidates);
        for id in &merged.inserted {
            tracing::debug!(reminder_id = %id, "Reminder generated");
        }
        for id in &merged.superseded {
            tracing::debug!(reminder_id = %id, "Expiration warning superseded by expiry");
        }
        report.inserted = merged.inserted.len();
        report.superseded = merged.superseded.len();
        store.replace_all(merged.reminders);

        report.retired = retire_closed(&mut store, &quotes);

        tracing::info!(
            %today,
            quotes_scanned = report.quotes_scanned,
            malformed_quotes = report.malformed_quotes,
            inserted = report.inserted,
            superseded = report.superseded,
            retired = report.retired,
            total = store.len(),
            "Reminders regenerated"
        );
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Read paths
    // -----------------------------------------------------------------------

    /// Reminders matching `filter`, ordered by date. Snoozes that have ended
    /// by `today` are woken first.
    pub fn list_reminders(
        &self,
        filter: &ReminderFilter,
        today: Date,
    ) -> Result<Vec<Reminder>, CoreError> {
        let mut store = self.store()?;
        wake(&mut store, today);
        Ok(store.filter(filter))
    }

    /// A single reminder as of `today`, woken if its snooze has ended.
    pub fn get(&self, id: &str, today: Date) -> Result<Reminder, CoreError> {
        let mut store = self.store()?;
        let reminder = store.get_mut(id)?;
        wake_one(reminder, today);
        Ok(reminder.clone())
    }

    /// Pending reminders bucketed and sorted for display.
    pub fn buckets(&self, today: Date) -> Result<ReminderBuckets, CoreError> {
        let mut store = self.store()?;
        wake(&mut store, today);
        Ok(bucket_reminders(
            store.iter(),
            today,
            self.schedule.upcoming_window_days,
        ))
    }

    pub fn count_buckets(&self, today: Date) -> Result<BucketCounts, CoreError> {
        Ok(self.buckets(today)?.counts())
    }

    /// Owned copy of the store contents, for the caller to persist.
    pub fn snapshot(&self) -> Result<Vec<Reminder>, CoreError> {
        Ok(self.store()?.snapshot())
    }

    // -----------------------------------------------------------------------
    // Operator actions
    // -----------------------------------------------------------------------

    pub fn complete(&self, id: &str, now: Date) -> Result<Reminder, CoreError> {
        self.mutate(id, "complete", Some(now), |r| lifecycle::complete(r, now))
    }

    pub fn snooze(&self, id: &str, now: Date, days: u32) -> Result<Reminder, CoreError> {
        self.mutate(id, "snooze", Some(now), |r| lifecycle::snooze(r, now, days))
    }

    /// Cancel a pending or snoozed reminder. Both are legal sources, so no
    /// wake date is needed.
    pub fn cancel(&self, id: &str) -> Result<Reminder, CoreError> {
        self.mutate(id, "cancel", None, lifecycle::cancel)
    }

    /// Append an operator note. Allowed in any status.
    pub fn add_note(&self, id: &str, note: &str) -> Result<Reminder, CoreError> {
        let note = note.trim();
        if note.is_empty() {
            return Err(CoreError::Validation("Note cannot be empty".to_string()));
        }
        self.mutate(id, "annotate", None, |r| {
            r.append_note(note);
            Ok(())
        })
    }

    /// Attach a one-off reminder to an existing quote.
    pub fn create_custom(&self, input: CreateCustomReminder) -> Result<Reminder, CoreError> {
        let quotes = self.quotes()?;
        let quote = quotes.find(input.quote_id)?;
        let reminder = build_custom_reminder(quote, input, &uuid::Uuid::new_v4().to_string())?;

        self.store()?.insert(reminder.clone())?;
        tracing::info!(
            reminder_id = %reminder.id,
            quote_id = reminder.quote_id,
            priority = %reminder.priority,
            reminder_date = %reminder.reminder_date,
            "Custom reminder created"
        );
        Ok(reminder)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Apply `op` to the reminder under the store lock, after waking it if
    /// its snooze has ended by `now`. `op` must leave the reminder untouched
    /// when it fails.
    fn mutate<F>(
        &self,
        id: &str,
        action: &'static str,
        now: Option<Date>,
        op: F,
    ) -> Result<Reminder, CoreError>
    where
        F: FnOnce(&mut Reminder) -> Result<(), CoreError>,
    {
        let mut store = self.store()?;
        let reminder = store.get_mut(id)?;
        if let Some(now) = now {
            wake_one(reminder, now);
        }
        let from = reminder.status;
        if let Err(e) = op(&mut *reminder) {
            tracing::warn!(reminder_id = %id, action, error = %e, "Reminder action rejected");
            return Err(e);
        }
        tracing::info!(
            reminder_id = %id,
            action,
            from = %from,
            to = %reminder.status,
            "Reminder updated"
        );
        Ok(reminder.clone())
    }

    fn quotes(&self) -> Result<RwLockReadGuard<'_, QuoteBook>, CoreError> {
        self.quotes
            .read()
            .map_err(|_| CoreError::Internal("quote book lock poisoned".to_string()))
    }

    fn quotes_mut(&self) -> Result<RwLockWriteGuard<'_, QuoteBook>, CoreError> {
        self.quotes
            .write()
            .map_err(|_| CoreError::Internal("quote book lock poisoned".to_string()))
    }

    fn store(&self) -> Result<MutexGuard<'_, ReminderStore>, CoreError> {
        self.reminders
            .lock()
            .map_err(|_| CoreError::Internal("reminder store lock poisoned".to_string()))
    }
}

fn wake(store: &mut ReminderStore, today: Date) {
    for id in store.wake_due(today) {
        tracing::debug!(reminder_id = %id, %today, "Snoozed reminder is due again");
    }
}

fn wake_one(reminder: &mut Reminder, today: Date) {
    if lifecycle::wake_if_due(reminder, today) {
        tracing::debug!(reminder_id = %reminder.id, %today, "Snoozed reminder is due again");
    }
}

/// Cancel live automatic reminders whose quote has left the `sent` state.
fn retire_closed(store: &mut ReminderStore, quotes: &QuoteBook) -> usize {
    let mut retired = 0;
    for reminder in store.iter_mut() {
        if !reminder.reminder_type.is_automatic()
            || !matches!(
                reminder.status,
                ReminderStatus::Pending | ReminderStatus::Snoozed
            )
        {
            continue;
        }
        let Some(quote) = quotes.get(reminder.quote_id) else {
            continue;
        };
        if quote.is_awaiting_response() {
            continue;
        }
        if lifecycle::cancel(reminder).is_ok() {
            reminder.append_note(QUOTE_CLOSED_NOTE);
            retired += 1;
            tracing::debug!(
                reminder_id = %reminder.id,
                quote_id = quote.id,
                quote_status = quote.status.as_str(),
                "Reminder retired"
            );
        }
    }
    retired
}
