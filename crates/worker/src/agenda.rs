//! One-shot reminder tick: load the quote feed, regenerate, and bucket.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use followup_core::bucketing::{BucketCounts, ReminderBuckets};
use followup_core::generation::ReminderSchedule;
use followup_core::types::Date;
use followup_store::{QuoteBook, RegenerationReport, ReminderService};

/// The dashboard view for one day.
#[derive(Debug, Clone, Serialize)]
pub struct Agenda {
    pub date: Date,
    pub report: RegenerationReport,
    pub counts: BucketCounts,
    pub buckets: ReminderBuckets,
}

/// Read a quote feed file.
pub fn load_quotes(path: &Path) -> anyhow::Result<QuoteBook> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read quote feed {}", path.display()))?;
    let book = QuoteBook::from_json(&json)
        .with_context(|| format!("Failed to parse quote feed {}", path.display()))?;
    tracing::info!(path = %path.display(), quotes = book.len(), "Loaded quote feed");
    Ok(book)
}

/// Regenerate reminders for `date` and return the bucketed agenda.
pub fn build_agenda(
    quotes: QuoteBook,
    schedule: ReminderSchedule,
    date: Date,
) -> anyhow::Result<Agenda> {
    let service = ReminderService::new(quotes, schedule);
    let report = service
        .regenerate(date)
        .context("Reminder regeneration failed")?;
    let buckets = service.buckets(date).context("Bucketing failed")?;
    let counts = buckets.counts();

    tracing::info!(
        %date,
        overdue = counts.overdue,
        due_today = counts.due_today,
        upcoming = counts.upcoming,
        "Agenda ready"
    );

    Ok(Agenda {
        date,
        report,
        counts,
        buckets,
    })
}
