use std::path::PathBuf;

use anyhow::Context;
use followup_core::generation::ReminderSchedule;
use followup_core::types::Date;

/// Worker configuration loaded from environment variables.
///
/// All fields have defaults suitable for local runs.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerConfig {
    /// JSON array of quote records (default: `quotes.json`).
    pub quotes_file: PathBuf,
    /// Date the agenda is computed for. `None` means today (UTC).
    pub agenda_date: Option<Date>,
    pub schedule: ReminderSchedule,
}

impl WorkerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                         | Default       |
    /// |---------------------------------|---------------|
    /// | `QUOTES_FILE`                   | `quotes.json` |
    /// | `AGENDA_DATE`                   | today (UTC)   |
    /// | `REMINDER_INITIAL_DAYS`         | `3`           |
    /// | `REMINDER_FOLLOW_UP_1_DAYS`     | `7`           |
    /// | `REMINDER_FOLLOW_UP_2_DAYS`     | `14`          |
    /// | `REMINDER_FINAL_DAYS`           | unset         |
    /// | `REMINDER_EXPIRY_WARNING_DAYS`  | `5`           |
    /// | `REMINDER_UPCOMING_WINDOW_DAYS` | `3`           |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable day counts fall back to their defaults; an unparseable
    /// `AGENDA_DATE` is an error.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let quotes_file = lookup("QUOTES_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("quotes.json"));

        let agenda_date = lookup("AGENDA_DATE")
            .map(|raw| {
                Date::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .with_context(|| format!("AGENDA_DATE must be YYYY-MM-DD, got '{raw}'"))
            })
            .transpose()?;

        let days = |key: &str, default: u32| -> u32 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        let defaults = ReminderSchedule::default();
        let schedule = ReminderSchedule {
            initial_days: days("REMINDER_INITIAL_DAYS", defaults.initial_days),
            follow_up_1_days: days("REMINDER_FOLLOW_UP_1_DAYS", defaults.follow_up_1_days),
            follow_up_2_days: days("REMINDER_FOLLOW_UP_2_DAYS", defaults.follow_up_2_days),
            final_days: lookup("REMINDER_FINAL_DAYS").and_then(|v| v.trim().parse().ok()),
            expiry_warning_days: days(
                "REMINDER_EXPIRY_WARNING_DAYS",
                defaults.expiry_warning_days,
            ),
            upcoming_window_days: days(
                "REMINDER_UPCOMING_WINDOW_DAYS",
                defaults.upcoming_window_days,
            ),
        };

        Ok(Self {
            quotes_file,
            agenda_date,
            schedule,
        })
    }
}
