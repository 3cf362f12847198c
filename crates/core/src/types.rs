/// Quote and customer identifiers, matching the upstream quote feed.
pub type DbId = i64;

/// Calendar dates. The engine works at day granularity; no time-of-day.
pub type Date = chrono::NaiveDate;

/// Reminder identifiers (`"{quote_id}-{type}"` or `"custom-{uuid}"`).
pub type ReminderId = String;

/// Add a number of whole days to a date, saturating at the calendar maximum.
pub fn add_days(date: Date, days: u32) -> Date {
    date.checked_add_days(chrono::Days::new(u64::from(days)))
        .unwrap_or(Date::MAX)
}

/// Subtract a number of whole days from a date, saturating at the calendar minimum.
pub fn sub_days(date: Date, days: u32) -> Date {
    date.checked_sub_days(chrono::Days::new(u64::from(days)))
        .unwrap_or(Date::MIN)
}
