//! `followup-worker` -- computes the quote follow-up agenda for one day.
//!
//! Loads the quote feed named by `QUOTES_FILE`, regenerates reminders as of
//! `AGENDA_DATE` (default: today, UTC), and prints the bucketed agenda as
//! JSON on stdout. See [`WorkerConfig::from_env`] for every variable.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use followup_worker::agenda::{build_agenda, load_quotes};
use followup_worker::config::WorkerConfig;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "followup_worker=info,followup_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = WorkerConfig::from_env()?;
    let date = config
        .agenda_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    tracing::info!(
        quotes_file = %config.quotes_file.display(),
        %date,
        "Starting followup-worker"
    );

    let quotes = load_quotes(&config.quotes_file)?;
    let agenda = build_agenda(quotes, config.schedule, date)?;

    let json = serde_json::to_string_pretty(&agenda).context("Failed to serialize agenda")?;
    println!("{json}");
    Ok(())
}
