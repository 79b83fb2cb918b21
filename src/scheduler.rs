//! Long-running scheduler mode
//!
//! Triggers one sweep per day at a configured local wall-clock time and
//! emits a heartbeat log line on a short fixed interval as a liveness
//! signal. A failed sweep is logged and swallowed; the process stays
//! alive for the next trigger.

use crate::config::Config;
use crate::pipeline::run_sweep;
use crate::{ConfigError, Result};
use chrono::{DateTime, Days, Local, NaiveTime};
use std::time::Duration;

/// Runs the scheduler loop; does not return under normal operation
pub async fn run_scheduler(config: Config) -> Result<()> {
    let daily_at = parse_daily_at(&config.schedule.daily_at)?;
    let mut heartbeat = tokio::time::interval(Duration::from_secs(config.schedule.heartbeat_secs));
    // The first tick fires immediately; consume it so the heartbeat starts
    // one interval from now
    heartbeat.tick().await;

    tracing::info!(
        "Scheduler started: daily sweep at {}, heartbeat every {}s",
        config.schedule.daily_at,
        config.schedule.heartbeat_secs
    );

    loop {
        let now = Local::now();
        let next_run = next_occurrence(now, daily_at);
        let wait = (next_run - now).to_std().unwrap_or(Duration::ZERO);
        tracing::info!("Next sweep scheduled for {}", next_run);

        let sweep_timer = tokio::time::sleep(wait);
        tokio::pin!(sweep_timer);

        loop {
            tokio::select! {
                _ = &mut sweep_timer => {
                    match run_sweep(&config).await {
                        Ok(stats) => {
                            tracing::info!(
                                "Scheduled sweep completed: {} records, {} pages, {} warehouse rows",
                                stats.records,
                                stats.pages,
                                stats.sink.inserted_rows()
                            );
                        }
                        Err(e) => {
                            tracing::error!("Scheduled sweep failed: {}", e);
                        }
                    }
                    break;
                }
                _ = heartbeat.tick() => {
                    tracing::info!("Heartbeat: scheduler alive, next sweep at {}", next_run);
                }
            }
        }
    }
}

/// Parses the configured "HH:MM" trigger time
fn parse_daily_at(daily_at: &str) -> std::result::Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(daily_at, "%H:%M").map_err(|_| {
        ConfigError::Validation(format!(
            "daily_at must be a wall-clock time in HH:MM form, got '{}'",
            daily_at
        ))
    })
}

/// Next occurrence of the trigger time, strictly after `now`
fn next_occurrence(now: DateTime<Local>, at: NaiveTime) -> DateTime<Local> {
    let today = now.date_naive().and_time(at);
    let candidate = today
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(|| now + chrono::Duration::days(1));

    if candidate > now {
        candidate
    } else {
        let tomorrow = now
            .date_naive()
            .checked_add_days(Days::new(1))
            .map(|d| d.and_time(at))
            .and_then(|dt| dt.and_local_timezone(Local).earliest());
        tomorrow.unwrap_or(candidate + chrono::Duration::days(1))
    }
}
