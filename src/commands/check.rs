//! Check command implementation
//!
//! Evaluates a single reading and sends the resulting notification.

use super::report_dispatch;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::cli::output::{print_output, CheckReport};
use crate::config::Config;
use crate::domain::Reading;
use crate::error::Result;
use crate::pushover::Pushover;
use crate::services::AlertService;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Execute the check command
pub async fn run_check(
    args: &CheckArgs,
    format: OutputFormat,
    config: &Config,
    pushover: Option<Pushover>,
) -> Result<()> {
    let now = SystemTime::now();
    let reading = reading_from_args(args, now);
    let service = AlertService::from_config(config, pushover);

    if !service.can_notify() && !config.general.dry_run {
        log::warn!("Pushover not configured, evaluating only");
    }

    match service.check(&reading, now) {
        Ok(alert) => {
            let report = CheckReport {
                scaled: reading.scaled,
                decision: Some(alert.decision),
                skipped: None,
            };
            print_output(&report, format)?;

            if let Some(dispatch) = alert.dispatch {
                report_dispatch(dispatch, format).await?;
            }
        }
        Err(skip) => {
            log::debug!("no alert for {}: {}", reading, skip);
            let report = CheckReport {
                scaled: reading.scaled,
                decision: None,
                skipped: Some(skip.to_string()),
            };
            print_output(&report, format)?;
        }
    }

    Ok(())
}

fn reading_from_args(args: &CheckArgs, now: SystemTime) -> Reading {
    let age = Duration::from_secs(args.age_mins.saturating_mul(60));
    let captured_at = now.checked_sub(age).unwrap_or(UNIX_EPOCH);

    let reading = Reading::new(args.mgdl, captured_at);
    match args.scaled {
        Some(scaled) => reading.with_scaled(scaled),
        None => reading,
    }
}
