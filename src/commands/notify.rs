//! Notify command implementation
//!
//! Sends a notification directly, bypassing threshold evaluation.

use super::report_dispatch;
use crate::cli::args::{NotifyArgs, OutputFormat};
use crate::cli::output::{print_output, Message};
use crate::config::Config;
use crate::domain::NotificationRequest;
use crate::error::{AppError, Result};
use crate::pushover::{KeyRouter, Pushover};
use crate::services::AlertService;

/// Execute the notify command
pub async fn run_notify(
    args: &NotifyArgs,
    format: OutputFormat,
    config: &Config,
    pushover: Option<Pushover>,
) -> Result<()> {
    let request = request_from_args(args);

    if config.general.dry_run {
        let router = KeyRouter::from_config(&config.pushover);
        let keys = router.select_keys(&request);
        let msg = Message {
            message: format!(
                "DRY RUN: Would send '{}' ({}) to {} key(s)",
                request.title,
                request.level,
                keys.len()
            ),
            success: true,
        };
        print_output(&msg, format)?;
        return Ok(());
    }

    let pushover = pushover.ok_or(AppError::NotConfigured)?;
    let service = AlertService::from_config(config, Some(pushover));

    match service.notify(&request) {
        Some(dispatch) => report_dispatch(dispatch, format).await,
        None => Ok(()),
    }
}

fn request_from_args(args: &NotifyArgs) -> NotificationRequest {
    let mut request = NotificationRequest::new(args.level.into(), &args.title, &args.message);

    if args.announcement {
        request = request.announcement();
    }
    if let Some(sound) = &args.sound {
        request = request.with_sound(sound);
    }
    if let Some(expiry) = args.expiry {
        request = request.with_expiry(expiry);
    }
    if let Some(retry) = args.retry {
        request = request.with_retry(retry);
    }

    request
}
