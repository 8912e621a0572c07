//! Cancel command implementation

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, Message};
use crate::config::Config;
use crate::domain::Receipt;
use crate::error::Result;
use crate::pushover::CancellationClient;

/// Execute the cancel command
pub async fn run_cancel(receipt: &str, format: OutputFormat, config: &Config) -> Result<()> {
    let receipt = Receipt::new(receipt)?;

    if config.general.dry_run {
        let msg = Message {
            message: format!("DRY RUN: Would cancel receipt {}", receipt),
            success: true,
        };
        print_output(&msg, format)?;
        return Ok(());
    }

    let client = CancellationClient::from_config(config)?;
    let status = client.cancel(&receipt).await?;

    let msg = Message {
        message: format!("Cancel requested for receipt {} (HTTP {})", receipt, status.as_u16()),
        success: true,
    };
    print_output(&msg, format)?;

    Ok(())
}
