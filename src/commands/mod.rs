//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod cancel;
pub mod check;
pub mod keys;
pub mod notify;
pub mod rules;

pub use cancel::run_cancel;
pub use check::run_check;
pub use keys::run_keys;
pub use notify::run_notify;
pub use rules::run_rules;

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, DeliveryEntry, DeliveryReport};
use crate::error::Result;
use crate::pushover::DispatchOutcome;

/// Wait for every delivery in `outcome` and print the results
async fn report_dispatch(outcome: DispatchOutcome, format: OutputFormat) -> Result<()> {
    let report = if outcome.is_no_key_defined() {
        DeliveryReport {
            no_key_defined: true,
            deliveries: Vec::new(),
        }
    } else {
        let outcomes = outcome.settle().await;
        DeliveryReport {
            no_key_defined: false,
            deliveries: outcomes.iter().map(DeliveryEntry::from).collect(),
        }
    };

    print_output(&report, format)?;
    Ok(())
}
