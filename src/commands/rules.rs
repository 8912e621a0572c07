//! Rules command implementation

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, RuleTable};
use crate::config::Config;
use crate::error::Result;

/// Print the severity table in evaluation order
pub fn run_rules(format: OutputFormat, config: &Config) -> Result<()> {
    let rules = config.thresholds.to_rules();
    print_output(&RuleTable::from(&rules), format)?;
    Ok(())
}
