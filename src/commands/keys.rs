//! Keys command implementation

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, KeySets};
use crate::config::Config;
use crate::error::Result;
use crate::pushover::KeyRouter;

/// Print the destination key sets after fallbacks are applied
pub fn run_keys(format: OutputFormat, config: &Config) -> Result<()> {
    let router = KeyRouter::from_config(&config.pushover);

    if router.is_empty() {
        log::warn!("No destination keys configured");
    }

    print_output(&KeySets::from(&router), format)?;
    Ok(())
}
