//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::domain::SeverityLevel;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Glucose threshold alerting via Pushover
///
/// Evaluate readings against severity thresholds and send escalating
/// notifications.
#[derive(Parser, Debug)]
#[command(name = "bgnotify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "BGNOTIFY_CONFIG")]
    pub config: Option<String>,

    /// Pushover application API token
    #[arg(long, global = true, env = "PUSHOVER_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Public base URL for acknowledgment callbacks
    #[arg(long, global = true, env = "BGNOTIFY_BASE_URL")]
    pub base_url: Option<String>,

    /// Dry run mode - evaluate and build but don't send
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a reading and notify if it crosses a threshold
    Check(CheckArgs),

    /// Send a notification directly
    Notify(NotifyArgs),

    /// Cancel an emergency notification by receipt
    Cancel {
        /// Receipt returned when the notification was sent
        receipt: String,
    },

    /// Show the severity rule table
    Rules,

    /// Show the resolved destination key sets
    Keys,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Raw reading in mg/dL
    #[arg(long)]
    pub mgdl: f64,

    /// Reading in display units (defaults to the mg/dL value)
    #[arg(long)]
    pub scaled: Option<f64>,

    /// Age of the reading in minutes
    #[arg(long, default_value = "0")]
    pub age_mins: u64,
}

/// Arguments for the notify command
#[derive(Parser, Debug)]
pub struct NotifyArgs {
    /// Severity level
    #[arg(short, long, value_enum, default_value = "info")]
    pub level: LevelArg,

    /// Notification title
    #[arg(short, long)]
    pub title: String,

    /// Notification body
    #[arg(short, long)]
    pub message: String,

    /// Send to the announcement keys
    #[arg(long)]
    pub announcement: bool,

    /// Pushover sound name
    #[arg(long)]
    pub sound: Option<String>,

    /// Expiry in minutes
    #[arg(long)]
    pub expiry: Option<u32>,

    /// Retry interval in minutes (0 disables retry)
    #[arg(long)]
    pub retry: Option<u32>,
}

/// Severity level argument
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LevelArg {
    None,
    Lowest,
    Low,
    Info,
    Warn,
    Urgent,
}

impl From<LevelArg> for SeverityLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::None => SeverityLevel::None,
            LevelArg::Lowest => SeverityLevel::Lowest,
            LevelArg::Low => SeverityLevel::Low,
            LevelArg::Info => SeverityLevel::Info,
            LevelArg::Warn => SeverityLevel::Warn,
            LevelArg::Urgent => SeverityLevel::Urgent,
        }
    }
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
