//! bgnotify - glucose threshold alerting via Pushover
//!
//! A command-line tool that evaluates glucose readings against severity
//! thresholds and sends escalating push notifications.

use bgnotify::cli::args::{generate_completions, Cli, Commands};
use bgnotify::commands::{run_cancel, run_check, run_keys, run_notify, run_rules};
use bgnotify::config::{Config, ConfigBuilder};
use bgnotify::error::{AppError, ConfigError};
use bgnotify::pushover::Pushover;
use clap::Parser;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    // Run the appropriate command
    let result = run(&cli).await;

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose.then_some(true))
        .with_dry_run(cli.dry_run.then_some(true))
        .with_api_token(cli.api_token.clone())
        .with_base_url(cli.base_url.clone())
        .build();

    Ok(config)
}

async fn run(cli: &Cli) -> Result<(), AppError> {
    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    let config = load_config(cli)?;

    match &cli.command {
        Commands::Check(args) => {
            run_check(args, cli.format, &config, Pushover::setup(&config)).await
        }

        Commands::Notify(args) => {
            run_notify(args, cli.format, &config, Pushover::setup(&config)).await
        }

        Commands::Cancel { receipt } => run_cancel(receipt, cli.format, &config).await,

        Commands::Rules => run_rules(cli.format, &config),

        Commands::Keys => run_keys(cli.format, &config),

        Commands::Completions { .. } => Ok(()),
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::NotConfigured
        | AppError::Config(ConfigError::NoDestinationKeys)
        | AppError::Config(ConfigError::MissingField(_)) => {
            eprintln!();
            eprintln!("Hint: Set PUSHOVER_API_TOKEN (or pushover.api_token in the config file)");
            eprintln!("      and at least one of pushover.user_key or pushover.group_key.");
        }
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Check the --config path or the BGNOTIFY_CONFIG variable.");
        }
        _ => {}
    }
}
