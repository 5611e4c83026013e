use clap::Parser;
use log::{debug, LevelFilter};
use songbook::cli::{execute_command, Cli};
use songbook::config::CONFIG;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Must be set before the configuration is first loaded
    if let Some(config_path) = &cli.config {
        std::env::set_var("SONGBOOK_CONFIG", config_path);
    }

    let config = match CONFIG.as_ref() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.log_level());

    if cli.no_color {
        colored::control::set_override(false);
    }

    debug!("Running command with {:?} output", cli.format);
    match execute_command(&cli.command, cli.format.clone(), cli.no_color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_level: &str) {
    let level = log_level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Unknown log level '{}', using info", log_level);
        LevelFilter::Info
    });

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .init();
}
