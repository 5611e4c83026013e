pub mod repertoire;
pub mod sync;

use crate::cli::output::OutputFormatter;
use crate::cli::{CliError, Commands, OutputFormat};
use crate::config::{Config, CONFIG};
use crate::database::SongbookDatabase;
use crate::storage::LocalFileStore;
use crate::sync::SyncEngine;

/// CLI command execution context
pub struct CliContext {
    pub db: SongbookDatabase,
    pub engine: SyncEngine<LocalFileStore>,
    pub config: &'static Config,
    pub output: OutputFormatter,
}

impl CliContext {
    pub fn new(output_format: OutputFormat, no_color: bool) -> Result<Self, CliError> {
        let config = CONFIG
            .as_ref()
            .map_err(|e| -> CliError { format!("Failed to load configuration: {}", e).into() })?;
        let db = crate::open_database(config)?;

        Ok(Self {
            db,
            engine: SyncEngine::from_config(config),
            config,
            output: OutputFormatter::new(output_format, no_color),
        })
    }
}

/// Trait for CLI command execution
pub trait CliCommand {
    fn execute(&self, ctx: &mut CliContext) -> Result<(), CliError>;
}

impl CliCommand for Commands {
    fn execute(&self, ctx: &mut CliContext) -> Result<(), CliError> {
        match self {
            Commands::Repertoire { subcommand } => subcommand.execute(ctx),
            Commands::Sync { repertoire_id } => sync::run_sync(ctx, *repertoire_id),
            Commands::Undo { repertoire_id } => sync::run_undo(ctx, *repertoire_id),
            Commands::History { repertoire_id } => sync::show_history(ctx, *repertoire_id),
        }
    }
}

/// Execute a CLI command with proper error handling
pub fn execute_command(
    command: &impl CliCommand,
    output_format: OutputFormat,
    no_color: bool,
) -> Result<(), CliError> {
    let mut ctx = CliContext::new(output_format, no_color)?;
    command.execute(&mut ctx)
}
