pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A lightweight error type for CLI commands
pub type CliError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Songbook - practice library manager
#[derive(Parser)]
#[command(
    name = "songbook",
    about = "Keeps a musician's repertoires in sync with their audio and sheet music folders",
    version,
    long_about = r#"
Songbook - Practice Library Manager

Creates and links songs from a repertoire's audio and sheet folders, copies
charts into managed storage, and can undo the most recent sync exactly.

EXAMPLES:
  songbook repertoire create Jazz --audio-folder ~/Music/Jazz --sheet-folder 'e:\Sheets\Jazz'
  songbook repertoire list
  songbook sync 1                 # Sync repertoire 1 with its folders
  songbook history 1              # Show what the last sync changed
  songbook undo 1                 # Revert the last sync
"#
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, csv)
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Repertoire management commands
    Repertoire {
        #[command(subcommand)]
        subcommand: RepertoireCommands,
    },

    /// Sync a repertoire with its audio and sheet folders
    Sync {
        /// Repertoire ID
        repertoire_id: i64,
    },

    /// Undo the most recent sync of a repertoire
    Undo {
        /// Repertoire ID
        repertoire_id: i64,
    },

    /// Show the changes recorded by the most recent sync
    History {
        /// Repertoire ID
        repertoire_id: i64,
    },
}

#[derive(Subcommand)]
pub enum RepertoireCommands {
    /// Create a new repertoire
    Create {
        /// Repertoire name
        name: String,

        /// Folder scanned for audio files
        #[arg(long)]
        audio_folder: Option<String>,

        /// Folder scanned for charts and sheet music
        #[arg(long)]
        sheet_folder: Option<String>,

        /// Folder holding song lists
        #[arg(long)]
        songlist_folder: Option<String>,
    },

    /// List all repertoires
    List,
}

pub use commands::*;
pub use output::*;
