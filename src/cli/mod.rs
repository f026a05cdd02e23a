//! CLI definitions and entry point.

use crate::config::CliOverrides;
use crate::pipeline::ExportRequest;
use clap::Parser;
use std::path::PathBuf;

pub mod commands;

/// Export a Trello board's lists and cards to plain text files
#[derive(Parser, Debug)]
#[command(name = "board-export", author, version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Board name (exact match first, then substring)
    pub board: String,

    /// Comma-separated list names to export (default: all lists)
    #[arg(short, long)]
    pub lists: Option<String>,

    /// Text written before each card number, e.g. "Card" gives "Card 1. "
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// Include card comments
    #[arg(short, long)]
    pub comments: bool,

    /// Write all lists into a single "<board>.txt"
    #[arg(short, long)]
    pub merge: bool,

    /// Do not number cards
    #[arg(short = 'n', long)]
    pub no_numbering: bool,

    /// Directory for the exported files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Config file to use instead of ./board-export.yaml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output the report and errors as JSON
    #[arg(long)]
    pub json: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Config overrides taken from the command line.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_path: self.config.clone(),
        }
    }

    /// Export request described by the command line.
    #[must_use]
    pub fn export_request(&self, show_progress: bool) -> ExportRequest {
        ExportRequest {
            board: self.board.clone(),
            lists: self.lists.clone(),
            prefix: self.prefix.clone(),
            comments: self.comments,
            merge: self.merge,
            numbering: !self.no_numbering,
            output_dir: self.output_dir.clone(),
            show_progress,
        }
    }
}
