//! Export Trello boards to plain text files.
//!
//! A run resolves one board by name, selects some or all of its lists,
//! fetches their cards (optionally with comments) and writes numbered card
//! blocks to one file per list or to a single merged file.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod pipeline;
pub mod util;
pub mod writer;

pub use error::{ExportError, Result, StructuredError};
