//! Export orchestration.
//!
//! A run moves through a fixed sequence of stages and stops at the first
//! error:
//!
//! ```text
//! Init -> CredentialsLoaded -> ClientReady -> BoardResolved
//!      -> ListsResolved -> DataFetched -> Written -> Done
//! ```
//!
//! Cards are fetched lazily while they are written, so `DataFetched` and
//! `Written` are both reached once the last list is on disk; a fetch or
//! write failure is reported at `ListsResolved`.
//!
//! Any error moves the run to `Failed`. Export failures (credentials,
//! authorization, board and list resolution) additionally log a one-line
//! summary naming the stage the run had reached.

use crate::client::{BoardService, TrelloClient};
use crate::config::{CliOverrides, TrelloConfig, load_credentials};
use crate::error::{ExportError, Result};
use crate::fetch::fetch_lists;
use crate::format::FormatOptions;
use crate::matcher::{resolve_board, resolve_lists};
use crate::writer::{WriteOptions, write_exports};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Progress of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    CredentialsLoaded,
    ClientReady,
    BoardResolved,
    ListsResolved,
    DataFetched,
    Written,
    Done,
    Failed,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CredentialsLoaded => "credentials-loaded",
            Self::ClientReady => "client-ready",
            Self::BoardResolved => "board-resolved",
            Self::ListsResolved => "lists-resolved",
            Self::DataFetched => "data-fetched",
            Self::Written => "written",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to export and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Board name query (exact, then substring).
    pub board: String,
    /// Comma-separated list names; `None` exports every list.
    pub lists: Option<String>,
    /// Text before each card ordinal.
    pub prefix: String,
    /// Include card comments.
    pub comments: bool,
    /// Write one `<board>.txt` instead of one file per list.
    pub merge: bool,
    /// Number cards within each list.
    pub numbering: bool,
    /// Directory receiving the files.
    pub output_dir: PathBuf,
    /// Show spinners while writing.
    pub show_progress: bool,
}

impl ExportRequest {
    /// Request with the command-line defaults: every list, numbered cards
    /// with an empty prefix, no comments, one file per list in the current
    /// directory.
    #[must_use]
    pub fn new(board: impl Into<String>) -> Self {
        Self {
            board: board.into(),
            lists: None,
            prefix: String::new(),
            comments: false,
            merge: false,
            numbering: true,
            output_dir: PathBuf::from("."),
            show_progress: false,
        }
    }

    fn write_options(&self, board_name: &str) -> WriteOptions {
        WriteOptions {
            merge: self.merge,
            board_name: board_name.to_string(),
            output_dir: self.output_dir.clone(),
            format: FormatOptions::new(self.numbering, self.prefix.clone()),
            show_progress: self.show_progress,
        }
    }
}

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Name of the resolved board.
    pub board: String,
    /// Names of the exported lists, in board order.
    pub lists: Vec<String>,
    /// Files written.
    pub files: BTreeSet<PathBuf>,
    /// Cards written across all lists.
    pub cards: usize,
}

/// A single export run.
#[derive(Debug)]
pub struct Pipeline {
    credentials: TrelloConfig,
    request: ExportRequest,
    stage: Stage,
    failed_at: Option<Stage>,
}

impl Pipeline {
    #[must_use]
    pub fn new(credentials: TrelloConfig, request: ExportRequest) -> Self {
        let mut pipeline = Self {
            credentials,
            request,
            stage: Stage::Init,
            failed_at: None,
        };
        pipeline.advance(Stage::CredentialsLoaded);
        pipeline
    }

    /// Stage the run has reached.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Last stage reached before the run failed.
    #[must_use]
    pub const fn failed_at(&self) -> Option<Stage> {
        self.failed_at
    }

    #[must_use]
    pub const fn request(&self) -> &ExportRequest {
        &self.request
    }

    /// Run against the Trello API using the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage.
    pub fn run(&mut self) -> Result<ExportReport> {
        let client = match TrelloClient::new(self.credentials.clone()) {
            Ok(client) => client,
            Err(err) => {
                self.fail(&err);
                return Err(err);
            }
        };
        self.run_with_service(&client)
    }

    /// Run against any board service.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage.
    pub fn run_with_service<S>(&mut self, service: &S) -> Result<ExportReport>
    where
        S: BoardService + ?Sized,
    {
        self.advance(Stage::ClientReady);
        let result = self.execute(service);
        match &result {
            Ok(report) => {
                self.advance(Stage::Done);
                info!(
                    board = %report.board,
                    lists = report.lists.len(),
                    cards = report.cards,
                    "Export complete"
                );
            }
            Err(err) => self.fail(err),
        }
        result
    }

    fn execute<S>(&mut self, service: &S) -> Result<ExportReport>
    where
        S: BoardService + ?Sized,
    {
        let boards = service.list_boards()?;
        let board = resolve_board(&boards, &self.request.board)?.board;
        self.advance(Stage::BoardResolved);

        let selection = resolve_lists(
            &board.name,
            service.list_lists(&board)?,
            self.request.lists.as_deref(),
        )?;
        self.advance(Stage::ListsResolved);

        let exports = fetch_lists(service, &selection.lists, self.request.comments);
        let written = write_exports(exports, &self.request.write_options(&board.name))?;
        self.advance(Stage::DataFetched);
        self.advance(Stage::Written);

        Ok(ExportReport {
            board: board.name,
            lists: selection.lists.into_iter().map(|list| list.name).collect(),
            files: written.files,
            cards: written.cards,
        })
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = %self.stage, to = %next, "Export stage");
        self.stage = next;
    }

    fn fail(&mut self, err: &ExportError) {
        let reached = self.stage;
        self.failed_at = Some(reached);
        self.advance(Stage::Failed);
        if err.is_export_failure() {
            error!("{err}");
            error!("Export failed at {reached}. See details above");
        } else {
            debug!(stage = %reached, error = %err, "Export aborted");
        }
    }
}

/// Load credentials from the config layers and run a Trello export.
///
/// # Errors
///
/// Returns `CredentialsMissing` when no usable credentials are configured,
/// otherwise the first error of the run.
pub fn run_export(cli: &CliOverrides, request: ExportRequest) -> Result<ExportReport> {
    let credentials = match load_credentials(cli) {
        Ok(credentials) => credentials,
        Err(err) => {
            if err.is_export_failure() {
                error!("{err}");
                error!("Export failed at {}. See details above", Stage::Init);
            }
            return Err(err);
        }
    };
    Pipeline::new(credentials, request).run()
}
