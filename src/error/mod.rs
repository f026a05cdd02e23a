//! Error types and handling for `board_export`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for one-off failures
//! - Provides recovery hints for user-facing errors
//! - Separates the export failure taxonomy (credentials, authorization,
//!   board/list resolution) from incidental I/O and transport faults

mod structured;

pub use structured::{ErrorCode, StructuredError};

use std::fmt;
use thiserror::Error;

/// Matching tier at which a board name was ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Case-insensitive equality.
    Exact,
    /// Case-insensitive containment.
    Substring,
}

impl MatchTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Substring => "substring",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary error type for `board_export` operations.
#[derive(Error, Debug)]
pub enum ExportError {
    // === Export failures ===
    /// No usable `trello` credentials in any config layer.
    #[error("Credentials missing: {reason}")]
    CredentialsMissing { reason: String },

    /// The remote service rejected the API key or token.
    #[error("Invalid API key or token")]
    Unauthorized,

    /// More than one board matched at the same tier.
    #[error("Board name '{query}' is ambiguous ({tier} match): {matches:?}")]
    AmbiguousBoard {
        query: String,
        tier: MatchTier,
        matches: Vec<String>,
    },

    /// Neither an exact nor a substring match was found.
    ///
    /// `similar` holds close board names for the operator hint.
    #[error("No board matches '{query}'")]
    BoardNotFound { query: String, similar: Vec<String> },

    /// The list filter matched no list on the board.
    #[error("No lists with specified names found on board '{board}': {requested:?}")]
    NoListsFound {
        board: String,
        requested: Vec<String>,
    },

    // === Remote errors ===
    /// The remote API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP transport or response decoding failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // === Configuration Errors ===
    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExportError {
    /// Whether this error belongs to the export failure taxonomy.
    ///
    /// These are the failures the pipeline reports with a single summary
    /// line; everything else is an incidental fault.
    #[must_use]
    pub const fn is_export_failure(&self) -> bool {
        matches!(
            self,
            Self::CredentialsMissing { .. }
                | Self::Unauthorized
                | Self::AmbiguousBoard { .. }
                | Self::BoardNotFound { .. }
                | Self::NoListsFound { .. }
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::CredentialsMissing { .. } => Some(
                "Add a 'trello' section with api-key and token to board-export.yaml \
                 or set BOARD_EXPORT_TRELLO_API_KEY and BOARD_EXPORT_TRELLO_TOKEN",
            ),
            Self::Unauthorized => Some("Check the API key and token in your config file"),
            Self::AmbiguousBoard { .. } => Some("Use the full board name"),
            Self::BoardNotFound { .. } => Some("Check the board name spelling"),
            Self::NoListsFound { .. } => {
                Some("List names are case-sensitive and separated by commas")
            }
            _ => None,
        }
    }

    /// Create a credentials error with a reason.
    #[must_use]
    pub fn credentials_missing(reason: impl Into<String>) -> Self {
        Self::CredentialsMissing {
            reason: reason.into(),
        }
    }
}

/// Result type using `ExportError`.
pub type Result<T> = std::result::Result<T, ExportError>;
