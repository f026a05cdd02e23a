//! Structured error output.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Retryability flags
//! - Context for debugging

use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: `SCREAMING_SNAKE_CASE` for easy parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Credential Errors (exit code 2) ===
    /// No credentials configured
    CredentialsMissing,
    /// Credentials rejected by the remote service
    Unauthorized,

    // === Resolution Errors (exit code 3) ===
    /// Board name matches several boards
    AmbiguousBoard,
    /// Board name matches nothing
    BoardNotFound,
    /// List filter matches nothing
    NoListsFound,

    // === Remote Errors (exit code 4) ===
    /// Remote API answered with an error status
    ApiError,
    /// HTTP transport failure
    HttpError,

    // === I/O Errors (exit code 5) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,
    /// YAML parsing error
    YamlError,
    /// Configuration error
    ConfigError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CredentialsMissing => "CREDENTIALS_MISSING",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::AmbiguousBoard => "AMBIGUOUS_BOARD",
            Self::BoardNotFound => "BOARD_NOT_FOUND",
            Self::NoListsFound => "NO_LISTS_FOUND",
            Self::ApiError => "API_ERROR",
            Self::HttpError => "HTTP_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is potentially retryable.
    ///
    /// Retryable means the operator might succeed after fixing the input
    /// (a more precise board name) or after a transient network failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousBoard | Self::BoardNotFound | Self::NoListsFound | Self::HttpError
        )
    }

    /// Get the exit code for this error category.
    ///
    /// - 1: Internal/unknown errors
    /// - 2: Credential errors
    /// - 3: Board/list resolution errors
    /// - 4: Remote API errors
    /// - 5: Local I/O and config errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::CredentialsMissing | Self::Unauthorized => 2,
            Self::AmbiguousBoard | Self::BoardNotFound | Self::NoListsFound => 3,
            Self::ApiError | Self::HttpError => 4,
            Self::IoError | Self::JsonError | Self::YamlError | Self::ConfigError => 5,
            Self::InternalError => 1,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the operation can be retried
    pub retryable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from an `ExportError`.
    #[must_use]
    pub fn from_error(err: &ExportError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            retryable: code.is_retryable(),
            context,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            // Red for error
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                // Yellow for hint
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    fn extract_code_and_context(err: &ExportError) -> (ErrorCode, Option<Value>) {
        match err {
            ExportError::CredentialsMissing { reason } => (
                ErrorCode::CredentialsMissing,
                Some(json!({"reason": reason})),
            ),
            ExportError::Unauthorized => (ErrorCode::Unauthorized, None),
            ExportError::AmbiguousBoard {
                query,
                tier,
                matches,
            } => (
                ErrorCode::AmbiguousBoard,
                Some(json!({
                    "query": query,
                    "tier": tier.as_str(),
                    "matches": matches,
                    "match_count": matches.len(),
                })),
            ),
            ExportError::BoardNotFound { query, similar } => (
                ErrorCode::BoardNotFound,
                Some(json!({"query": query, "similar": similar})),
            ),
            ExportError::NoListsFound { board, requested } => (
                ErrorCode::NoListsFound,
                Some(json!({"board": board, "requested": requested})),
            ),
            ExportError::Api { status, .. } => {
                (ErrorCode::ApiError, Some(json!({"status": status})))
            }
            ExportError::Http(e) => (
                ErrorCode::HttpError,
                e.status().map(|status| json!({"status": status.as_u16()})),
            ),
            ExportError::Io(_) => (ErrorCode::IoError, None),
            ExportError::Json(_) => (ErrorCode::JsonError, None),
            ExportError::Yaml(_) => (ErrorCode::YamlError, None),
            ExportError::Config(_) => (ErrorCode::ConfigError, None),
            ExportError::Other(_) => (ErrorCode::InternalError, None),
        }
    }

    /// Generate context-aware hint from error.
    fn generate_hint(err: &ExportError) -> Option<String> {
        match err {
            ExportError::BoardNotFound { similar, .. } if similar.len() == 1 => {
                return Some(format!("Did you mean '{}'?", similar[0]));
            }
            ExportError::BoardNotFound { similar, .. } if !similar.is_empty() => {
                return Some(format!("Did you mean one of: {}?", similar.join(", ")));
            }
            ExportError::AmbiguousBoard { matches, .. } if !matches.is_empty() => {
                return Some(format!(
                    "Use the full board name. Matches: {}",
                    matches.join(", ")
                ));
            }
            _ => {}
        }

        err.suggestion().map(str::to_string)
    }
}
