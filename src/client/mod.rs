//! Board service access.
//!
//! The export pipeline only talks to the remote tracker through the
//! [`BoardService`] trait. [`TrelloClient`] is the production
//! implementation; tests substitute in-memory services.

mod trello;

pub use trello::{DEFAULT_BASE_URL, TrelloClient};

use crate::error::Result;
use crate::model::{BoardRecord, CommentEntry, ListRecord, RemoteCard};

/// Read-only view of a remote board service.
///
/// Implementations return records in the order the service reports them;
/// callers rely on that order and never re-sort.
pub trait BoardService {
    /// All boards visible to the authenticated member.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the credentials are rejected, or a
    /// transport error.
    fn list_boards(&self) -> Result<Vec<BoardRecord>>;

    /// Lists on a board, in board order.
    ///
    /// # Errors
    ///
    /// Returns a transport or API error.
    fn list_lists(&self, board: &BoardRecord) -> Result<Vec<ListRecord>>;

    /// Cards on a list, in list order.
    ///
    /// # Errors
    ///
    /// Returns a transport or API error.
    fn list_cards(&self, list: &ListRecord) -> Result<Vec<RemoteCard>>;

    /// Comments on a card, in service order.
    ///
    /// # Errors
    ///
    /// Returns a transport or API error.
    fn card_comments(&self, card: &RemoteCard) -> Result<Vec<CommentEntry>>;
}
