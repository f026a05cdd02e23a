//! Core data types for `board_export`.
//!
//! This module defines the records that flow through an export run:
//! - `BoardRecord` - a remote board
//! - `ListRecord` - a list on a board
//! - `RemoteCard` - a card as the board service returns it
//! - `CardRecord` - a normalized card ready for formatting
//! - `CommentEntry` - a single card comment
//! - `ListExport` - a list name paired with its lazy card stream

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A board on the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub id: String,
    pub name: String,
}

impl BoardRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A list on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "idBoard")]
    pub board_id: String,
}

impl ListRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, board_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            board_id: board_id.into(),
        }
    }
}

/// A card as listed by the board service.
///
/// Carries the identifier needed to request the card's comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
}

/// A comment left on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEntry {
    pub author: String,
    pub text: String,
}

impl fmt::Display for CommentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.author, self.text)
    }
}

/// A normalized card ready for formatting.
///
/// `comments` is empty when comment export was not requested.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardRecord {
    pub name: String,
    pub description: String,
    pub comments: String,
}

impl CardRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            comments: String::new(),
        }
    }

    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }
}

/// Lazy, single-pass stream of cards for one list.
pub type CardStream<'a> = Box<dyn Iterator<Item = Result<CardRecord>> + 'a>;

/// A resolved list paired with its card stream.
///
/// The stream is consumed by value, so it can only be read once.
pub struct ListExport<'a> {
    pub name: String,
    pub cards: CardStream<'a>,
}

impl<'a> ListExport<'a> {
    #[must_use]
    pub fn new(name: impl Into<String>, cards: CardStream<'a>) -> Self {
        Self {
            name: name.into(),
            cards,
        }
    }

    /// Build an export from already-available cards.
    #[must_use]
    pub fn from_cards(name: impl Into<String>, cards: Vec<CardRecord>) -> Self {
        Self::new(name, Box::new(cards.into_iter().map(Ok)))
    }
}

impl fmt::Debug for ListExport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListExport")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
