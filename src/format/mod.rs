//! Plain text rendering of exported cards.
//!
//! Each card becomes one block:
//!
//! ```text
//! <prefix> <n>. <name>
//! <description>
//! ```
//!
//! The numbered first line collapses to just `<name>` when numbering is
//! off. Comments, when present, follow after a `" \n"` separator and a
//! trailing blank line.

use crate::model::CardRecord;

/// Numbering options for card blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Prefix each card with `<prefix> <ordinal>. `.
    pub numbering: bool,
    /// Text written before the ordinal; may be empty.
    pub prefix: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            numbering: true,
            prefix: String::new(),
        }
    }
}

impl FormatOptions {
    #[must_use]
    pub fn new(numbering: bool, prefix: impl Into<String>) -> Self {
        Self {
            numbering,
            prefix: prefix.into(),
        }
    }
}

/// Render one card. `ordinal` is the card's 1-based position in its list.
#[must_use]
pub fn format_card(card: &CardRecord, ordinal: usize, options: &FormatOptions) -> String {
    let mut block = String::new();

    if options.numbering {
        block.push_str(&format!("{} {ordinal}. ", options.prefix));
    }
    block.push_str(&card.name);
    block.push('\n');
    block.push_str(&card.description);
    block.push('\n');

    if !card.comments.is_empty() {
        block.push_str(" \n");
        block.push_str(&card.comments);
        block.push_str("\n\n");
    }

    block
}
