//! Board and list name resolution.
//!
//! Board resolution order:
//! 1. Case-insensitive exact name match
//! 2. Case-insensitive substring match
//! 3. Ambiguity at either tier => error with candidate list
//!
//! List resolution is exact and case-sensitive against a comma-separated
//! filter, keeping the board's own list order.

use crate::error::{ExportError, MatchTier, Result};
use crate::model::{BoardRecord, ListRecord};
use tracing::{debug, info, warn};

/// Maximum Levenshtein distance for a "did you mean" suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;
const MAX_SUGGESTIONS: usize = 3;

/// How a board name was matched during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Case-insensitive equality.
    Exact,
    /// Query contained in the board name.
    Substring,
}

/// A successfully resolved board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMatch {
    pub board: BoardRecord,
    pub match_type: MatchType,
}

/// Resolve an operator-supplied board name to exactly one board.
///
/// # Errors
///
/// - `AmbiguousBoard` if several boards match at the first tier that has
///   any match.
/// - `BoardNotFound` if no board matches, or the query is blank.
pub fn resolve_board(all_boards: &[BoardRecord], query: &str) -> Result<BoardMatch> {
    if query.trim().is_empty() {
        return Err(ExportError::BoardNotFound {
            query: String::new(),
            similar: Vec::new(),
        });
    }

    let needle = query.to_lowercase();
    debug!(query, candidates = all_boards.len(), "Resolving board");

    let exact: Vec<&BoardRecord> = all_boards
        .iter()
        .filter(|board| board.name.to_lowercase() == needle)
        .collect();
    if let Some(board) = single_match(query, &exact, MatchTier::Exact)? {
        info!(board = %board.name, "Found a board with exactly this name");
        return Ok(BoardMatch {
            board,
            match_type: MatchType::Exact,
        });
    }

    debug!(query, "No exact board match, trying substring match");
    let partial: Vec<&BoardRecord> = all_boards
        .iter()
        .filter(|board| board.name.to_lowercase().contains(&needle))
        .collect();
    if let Some(board) = single_match(query, &partial, MatchTier::Substring)? {
        info!(board = %board.name, "Found a board with a matching name");
        return Ok(BoardMatch {
            board,
            match_type: MatchType::Substring,
        });
    }

    let names: Vec<String> = all_boards.iter().map(|board| board.name.clone()).collect();
    Err(ExportError::BoardNotFound {
        query: query.to_string(),
        similar: find_similar_names(query, &names, MAX_SUGGESTIONS),
    })
}

fn single_match(
    query: &str,
    matches: &[&BoardRecord],
    tier: MatchTier,
) -> Result<Option<BoardRecord>> {
    match matches {
        [] => Ok(None),
        [board] => Ok(Some((*board).clone())),
        _ => Err(ExportError::AmbiguousBoard {
            query: query.to_string(),
            tier,
            matches: matches.iter().map(|board| board.name.clone()).collect(),
        }),
    }
}

/// Lists selected for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSelection {
    /// Matched lists, in board order.
    pub lists: Vec<ListRecord>,
    /// Names requested by the filter; `None` when exporting every list.
    pub requested: Option<Vec<String>>,
    /// Requested names with no matching list.
    pub missing: Vec<String>,
}

impl ListSelection {
    /// Whether fewer lists were found than names were requested.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.requested
            .as_ref()
            .is_some_and(|names| self.lists.len() < names.len())
    }
}

/// Split a comma-separated list filter into names.
///
/// Entries are taken verbatim, so `"Todo, Done"` requests `"Todo"` and
/// `" Done"`. An absent or empty filter means "all lists" and yields `None`.
#[must_use]
pub fn parse_list_filter(filter: Option<&str>) -> Option<Vec<String>> {
    let filter = filter.filter(|f| !f.is_empty())?;
    Some(filter.split(',').map(str::to_string).collect())
}

/// Select the lists to export from a board's lists.
///
/// # Errors
///
/// Returns `NoListsFound` if nothing matches the filter, or the board has
/// no lists at all.
pub fn resolve_lists(
    board_name: &str,
    board_lists: Vec<ListRecord>,
    filter: Option<&str>,
) -> Result<ListSelection> {
    let requested = parse_list_filter(filter);

    let lists: Vec<ListRecord> = match &requested {
        Some(names) => board_lists
            .into_iter()
            .filter(|list| names.iter().any(|name| name == &list.name))
            .collect(),
        None => board_lists,
    };

    if lists.is_empty() {
        return Err(ExportError::NoListsFound {
            board: board_name.to_string(),
            requested: requested.unwrap_or_default(),
        });
    }

    let missing: Vec<String> = requested
        .as_ref()
        .map(|names| {
            names
                .iter()
                .filter(|name| !lists.iter().any(|list| &list.name == *name))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    let exported = lists
        .iter()
        .map(|list| list.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    info!("Exporting lists {exported}");

    let selection = ListSelection {
        lists,
        requested,
        missing,
    };
    if let Some(names) = selection.requested.as_ref().filter(|_| selection.is_partial()) {
        warn!(
            "Found only {} lists out of specified {}",
            selection.lists.len(),
            names.len()
        );
        debug!(missing = ?selection.missing, "Requested lists not on board");
    }

    Ok(selection)
}

/// Calculate Levenshtein distance between two strings.
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

/// Find names close to `searched`, ignoring case.
///
/// Returns up to `max_suggestions` names within a small edit distance,
/// closest first.
#[must_use]
pub fn find_similar_names(searched: &str, existing: &[String], max_suggestions: usize) -> Vec<String> {
    let searched = searched.to_lowercase();
    let mut candidates: Vec<(usize, &str)> = existing
        .iter()
        .map(|name| (levenshtein_distance(&searched, &name.to_lowercase()), name.as_str()))
        .filter(|(dist, _)| *dist <= MAX_SUGGESTION_DISTANCE)
        .collect();

    // Sort by distance, then alphabetically
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    candidates
        .into_iter()
        .take(max_suggestions)
        .map(|(_, name)| name.to_string())
        .collect()
}
