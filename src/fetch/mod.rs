//! Card retrieval for resolved lists.
//!
//! Cards are listed once per list; each card is normalized (and its
//! comments requested) only when the consumer pulls it from the stream.

use crate::client::BoardService;
use crate::error::Result;
use crate::model::{CardRecord, ListExport, ListRecord, RemoteCard};
use tracing::{debug, info};

/// Fetch one list's cards as a lazy export stream.
///
/// When `include_comments` is false no comment requests are made and every
/// card's `comments` is empty.
///
/// # Errors
///
/// Returns an error if the list's cards cannot be retrieved. Comment
/// failures surface later, from the stream itself.
pub fn fetch_list<'a, S>(
    service: &'a S,
    list: &ListRecord,
    include_comments: bool,
) -> Result<ListExport<'a>>
where
    S: BoardService + ?Sized,
{
    let cards = service.list_cards(list)?;
    info!(list = %list.name, cards = cards.len(), "Getting data from cards");

    let stream = cards
        .into_iter()
        .map(move |card| card_record(service, card, include_comments));
    Ok(ListExport::new(list.name.clone(), Box::new(stream)))
}

/// Lazily fetch every list in order; each list is requested when pulled.
pub fn fetch_lists<'a, S>(
    service: &'a S,
    lists: &'a [ListRecord],
    include_comments: bool,
) -> impl Iterator<Item = Result<ListExport<'a>>> + 'a
where
    S: BoardService + ?Sized,
{
    lists
        .iter()
        .map(move |list| fetch_list(service, list, include_comments))
}

fn card_record<S>(service: &S, card: RemoteCard, include_comments: bool) -> Result<CardRecord>
where
    S: BoardService + ?Sized,
{
    let comments = if include_comments {
        extract_comments(service, &card)?
    } else {
        String::new()
    };

    Ok(CardRecord {
        name: card.name,
        description: card.desc,
        comments,
    })
}

/// Render a card's comments as `author: text` lines.
///
/// # Errors
///
/// Returns an error if the comments cannot be retrieved.
pub fn extract_comments<S>(service: &S, card: &RemoteCard) -> Result<String>
where
    S: BoardService + ?Sized,
{
    let comments = service.card_comments(card)?;
    debug!(card = %card.id, count = comments.len(), "Fetched card comments");
    Ok(comments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}
