//! Trello REST API client.
//!
//! Authenticates with the API key and token as query parameters and maps
//! HTTP failures onto [`ExportError`]. Transport errors are stripped of
//! their URL, since the URL carries the credentials.

use crate::client::BoardService;
use crate::config::TrelloConfig;
use crate::error::{ExportError, Result};
use crate::model::{BoardRecord, CommentEntry, ListRecord, RemoteCard};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

/// Public Trello API root.
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

const USER_AGENT: &str = concat!("board-export/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY: usize = 200;

/// `commentCard` action as returned by `/cards/{id}/actions`.
#[derive(Debug, Deserialize)]
struct CommentAction {
    data: CommentData,
    #[serde(rename = "memberCreator", default)]
    member_creator: Option<MemberCreator>,
}

#[derive(Debug, Deserialize)]
struct CommentData {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct MemberCreator {
    #[serde(rename = "fullName", default)]
    full_name: String,
}

impl From<CommentAction> for CommentEntry {
    fn from(action: CommentAction) -> Self {
        let author = action
            .member_creator
            .map(|member| member.full_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        Self {
            author,
            text: action.data.text,
        }
    }
}

/// Blocking client for the Trello REST API.
#[derive(Debug)]
pub struct TrelloClient {
    http: Client,
    config: TrelloConfig,
}

impl TrelloClient {
    /// Build a client from resolved credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: TrelloConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(transport_error)?;
        debug!(base_url = %config.base_url, "Created Trello client");
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        debug!(path, "GET");
        let response = self
            .http
            .get(self.url(path))
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("token", self.config.token.as_str()),
            ])
            .query(query)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        trace!(path, status = status.as_u16(), "Response received");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ExportError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExportError::Api {
                status: status.as_u16(),
                message: summarize_body(&body, status),
            });
        }

        response.json::<T>().map_err(transport_error)
    }
}

impl BoardService for TrelloClient {
    fn list_boards(&self) -> Result<Vec<BoardRecord>> {
        self.get("members/me/boards", &[("fields", "id,name")])
    }

    fn list_lists(&self, board: &BoardRecord) -> Result<Vec<ListRecord>> {
        self.get(
            &format!("boards/{}/lists", board.id),
            &[("filter", "all"), ("fields", "id,name,idBoard")],
        )
    }

    fn list_cards(&self, list: &ListRecord) -> Result<Vec<RemoteCard>> {
        self.get(
            &format!("lists/{}/cards", list.id),
            &[("filter", "open"), ("fields", "id,name,desc")],
        )
    }

    fn card_comments(&self, card: &RemoteCard) -> Result<Vec<CommentEntry>> {
        let actions: Vec<CommentAction> = self.get(
            &format!("cards/{}/actions", card.id),
            &[("filter", "commentCard")],
        )?;
        Ok(actions.into_iter().map(CommentEntry::from).collect())
    }
}

fn transport_error(err: reqwest::Error) -> ExportError {
    ExportError::Http(err.without_url())
}

fn summarize_body(body: &str, status: StatusCode) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string();
    }
    if trimmed.chars().count() <= MAX_ERROR_BODY {
        return trimmed.to_string();
    }
    let mut short: String = trimmed.chars().take(MAX_ERROR_BODY).collect();
    short.push_str("...");
    short
}
