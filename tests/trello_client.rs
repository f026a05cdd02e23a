//! Trello client behavior against a mock API.

mod common;

use board_export::ExportError;
use board_export::client::{BoardService, TrelloClient};
use board_export::config::TrelloConfig;
use board_export::model::{BoardRecord, ListRecord, RemoteCard};
use common::cli::{TEST_KEY, TEST_TOKEN};
use common::trello::work_server;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(base_url: &str) -> TrelloConfig {
    TrelloConfig {
        api_key: TEST_KEY.to_string(),
        token: TEST_TOKEN.to_string(),
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
    }
}

fn client(base_url: &str) -> TrelloClient {
    TrelloClient::new(config(base_url)).expect("client")
}

fn card(id: &str) -> RemoteCard {
    RemoteCard {
        id: id.to_string(),
        name: String::new(),
        desc: String::new(),
    }
}

#[tokio::test]
async fn lists_boards_with_credentials() {
    common::init_test_logging();
    let server = work_server().await;
    let url = server.uri();

    let boards = tokio::task::spawn_blocking(move || client(&url).list_boards())
        .await
        .unwrap()
        .expect("boards");

    assert_eq!(
        boards,
        vec![
            BoardRecord::new("b1", "Work"),
            BoardRecord::new("b2", "Workshop"),
            BoardRecord::new("b3", "Home"),
        ]
    );
}

#[tokio::test]
async fn lists_and_cards_keep_service_order() {
    let server = work_server().await;
    let url = server.uri();

    let (lists, cards) = tokio::task::spawn_blocking(move || {
        let client = client(&url);
        let lists = client.list_lists(&BoardRecord::new("b1", "Work"))?;
        let cards = client.list_cards(&lists[0])?;
        Ok::<_, ExportError>((lists, cards))
    })
    .await
    .unwrap()
    .expect("fetch");

    assert_eq!(
        lists,
        vec![
            ListRecord::new("l1", "Todo", "b1"),
            ListRecord::new("l2", "Done", "b1"),
        ]
    );
    let names: Vec<&str> = cards.iter().map(|card| card.name.as_str()).collect();
    assert_eq!(names, vec!["Write docs", "Fix bug"]);
    assert_eq!(cards[0].desc, "Outline first");
}

#[tokio::test]
async fn decodes_comment_actions() {
    let server = work_server().await;
    let url = server.uri();

    let comments = tokio::task::spawn_blocking(move || client(&url).card_comments(&card("c1")))
        .await
        .unwrap()
        .expect("comments");

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].to_string(), "Ann Lee: Looks good");
}

#[tokio::test]
async fn missing_description_defaults_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lists/l9/cards"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": "c9", "name": "Bare"}])),
        )
        .mount(&server)
        .await;
    let url = server.uri();

    let cards = tokio::task::spawn_blocking(move || {
        client(&url).list_cards(&ListRecord::new("l9", "Misc", "b1"))
    })
    .await
    .unwrap()
    .expect("cards");

    assert_eq!(cards[0].desc, "");
}

#[tokio::test]
async fn unauthorized_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .mount(&server)
        .await;
    let url = server.uri();

    let result = tokio::task::spawn_blocking(move || client(&url).list_boards())
        .await
        .unwrap();

    assert!(matches!(result, Err(ExportError::Unauthorized)));
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("  maintenance  "))
        .mount(&server)
        .await;
    let url = server.uri();

    let result = tokio::task::spawn_blocking(move || client(&url).list_boards())
        .await
        .unwrap();

    match result {
        Err(ExportError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("Expected ExportError::Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_an_http_error_without_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let url = server.uri();

    let result = tokio::task::spawn_blocking(move || client(&url).list_boards())
        .await
        .unwrap();

    let err = result.expect_err("decode failure");
    assert!(matches!(err, ExportError::Http(_)));
    assert!(!err.to_string().contains(TEST_TOKEN));
}

#[test]
fn unreachable_server_is_an_http_error() {
    let result = client("http://127.0.0.1:9").list_boards();
    assert!(matches!(result, Err(ExportError::Http(_))));
}
