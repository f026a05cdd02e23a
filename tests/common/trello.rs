//! Canned Trello responses served by a wiremock server.
//!
//! Boards: "Work" (b1), "Workshop" (b2), "Home" (b3).
//! "Work" has lists "Todo" (l1) and "Done" (l2).

use super::cli::{TEST_KEY, TEST_TOKEN};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub async fn mount_boards(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/members/me/boards"))
        .and(query_param("key", TEST_KEY))
        .and(query_param("token", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "b1", "name": "Work"},
            {"id": "b2", "name": "Workshop"},
            {"id": "b3", "name": "Home"}
        ])))
        .mount(server)
        .await;
}

pub async fn mount_work_board(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/boards/b1/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "l1", "name": "Todo", "idBoard": "b1"},
            {"id": "l2", "name": "Done", "idBoard": "b1"}
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/lists/l1/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "c1", "name": "Write docs", "desc": "Outline first"},
            {"id": "c2", "name": "Fix bug", "desc": ""}
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/lists/l2/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "c3", "name": "Ship it", "desc": "v1"}
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cards/c1/actions"))
        .and(query_param("filter", "commentCard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "a1",
                "type": "commentCard",
                "data": {"text": "Looks good"},
                "memberCreator": {"id": "m1", "fullName": "Ann Lee"}
            }
        ])))
        .mount(server)
        .await;

    for card in ["c2", "c3"] {
        Mock::given(method("GET"))
            .and(path(format!("/cards/{card}/actions")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(server)
            .await;
    }
}

/// Server answering every known endpoint for the "Work" board.
pub async fn work_server() -> MockServer {
    let server = MockServer::start().await;
    mount_boards(&server).await;
    mount_work_board(&server).await;
    server
}
