use serde_json::json;
use serial_test::serial;
use trello_boards::client::{ClientConfig, TrelloClient};
use trello_boards_core::payload::{BoardPreferences, BoardVoting, CreateBoardPayload};
use trello_boards_core::{BoardService, TrelloApi};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TrelloClient {
    TrelloClient::new(ClientConfig {
        base_url: format!("{}/1/", server.uri()),
        api_key: "test-key".into(),
        api_token: "test-token".into(),
        timeout_secs: 5,
    })
    .expect("client should build")
}

fn board_body(id: &str) -> serde_json::Value {
    json!({ "id": id, "name": "Roadmap", "url": format!("https://trello.com/b/{id}") })
}

#[tokio::test]
async fn test_get_sends_credentials_in_header_not_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/boards/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_body("b1")))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server).get("/boards/b1").await.expect("GET should succeed");
    assert_eq!(body["id"], "b1");

    let requests = server.received_requests().await.expect("recording is on");
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.url.query(), None, "credentials must not be in the URL");
    let auth = req
        .headers
        .get("authorization")
        .expect("authorization header")
        .to_str()
        .unwrap();
    assert_eq!(
        auth,
        "OAuth oauth_consumer_key=\"test-key\", oauth_token=\"test-token\""
    );
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/boards"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "name": "Launch",
            "defaultLists": false,
            "prefs_voting": "members"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_body("new1")))
        .expect(1)
        .mount(&server)
        .await;

    let payload = CreateBoardPayload::new("Launch")
        .unwrap()
        .with_default_lists(false)
        .with_prefs(BoardPreferences::default().with_voting(BoardVoting::Members));

    let service = BoardService::new(client_for(&server));
    let board = service.create_board(&payload).await.expect("create should succeed");
    assert_eq!(board.id, "new1");
}

#[tokio::test]
async fn test_non_success_status_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/boards/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("board not found"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get("/boards/missing")
        .await
        .unwrap_err()
        .to_string();

    assert!(err.contains("404"), "got: {err}");
    assert!(err.contains("board not found"), "got: {err}");
    assert!(err.contains("/boards/missing"), "got: {err}");
    assert!(!err.contains("test-token"), "got: {err}");
}

#[tokio::test]
async fn test_non_json_body_is_an_error_without_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1/boards/b1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get("/boards/b1").await.unwrap_err().to_string();
    assert!(!err.contains("test-token"), "got: {err}");
    assert!(!err.contains("test-key"), "got: {err}");
}

#[tokio::test]
#[serial]
async fn test_new_from_env_requires_token() {
    std::env::set_var("TRELLO_API_KEY", "env-key");
    std::env::remove_var("TRELLO_API_TOKEN");

    let err = TrelloClient::new_from_env()
        .err()
        .expect("missing token must fail")
        .to_string();
    assert!(err.contains("TRELLO_API_TOKEN"), "got: {err}");
}

#[tokio::test]
#[serial]
async fn test_new_from_env_requires_key() {
    std::env::remove_var("TRELLO_API_KEY");
    std::env::set_var("TRELLO_API_TOKEN", "env-token");

    let err = TrelloClient::new_from_env()
        .err()
        .expect("missing key must fail")
        .to_string();
    assert!(err.contains("TRELLO_API_KEY"), "got: {err}");
}

#[tokio::test]
#[serial]
async fn test_new_from_env_reads_base_url() {
    std::env::set_var("TRELLO_API_KEY", "env-key");
    std::env::set_var("TRELLO_API_TOKEN", "env-token");
    std::env::set_var("TRELLO_BASE_URL", "http://localhost:8080/1/");

    let client = TrelloClient::new_from_env().expect("env is complete");
    assert_eq!(client.base_url(), "http://localhost:8080/1");

    std::env::remove_var("TRELLO_BASE_URL");
}
