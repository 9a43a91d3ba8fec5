//! Client tests against an in-process server.

use std::sync::Arc;

use kvconf_client::{ClientError, ConfigClient, PageQuery};
use kvconf_server::ServerConfig;
use kvconf_store::InMemoryStore;
use kvconf_testkit::prelude::*;

async fn client_for(server: &TestServer) -> ConfigClient {
    ConfigClient::new(&server.url()).unwrap()
}

#[tokio::test]
async fn health_reports_ready_server() {
    let server = TestServer::start().await;
    client_for(&server).await.health().await.unwrap();
    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn health_reports_unreachable_store() {
    let store = Arc::new(FaultyStore::new());
    store.inject(Fault::Unreachable);
    let server = TestServer::start_with_store(store).await;

    let err = client_for(&server).await.health().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 503, .. }));
}

#[tokio::test]
async fn set_get_delete_round_trip() {
    let server = TestServer::start().await;
    let client = client_for(&server).await;

    let created = client.set("app.name", "kvconf").await.unwrap();
    assert_eq!(created.value, "kvconf");

    let fetched = client.get("app.name").await.unwrap();
    assert_eq!(fetched, created);

    let ack = client.delete("app.name").await.unwrap();
    assert_eq!(ack.message, "Deleted");

    let err = client.get("app.name").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "Resource with id 'app.name' not found (HTTP 404)"
    );
}

#[tokio::test]
async fn get_raw_returns_plain_value() {
    let store = Arc::new(InMemoryStore::with_entries([("banner", "{\"not\": \"json\"}")]));
    let server = TestServer::start_with_store(store).await;

    let raw = client_for(&server).await.get_raw("banner").await.unwrap();
    assert_eq!(raw, "{\"not\": \"json\"}");
}

#[tokio::test]
async fn keys_with_reserved_characters() {
    let server = TestServer::start().await;
    let client = client_for(&server).await;

    client.set("path/to key?x", "v").await.unwrap();
    assert_eq!(client.get("path/to key?x").await.unwrap().value, "v");
    client.delete("path/to key?x").await.unwrap();
}

#[tokio::test]
async fn list_single_page() {
    let server = TestServer::start_with_store(seeded_store("db", 5)).await;
    let client = client_for(&server).await;

    let page = client
        .list(&PageQuery::new().with_match("db.*").with_limit(10))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total, 5);
    assert!(page.is_last_page());
}

#[tokio::test]
async fn list_all_follows_cursors() {
    let mut entries = seeded_entries("app", 45);
    entries.extend(seeded_entries("web", 10));
    let server = TestServer::start_with_store(Arc::new(InMemoryStore::with_entries(entries))).await;

    let objects = client_for(&server).await.list_all("app.*", 7).await.unwrap();

    let keys: Vec<_> = objects.into_iter().map(|o| o.key).collect();
    let expected: Vec<_> = seeded_entries("app", 45).into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, expected);
}

#[tokio::test]
async fn invalid_limit_is_reported() {
    let server = TestServer::start().await;
    let err = client_for(&server)
        .await
        .list(&PageQuery::new().with_limit(500))
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
}

#[tokio::test]
async fn empty_value_is_stored_but_reads_as_missing() {
    let server = TestServer::start().await;
    let client = client_for(&server).await;

    let created = client.set("k", "").await.unwrap();
    assert_eq!(created.value, "");
    assert!(client.get("k").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn greeting_uses_configured_title() {
    let server = TestServer::start_with(
        ServerConfig::default().with_title("Staging Config"),
        Arc::new(InMemoryStore::new()),
    )
    .await;

    let body = reqwest::get(format!("{}/api", server.url()))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "Hello, world! I am Staging Config");
}

#[tokio::test]
async fn connection_failure_is_http_error() {
    let server = TestServer::start().await;
    let url = server.url();
    server.shutdown().await.unwrap();

    let err = ConfigClient::new(&url).unwrap().get("k").await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
