use reqwest::Method;
use serde_json::{json, Value};
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, header, query_param};

use shared_config::AppConfig;
use shared_database::SupabaseClient;

fn config_for(server: &MockServer, service_key: Option<&str>) -> AppConfig {
    AppConfig {
        supabase_url: format!("{}/", server.uri()),
        supabase_anon_key: "test-anon-key".to_string(),
        supabase_service_key: service_key.map(str::to_string),
        record_store_timeout_secs: 5,
        port: 3000,
    }
}

#[tokio::test]
async fn test_request_sends_api_key_and_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/procedures"))
        .and(query_param("id", "eq.3"))
        .and(header("apikey", "test-anon-key"))
        .and(header("authorization", "Bearer service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "requires_contrast": true}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config_for(&mock_server, Some("service-key"))).unwrap();
    let rows: Vec<Value> = client
        .request(Method::GET, "/rest/v1/procedures?id=eq.3", None)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["requires_contrast"], true);
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_trimmed() {
    let mock_server = MockServer::start().await;
    let client = SupabaseClient::new(&config_for(&mock_server, None)).unwrap();

    assert_eq!(client.get_base_url(), mock_server.uri());
}

#[tokio::test]
async fn test_error_status_becomes_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("connection refused"))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config_for(&mock_server, None)).unwrap();
    let result: anyhow::Result<Vec<Value>> = client
        .request(Method::GET, "/rest/v1/bookings", None)
        .await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("500"), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_request_returning_asks_for_representation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/patients"))
        .and(header("prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{"id": 12, "name": "Ana"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config_for(&mock_server, None)).unwrap();
    let rows = client
        .request_returning(Method::POST, "/rest/v1/patients", Some(json!({"name": "Ana"})))
        .await
        .unwrap();

    assert_eq!(rows[0]["id"], 12);
}
