use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use agenda_cell::{AgendaError, RestrictionType};
use agenda_cell::services::{ScheduleStore, SupabaseScheduleStore};
use shared_database::SupabaseClient;
use shared_utils::test_utils::{TestConfig, MockRecordStoreResponses as Rows};

fn create_store(mock_server: &MockServer) -> SupabaseScheduleStore {
    let config = TestConfig::with_url(mock_server.uri()).to_app_config();
    SupabaseScheduleStore::new(Arc::new(SupabaseClient::new(&config).unwrap()))
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[tokio::test]
async fn test_availability_rules_are_filtered_by_weekday_and_ordered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/availability_rules"))
        .and(query_param("resource_id", "eq.12"))
        .and(query_param("weekday", "eq.3"))
        .and(query_param("order", "start_time.asc,id.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            Rows::availability_rule(1, 12, 3, "08:00:00", "12:00:00", 20),
            Rows::availability_rule(2, 12, 3, "13:30:00", "17:00:00", 30),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let rules = create_store(&mock_server).availability_rules(12, 3).await.unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].start_time, hm(8, 0));
    assert_eq!(rules[1].end_time, hm(17, 0));
    assert_eq!(rules[1].slot_duration_minutes, 30);
}

#[tokio::test]
async fn test_occupied_starts_cover_one_day_and_skip_cancelled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("resource_id", "eq.12"))
        .and(query_param("select", "start_at,status"))
        .and(query_param("status", "not.in.(CANCELLED_BY_PATIENT,CANCELLED_BY_CLINIC)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            Rows::booking("2025-03-04T09:20:00", "CONFIRMED"),
            Rows::booking("2025-03-04T11:00:00", "CANCELLED_BY_CLINIC"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
    let starts = create_store(&mock_server).occupied_starts(12, date).await.unwrap();

    assert_eq!(starts, vec![date.and_hms_opt(9, 20, 0).unwrap()]);

    let requests = mock_server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("start_at=gte.2025-03-04T00:00:00"), "query: {}", query);
    assert!(query.contains("start_at=lt.2025-03-05T00:00:00"), "query: {}", query);
}

#[tokio::test]
async fn test_restriction_rules_with_and_without_windows() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/restriction_rules"))
        .and(query_param("resource_id", "eq.12"))
        .and(query_param("order", "id.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            Rows::restriction_rule(1, 12, "EXCLUDE_PLAN", Some(5), None),
            Rows::restriction_rule(2, 12, "CONTRAST_FORBIDDEN", None, Some(("14:00:00", "18:00:00"))),
        ])))
        .mount(&mock_server)
        .await;

    let rules = create_store(&mock_server).restriction_rules(12).await.unwrap();

    assert_eq!(rules[0].restriction_type, RestrictionType::ExcludePlan);
    assert_eq!(rules[0].reference_id, Some(5));
    assert_eq!(rules[0].start_time, None);
    assert_eq!(rules[1].start_time, Some(hm(14, 0)));
    assert_eq!(rules[1].end_time, Some(hm(18, 0)));
}

#[tokio::test]
async fn test_unknown_procedure_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/procedures"))
        .and(query_param("id", "eq.77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let procedure = create_store(&mock_server).procedure(77).await.unwrap();
    assert!(procedure.is_none());
}

#[tokio::test]
async fn test_procedure_contrast_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/procedures"))
        .and(query_param("id", "eq.3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            Rows::procedure(3, "Abdominal CT with contrast", true)
        ])))
        .mount(&mock_server)
        .await;

    let procedure = create_store(&mock_server).procedure(3).await.unwrap().unwrap();
    assert!(procedure.requires_contrast);
    assert_eq!(procedure.name.as_deref(), Some("Abdominal CT with contrast"));
}

#[tokio::test]
async fn test_malformed_rows_are_record_store_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/availability_rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "not-a-rule" }])))
        .mount(&mock_server)
        .await;

    let result = create_store(&mock_server).availability_rules(12, 3).await;
    assert_matches!(result, Err(AgendaError::RecordStore(_)));
}
