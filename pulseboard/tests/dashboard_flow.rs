use pulseboard::chat::LlmProvider;
use pulseboard::config::{
    BackendConfig, ChatConfig, Config, ServerConfig, DEFAULT_REQUIRED_SUGGESTION,
};
use pulseboard::dashboard::Dashboard;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(backend_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        backend: BackendConfig {
            base_url: backend_url.to_string(),
            default_file_path: Some("/data/export.xml".to_string()),
            timeout_secs: 5,
        },
        chat: ChatConfig {
            max_messages: 100,
            max_total_chars: 16000,
            max_record_rows: 50,
            max_series: 12,
            max_points: 50,
            required_suggestion: DEFAULT_REQUIRED_SUGGESTION.to_string(),
        },
        llm: None,
    }
}

fn dashboard(backend_url: &str) -> Dashboard {
    Dashboard::new(
        test_config(backend_url),
        LlmProvider::unavailable("not configured"),
    )
    .expect("dashboard")
}

async fn mount_records(upstream: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/records"))
        .and(query_param("file_path", "/data/export.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-count", "120")
                .set_body_json(json!([
                    {"type": "HKQuantityTypeIdentifierStepCount", "value": "4200",
                     "startDate": "2024-01-01 08:00:00 -0700"},
                    {"type": "HKQuantityTypeIdentifierHeartRate", "value": "62",
                     "startDate": "2024-01-01 08:05:00 -0700", "unit": "count/min"}
                ])),
        )
        .mount(upstream)
        .await;
}

async fn mount_sessions(upstream: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "startDate": "2024-01-20T22:58:00-07:00",
            "endDate": "2024-01-21T06:58:00-07:00",
            "duration": 28800.0,
            "asleepDuration": 27000.0,
            "awakeDuration": 1800.0,
            "awakenings": 2,
            "segments": [
                {"stage": "Core", "startDate": "2024-01-20T22:58:00-07:00",
                 "endDate": "2024-01-21T01:58:00-07:00", "duration": 10800.0},
                {"stage": "REM", "startDate": "2024-01-21T01:58:00-07:00",
                 "endDate": "2024-01-21T03:28:00-07:00", "duration": 5400.0}
            ]
        }])))
        .mount(upstream)
        .await;
}

async fn mount_vitals(upstream: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/vitals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "HKQuantityTypeIdentifierBloodPressureSystolic", "value": 120,
             "startDate": "2024-01-01 08:00:00 -0700"},
            {"type": "HKQuantityTypeIdentifierBloodPressureDiastolic", "value": 80,
             "startDate": "2024-01-01 08:00:00 -0700"},
            {"type": "HKQuantityTypeIdentifierHeartRate", "value": 62,
             "startDate": "2024-01-01 08:05:00 -0700", "unit": "count/min"}
        ])))
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn load_all_fills_every_domain_and_seeds_suggestions() {
    let upstream = MockServer::start().await;
    mount_records(&upstream).await;
    mount_sessions(&upstream).await;
    mount_vitals(&upstream).await;

    let mut dash = dashboard(&upstream.uri());
    dash.load_all().await;

    assert_eq!(dash.records.rows.len(), 2);
    assert_eq!(dash.records.total, Some(120));
    assert!(dash.records.error.is_none());

    assert_eq!(dash.sleep.rows.len(), 1);
    let stats = dash.sleep_stats().expect("stats");
    assert_eq!(stats.session_count, 1);
    assert_eq!(stats.mean_awakenings, 2.0);

    let labels: Vec<&str> = dash.vitals.rows.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Blood Pressure", "Heart Rate"]);
    let bp = &dash.vitals.rows[0];
    assert_eq!(bp.unit.as_deref(), Some("mmHg"));
    assert_eq!(bp.points[0].value, 120.0);
    assert_eq!(bp.secondary.as_ref().expect("secondary")[0].value, 80.0);

    // The LLM is unavailable here, so the strip falls back to the one
    // guaranteed opening question.
    assert_eq!(
        dash.chat.suggestions(),
        [DEFAULT_REQUIRED_SUGGESTION.to_string()]
    );
}

#[tokio::test]
async fn one_failing_domain_does_not_poison_the_others() {
    let upstream = MockServer::start().await;
    mount_records(&upstream).await;
    mount_vitals(&upstream).await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&upstream)
        .await;

    let mut dash = dashboard(&upstream.uri());
    dash.load_all().await;

    assert!(dash.records.error.is_none());
    assert_eq!(dash.records.rows.len(), 2);
    assert_eq!(dash.sleep.error.as_deref(), Some("boom"));
    assert!(dash.sleep.rows.is_empty());
    assert!(dash.vitals.error.is_none());
    assert!(!dash.vitals.rows.is_empty());
}

#[tokio::test]
async fn malformed_session_rows_are_dropped_not_fatal() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"startDate": "a", "endDate": "b", "duration": 100.0,
             "asleepDuration": 90.0, "awakeDuration": 10.0, "awakenings": 0,
             "segments": []},
            {"unexpected": "shape"}
        ])))
        .mount(&upstream)
        .await;

    let mut dash = dashboard(&upstream.uri());
    dash.load_sleep().await;

    assert!(dash.sleep.error.is_none());
    assert_eq!(dash.sleep.rows.len(), 1);
}
