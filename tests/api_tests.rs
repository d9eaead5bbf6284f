/// HTTP tests driving the router in-process
/// Covers the submit -> view -> report -> booking -> reset flow and error statuses
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use health_advisor_api::config::Config;
use health_advisor_api::handlers::AppState;
use health_advisor_api::router::{api_routes, build_router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Helper function to create the app with a test config
fn create_test_app() -> Router {
    let config = Config {
        booking_url: "https://booking.example.com/bio-test".to_string(),
        ..Config::default()
    };
    build_router(Arc::new(AppState::new(config)), api_routes())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(app, request).await
}

/// Sends `raw` verbatim as a JSON body, for payloads `Value` cannot express.
async fn send_raw(app: &Router, uri: &str, raw: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn healthy_form() -> Value {
    json!({
        "name": "Alex Morgan",
        "email": "alex@example.com",
        "age": 29,
        "gender": "Other",
        "energy": 8,
        "sleep": 8,
        "stress": 2,
        "symptoms": [],
        "diet": "Vegan",
        "exercise": "5+x/week",
        "goal": "Keep my energy up"
    })
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_catalog_lists_options() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/api/v1/catalog", None).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["symptoms"].as_array().unwrap().len(), 12);
    assert_eq!(body["symptoms"][4], "Anxiety/Depression");
    assert_eq!(body["exercise"][1], "1-2x/week");
    assert_eq!(body["levels"]["max"], 10);
    assert_eq!(body["products"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_submit_returns_analysis() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::POST, "/api/v1/assessments", Some(healthy_form())).await;

    assert_eq!(status, StatusCode::CREATED);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["analysis"]["overall_score"], 80);
    assert_eq!(body["analysis"]["deficiencies"][0]["name"], "B-Complex Vitamins");
    assert_eq!(
        body["analysis"]["imbalances"][0]["system"],
        "Detoxification Pathways"
    );
    assert_eq!(body["fingerprint"].as_str().unwrap().len(), 64);
    assert!(body["session_id"].is_string());
}

#[tokio::test]
async fn test_submit_missing_fields() {
    let app = create_test_app();
    let form = json!({ "name": "", "gender": "Select...", "energy": 5 });
    let (status, body) = send(&app, Method::POST, "/api/v1/assessments", Some(form)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"], "Please fill required fields");
    assert_eq!(body["details"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_undecodable_body_is_bad_request() {
    let app = create_test_app();

    for raw in [r#"{"energy": "high"}"#, r#"{"name": "Alex", "energy": 5"#] {
        let (status, body) = send_raw(&app, "/api/v1/assessments", raw).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", raw);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert!(body["error"].is_string());
        assert!(body.get("details").is_none());
    }
}

#[tokio::test]
async fn test_undecodable_resubmit_is_bad_request() {
    let app = create_test_app();
    let (_, body) = send(&app, Method::POST, "/api/v1/assessments", Some(healthy_form())).await;
    let created: Value = serde_json::from_str(&body).unwrap();
    let uri = format!("/api/v1/assessments/{}", created["session_id"].as_str().unwrap());

    let (status, body) = send_raw(&app, &uri, r#"{"symptoms": "Brain Fog"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("symptoms"));

    // Stored result untouched
    let (_, body) = send(&app, Method::GET, &uri, None).await;
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["fingerprint"], created["fingerprint"]);
}

#[tokio::test]
async fn test_full_session_flow() {
    let app = create_test_app();
    let (_, body) = send(&app, Method::POST, "/api/v1/assessments", Some(healthy_form())).await;
    let created: Value = serde_json::from_str(&body).unwrap();
    let id = created["session_id"].as_str().unwrap().to_string();

    // Results view
    let (status, body) = send(&app, Method::GET, &format!("/api/v1/assessments/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["view"], "results");
    assert_eq!(view["fingerprint"], created["fingerprint"]);

    // Text report
    let (status, report) =
        send(&app, Method::GET, &format!("/api/v1/assessments/{}/report", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(report.starts_with("Wellness Score: 80/100"));
    assert!(report.contains("2. Focus on B-Complex Vitamins-rich foods"));

    // Booking offer
    let (status, body) =
        send(&app, Method::GET, &format!("/api/v1/assessments/{}/booking", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let offer: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(offer["booking_url"], "https://booking.example.com/bio-test");
    assert_eq!(offer["price"], "97");

    // Reset
    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/assessments/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/assessments/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["view"], "intake");

    // No result after reset
    let (status, _) =
        send(&app, Method::GET, &format!("/api/v1/assessments/{}/booking", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_resubmit_replaces_result() {
    let app = create_test_app();
    let (_, body) = send(&app, Method::POST, "/api/v1/assessments", Some(healthy_form())).await;
    let created: Value = serde_json::from_str(&body).unwrap();
    let id = created["session_id"].as_str().unwrap().to_string();

    let mut tired = healthy_form();
    tired["energy"] = json!(3);
    tired["sleep"] = json!(3);
    tired["stress"] = json!(9);
    tired["symptoms"] = json!(["Chronic Fatigue", "Sleep Issues", "Brain Fog"]);

    let uri = format!("/api/v1/assessments/{}", id);
    let (status, body) = send(&app, Method::POST, &uri, Some(tired)).await;
    assert_eq!(status, StatusCode::OK);
    let replaced: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(replaced["analysis"]["overall_score"], 50);
    assert_eq!(replaced["session_id"], created["session_id"]);

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["analysis"]["deficiencies"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_session() {
    let app = create_test_app();
    let uri = format!("/api/v1/assessments/{}", uuid::Uuid::new_v4());

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, &uri, Some(healthy_form())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
