//! HTTP-level tests for the transaction endpoints.
//!
//! These drive the full router (tracing, CORS and metrics layers included)
//! against an in-memory SQLite repository.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use ledger_hex::{LedgerService, inbound::HttpServer};
use ledger_repo::SqliteRepo;
use ledger_types::TransactionId;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Helper to create a router backed by a fresh in-memory database.
async fn create_app() -> Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let service = LedgerService::new(repo);
    HttpServer::new(service).router()
}

/// Helper to send a request and decode the JSON response body (if any).
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Helper to create a transaction and return its JSON.
async fn create(app: &Router, text: &str, amount: f64) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/transactions",
        Some(json!({"text": text, "amount": amount})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health() {
    let app = create_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_create_then_retrieve() {
    let app = create_app().await;

    let created = create(&app, "Salary", 2500.0).await;

    let id = created["id"].as_str().unwrap();
    assert!(id.parse::<TransactionId>().is_ok());
    assert!(created["created_at"].is_string());
    assert_eq!(created["text"], "Salary");
    assert_eq!(created["amount"], 2500.0);

    let (status, fetched) = send(&app, Method::GET, &format!("/transactions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_missing_amount_is_rejected_and_not_persisted() {
    let app = create_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({"text": "Coffee"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert_eq!(body["fields"]["amount"], json!(["This field is required."]));

    let (_, listed) = send(&app, Method::GET, "/transactions", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_create_wrong_types_reports_each_field() {
    let app = create_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({"text": ["not", "text"], "amount": "lots"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["text"], json!(["Not a valid string."]));
    assert_eq!(body["fields"]["amount"], json!(["A valid number is required."]));
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id_and_created_at() {
    let app = create_app().await;
    let forged_id = "00000000-0000-0000-0000-000000000001";

    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({
            "id": forged_id,
            "created_at": "1999-01-01T00:00:00Z",
            "text": "Bonus",
            "amount": 100
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["id"], forged_id);
    assert_ne!(body["created_at"], "1999-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = create_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/transactions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 400);
    assert!(body.get("fields").is_none());
}

#[tokio::test]
async fn test_retrieve_unknown_id_is_not_found() {
    let app = create_app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/transactions/7f6c1e1a-3a7e-4d8e-9a55-2b2f4c1d9e10",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_non_uuid_id_is_not_found() {
    let app = create_app().await;

    let (status, _) = send(&app, Method::GET, "/transactions/12", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_changes_only_supplied_fields() {
    let app = create_app().await;
    let created = create(&app, "Rent", -800.0).await;
    let uri = format!("/transactions/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, Method::PATCH, &uri, Some(json!({"amount": -850}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_eq!(updated["text"], "Rent");
    assert_eq!(updated["amount"], -850.0);

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_put_updates_fields_and_ignores_read_only() {
    let app = create_app().await;
    let created = create(&app, "Groceries", -42.5).await;
    let uri = format!("/transactions/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "created_at": "1999-01-01T00:00:00Z",
            "text": "Groceries (weekly)",
            "amount": -60
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_eq!(updated["text"], "Groceries (weekly)");
    assert_eq!(updated["amount"], -60.0);
}

#[tokio::test]
async fn test_update_invalid_field_is_rejected() {
    let app = create_app().await;
    let created = create(&app, "Rent", -800.0).await;
    let uri = format!("/transactions/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"text": null}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["text"], json!(["This field may not be null."]));

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = create_app().await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/transactions/7f6c1e1a-3a7e-4d8e-9a55-2b2f4c1d9e10",
        Some(json!({"text": "Ghost"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_retrieve_is_not_found() {
    let app = create_app().await;
    let created = create(&app, "Gym", -30.0).await;
    let uri = format!("/transactions/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_all_created() {
    let app = create_app().await;

    for i in 0..5 {
        create(&app, &format!("Item {}", i), i as f64).await;
    }

    let (status, listed) = send(&app, Method::GET, "/transactions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_summary() {
    let app = create_app().await;
    create(&app, "Salary", 100.0).await;
    create(&app, "Rent", -30.0).await;
    create(&app, "Refund", 20.0).await;

    let (status, summary) = send(&app, Method::GET, "/transactions/summary", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["balance"], 90.0);
    assert_eq!(summary["income"], 120.0);
    assert_eq!(summary["expense"], -30.0);
    assert_eq!(summary["expense_ratio"], 25.0);
    assert_eq!(summary["count"], 3);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = create_app().await;

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/transactions/{id}"].is_object());
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let app = HttpServer::new(LedgerService::new(repo))
        .with_allowed_origins(vec!["http://localhost:3001".to_string()])
        .router();

    let request = Request::builder()
        .uri("/transactions")
        .header(header::ORIGIN, "http://localhost:3001")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3001"
    );

    let request = Request::builder()
        .uri("/transactions")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_no_cors_headers_when_origins_unset() {
    let app = create_app().await;

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/transactions")
        .header(header::ORIGIN, "http://localhost:3001")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(preflight).await.unwrap();
    let headers = response.headers();
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).is_none());
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).is_none());
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

    let request = Request::builder()
        .uri("/transactions")
        .header(header::ORIGIN, "http://localhost:3001")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::VARY).is_none());
    assert!(
        response
            .headers()
            .keys()
            .all(|name| !name.as_str().starts_with("access-control-"))
    );
}

#[tokio::test]
async fn test_null_character_in_text_is_rejected() {
    let app = create_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({"text": "a\u{0}b", "amount": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"]["text"],
        json!(["Null characters are not allowed."])
    );

    let (_, listed) = send(&app, Method::GET, "/transactions", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_non_canonical_id_forms_are_not_found() {
    let app = create_app().await;
    let created = create(&app, "Salary", 2500.0).await;
    let id = created["id"].as_str().unwrap();

    for alternate in [
        id.to_uppercase(),
        id.replace('-', ""),
        format!("urn:uuid:{}", id),
    ] {
        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/transactions/{}", alternate),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", alternate);
    }
}

#[tokio::test]
async fn test_out_of_range_amount_is_a_field_error() {
    let app = create_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/transactions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"text": "Lottery", "amount": 1e400}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["fields"]["amount"], json!(["A valid number is required."]));
}
