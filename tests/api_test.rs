//! HTTP API tests driven through the router without a listener

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use common::*;
use meuchapa_support_hub::analytics::{AnalyticsConfig, AnalyticsEngine, SlaReport};
use meuchapa_support_hub::api::{build_router, AppState, CALLER_ID_HEADER, CALLER_ROLE_HEADER};
use meuchapa_support_hub::models::Ticket;
use meuchapa_support_hub::state::InMemoryTicketStore;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let store = InMemoryTicketStore::with_tickets(march_workload());
    let engine = AnalyticsEngine::new(Arc::new(store), AnalyticsConfig::default());
    build_router(AppState::new(Arc::new(engine)))
}

fn get(uri: &str, caller: Option<(&str, &str)>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some((id, role)) = caller {
        builder = builder
            .header(CALLER_ID_HEADER, id)
            .header(CALLER_ROLE_HEADER, role);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const MARCH: &str = "/v1/analytics/sla?start_date=2024-03-01&end_date=2024-03-31";

#[tokio::test]
async fn test_health() {
    let response = app().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_admin_report() {
    let response = app()
        .oneshot(get(MARCH, Some(("root", "admin"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let report: SlaReport = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report.overall.total_tickets, 4);
    assert_eq!(report.per_analyst.len(), 2);
    assert!(report.analyst_filter.is_all());
}

#[tokio::test]
async fn test_admin_selects_analyst() {
    let uri = format!("{}&analyst_id=bia", MARCH);
    let response = app()
        .oneshot(get(&uri, Some(("root", "admin"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["overall"]["total_tickets"], 1);
    assert_eq!(body["analyst_filter"], "bia");

    // the selection narrows the overall figures, admins still see every analyst
    let analysts = body["per_analyst"].as_array().unwrap();
    assert_eq!(analysts.len(), 2);
    assert_eq!(analysts[0]["analyst_id"], "ana");
    assert_eq!(analysts[1]["analyst_id"], "bia");
}

#[tokio::test]
async fn test_analyst_filter_parameter_is_ignored() {
    let uri = format!("{}&analyst_id=bia", MARCH);
    let response = app()
        .oneshot(get(&uri, Some(("ana", "analyst"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["overall"]["total_tickets"], 3);
    let analysts = body["per_analyst"].as_array().unwrap();
    assert_eq!(analysts.len(), 1);
    assert_eq!(analysts[0]["analyst_id"], "ana");
}

#[tokio::test]
async fn test_user_role_forbidden() {
    let response = app()
        .oneshot(get(MARCH, Some(("customer", "user"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "AUTHORIZATION_ERROR");
}

#[tokio::test]
async fn test_missing_caller_headers() {
    let response = app().oneshot(get(MARCH, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app()
        .oneshot(get(MARCH, Some(("root", "superuser"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_inverted_range_rejected() {
    let response = app()
        .oneshot(get(
            "/v1/analytics/sla?start_date=2024-03-31&end_date=2024-03-01",
            Some(("root", "admin")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_date_uses_error_envelope() {
    let response = app()
        .oneshot(get(
            "/v1/analytics/sla?start_date=2024-13-45&end_date=2024-03-01",
            Some(("root", "admin")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn test_malformed_ticket_body_uses_error_envelope() {
    let request = Request::builder()
        .method("PUT")
        .uri("/v1/tickets")
        .header("content-type", "application/json")
        .header(CALLER_ID_HEADER, "root")
        .header(CALLER_ROLE_HEADER, "admin")
        .body(Body::from(r#"[{"id":1}]"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().len() > 0);
}

#[tokio::test]
async fn test_import_requires_admin_and_replaces_snapshot() {
    let app = app();
    let payload = serde_json::to_vec(&vec![assigned_ticket(
        "caio",
        meuchapa_support_hub::models::Priority::High,
        at(2024, 3, 2, 10, 0),
        Some(10),
        None,
    )])
    .unwrap();

    let put = |role: &str| {
        Request::builder()
            .method("PUT")
            .uri("/v1/tickets")
            .header("content-type", "application/json")
            .header(CALLER_ID_HEADER, "someone")
            .header(CALLER_ROLE_HEADER, role)
            .body(Body::from(payload.clone()))
            .unwrap()
    };

    let response = app.clone().oneshot(put("analyst")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.clone().oneshot(put("admin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["imported"], 1);

    let response = app
        .clone()
        .oneshot(get("/v1/tickets/count", Some(("root", "admin"))))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["total"], 1);

    let response = app
        .oneshot(get(MARCH, Some(("root", "admin"))))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["per_analyst"][0]["analyst_id"], "caio");
}

#[tokio::test]
async fn test_import_rejects_malformed_ticket() {
    let mut ticket: Ticket = assigned_ticket(
        "caio",
        meuchapa_support_hub::models::Priority::Low,
        at(2024, 3, 2, 10, 0),
        None,
        None,
    );
    ticket.assigned_to = Some(String::new());

    let request = Request::builder()
        .method("PUT")
        .uri("/v1/tickets")
        .header("content-type", "application/json")
        .header(CALLER_ID_HEADER, "root")
        .header(CALLER_ROLE_HEADER, "admin")
        .body(Body::from(serde_json::to_vec(&vec![ticket]).unwrap()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let _ = meuchapa_support_hub::metrics::init_metrics();
    let app = app();

    let _ = app
        .clone()
        .oneshot(get(MARCH, Some(("root", "admin"))))
        .await
        .unwrap();

    let response = app.oneshot(get("/metrics", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("meuchapa_sla_reports_generated_total"));
}
