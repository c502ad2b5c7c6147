//! Snapshot loading and the in-memory ticket store

mod common;

use common::*;
use meuchapa_support_hub::analytics::{AnalyticsEngine, DateRange, SlaReportRequest};
use meuchapa_support_hub::models::{CallerContext, Priority, Ticket};
use meuchapa_support_hub::state::{load_snapshot, write_snapshot, InMemoryTicketStore, TicketSource};
use std::io::Write;
use std::sync::Arc;

#[tokio::test]
async fn test_snapshot_roundtrip_into_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickets.json");

    let mut workload = march_workload();
    workload.push(Ticket::new("archived", Priority::High, at(2024, 3, 25, 0, 0)).archive());
    write_snapshot(&path, &workload).await.unwrap();

    let loaded = load_snapshot(&path).await.unwrap();
    assert_eq!(loaded.len(), workload.len());

    let store = InMemoryTicketStore::new();
    store.replace_all(loaded).await.unwrap();
    assert_eq!(store.count().await.unwrap(), workload.len() as u64 - 1);

    let listed = store.list_tickets().await.unwrap();
    assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert!(listed.iter().all(|t| !t.archived));
}

#[tokio::test]
async fn test_snapshot_from_hosted_export() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{
                "id": "0b8e9a1e-93e4-4b57-8d3c-0a6f1f2a5d10",
                "title": "Sem acesso ao sistema",
                "priority": "urgent",
                "status": "in_progress",
                "sector": "TI",
                "created_at": "2024-03-01T00:00:00.000Z",
                "first_response_at": "2024-03-01T03:59:00.000Z",
                "closed_at": null,
                "assigned_to": "ana",
                "assignee_display_name": "Ana Lima"
            }}
        ]"#
    )
    .unwrap();

    let tickets = load_snapshot(file.path()).await.unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].priority, Priority::Unrecognized);

    let engine = AnalyticsEngine::with_defaults(Arc::new(InMemoryTicketStore::with_tickets(tickets)));
    let request = SlaReportRequest::new(
        DateRange::single_day(date(2024, 3, 1)),
        CallerContext::analyst("ana"),
    );
    let report = engine.generate_sla_report(&request).await.unwrap();

    // 239 minutes against the medium fallback of 240
    assert_eq!(report.overall.response_compliance, 100.0);
    assert_eq!(report.per_analyst[0].analyst_name, "Ana Lima");
}

#[tokio::test]
async fn test_snapshot_rejects_invalid_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let err = load_snapshot(file.path()).await.unwrap_err();
    assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
}

#[tokio::test]
async fn test_missing_snapshot_file() {
    let err = load_snapshot(std::path::Path::new("/nonexistent/tickets.json"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "IO_ERROR");
}
