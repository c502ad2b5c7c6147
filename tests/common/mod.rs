//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use meuchapa_support_hub::models::{Priority, Ticket};

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Ticket assigned to `analyst`, optionally responded/closed after the given minutes
pub fn assigned_ticket(
    analyst: &str,
    priority: Priority,
    created_at: DateTime<Utc>,
    response_after: Option<i64>,
    closed_after: Option<i64>,
) -> Ticket {
    let mut ticket = Ticket::new(format!("{} ticket", analyst), priority, created_at)
        .assigned_to(analyst, format!("Analyst {}", analyst));
    if let Some(minutes) = response_after {
        ticket = ticket.responded_at(created_at + Duration::minutes(minutes));
    }
    if let Some(minutes) = closed_after {
        ticket = ticket.closed_at(created_at + Duration::minutes(minutes));
    }
    ticket
}

/// March 2024 workload for two analysts plus one unassigned ticket, newest first
pub fn march_workload() -> Vec<Ticket> {
    vec![
        // ana: critical answered late, resolved within target
        assigned_ticket("ana", Priority::Critical, at(2024, 3, 20, 10, 0), Some(45), Some(200)),
        // bia: high answered in time, still open
        assigned_ticket("bia", Priority::High, at(2024, 3, 15, 9, 0), Some(20), None),
        // ana: medium not answered yet
        assigned_ticket("ana", Priority::Medium, at(2024, 3, 10, 14, 0), None, None),
        // unassigned
        Ticket::new("orphan", Priority::Low, at(2024, 3, 5, 8, 0)),
        // ana: low answered and closed in time
        assigned_ticket("ana", Priority::Low, at(2024, 3, 1, 0, 0), Some(120), Some(600)),
        // outside the month
        assigned_ticket("bia", Priority::Low, at(2024, 2, 28, 23, 0), Some(10), Some(20)),
    ]
}
