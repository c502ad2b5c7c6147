//! SLA analytics for support tickets
//!
//! Tickets flow through a fixed pipeline:
//!
//! 1. [`DateRange`] keeps tickets created inside an inclusive calendar-day window.
//! 2. [`MetricsAggregator`] drops unassigned tickets and applies the caller's
//!    visibility (admins may pick an analyst, everyone else sees only their own).
//! 3. Each ticket is checked against the [`SlaTargetTable`] for response and
//!    resolution; tickets that have not reached a milestone are left out of
//!    that compliance ratio entirely.
//! 4. Results fold into [`OverallStats`] and per-analyst [`AnalystMetrics`].
//!
//! The computation is synchronous and infallible. [`AnalyticsEngine`] wraps it
//! with a ticket source, a report cache and Prometheus instrumentation.
//!
//! # Example
//!
//! ```no_run
//! use meuchapa_support_hub::analytics::{compute_sla_metrics, DateRange, SlaTargetTable};
//! use meuchapa_support_hub::models::{AnalystFilter, CallerContext};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let result = compute_sla_metrics(
//!     &[],
//!     &DateRange::single_day(day),
//!     &AnalystFilter::All,
//!     &CallerContext::admin("admin-1"),
//!     &SlaTargetTable::default(),
//! );
//! assert_eq!(result.overall.total_tickets, 0);
//! ```

mod aggregation;
mod engine;
mod error;
mod evaluator;
mod export;
mod metrics;
mod reports;
mod targets;
mod time;
mod window;

pub use aggregation::{compute_sla_metrics, MetricsAggregator, UNKNOWN_ANALYST_NAME};
pub use engine::{AnalyticsConfig, AnalyticsEngine, CacheStats};
pub use error::{AnalyticsError, AnalyticsResult};
pub use evaluator::{evaluate, milestone_minutes, ComplianceTally, SlaOutcome};
pub use export::{ExportFormat, ReportExporter};
pub use metrics::{AnalystMetrics, OverallStats, SlaAggregate};
pub use reports::{SlaReport, SlaReportRequest};
pub use targets::{MetricKind, PriorityTargets, SlaTargetTable};
pub use time::elapsed_minutes;
pub use window::DateRange;
