//! SLA report request and envelope

use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::analytics::metrics::{AnalystMetrics, OverallStats, SlaAggregate};
use crate::analytics::window::DateRange;
use crate::models::{AnalystFilter, CallerContext, Role};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for an SLA report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlaReportRequest {
    pub range: DateRange,
    #[serde(default)]
    pub analyst_filter: AnalystFilter,
    pub caller: CallerContext,
}

impl SlaReportRequest {
    pub fn new(range: DateRange, caller: CallerContext) -> Self {
        Self {
            range,
            analyst_filter: AnalystFilter::All,
            caller,
        }
    }

    pub fn with_analyst(mut self, filter: AnalystFilter) -> Self {
        self.analyst_filter = filter;
        self
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if !self.range.is_ordered() {
            return Err(AnalyticsError::InvalidDateRange(format!(
                "start date {} is after end date {}",
                self.range.start_date, self.range.end_date
            )));
        }
        Ok(())
    }

    /// Key under which the generated report is cached.
    ///
    /// Non-admin callers are scoped to themselves, so their filter is not part of the key.
    pub fn cache_key(&self) -> String {
        let filter = if self.caller.role.is_elevated() {
            self.analyst_filter.to_string()
        } else {
            String::from("self")
        };
        format!(
            "{}:{}:{}:{}:{}",
            self.range.start_date, self.range.end_date, self.caller.role, self.caller.caller_id, filter
        )
    }
}

/// Generated SLA report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub analyst_filter: AnalystFilter,
    pub requested_by: String,
    pub role: Role,
    pub summary: String,
    pub overall: OverallStats,
    pub per_analyst: Vec<AnalystMetrics>,
}

impl SlaReport {
    pub fn new(
        range: DateRange,
        analyst_filter: AnalystFilter,
        caller: &CallerContext,
        aggregate: SlaAggregate,
    ) -> Self {
        let summary = format!(
            "{} tickets, {:.1}% response SLA compliance, {:.1}% resolution SLA compliance",
            aggregate.overall.total_tickets,
            aggregate.overall.response_compliance,
            aggregate.overall.resolution_compliance
        );

        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            start_date: range.start_date,
            end_date: range.end_date,
            analyst_filter,
            requested_by: caller.caller_id.clone(),
            role: caller.role,
            summary,
            overall: aggregate.overall,
            per_analyst: aggregate.per_analyst,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}
