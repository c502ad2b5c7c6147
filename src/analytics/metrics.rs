//! Output structures of the SLA engine

use serde::{Deserialize, Serialize};

/// Statistics over every ticket visible to the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    /// Assigned tickets after role filtering
    pub total_tickets: u64,

    /// Tickets with a first staff response
    pub responded_tickets: u64,

    /// Tickets with a closure timestamp
    pub resolved_tickets: u64,

    /// Mean minutes to first response over responded tickets
    pub avg_response_time: f64,

    /// Mean minutes to closure over resolved tickets
    pub avg_resolution_time: f64,

    /// Response SLA compliance (percentage of measurable tickets)
    pub response_compliance: f64,

    /// Resolution SLA compliance (percentage of measurable tickets)
    pub resolution_compliance: f64,
}

/// Per-analyst rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystMetrics {
    pub analyst_id: String,
    pub analyst_name: String,
    pub total_tickets: u64,
    pub resolved_tickets: u64,

    /// Running mean in minutes, see `AnalystAccumulator::fold`
    pub avg_response_time: f64,

    /// Running mean in minutes over resolved tickets
    pub avg_resolution_time: f64,

    pub sla_response_compliance: f64,
    pub sla_resolution_compliance: f64,
}

/// Full engine output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlaAggregate {
    pub overall: OverallStats,
    pub per_analyst: Vec<AnalystMetrics>,
}

impl SlaAggregate {
    pub fn analyst(&self, analyst_id: &str) -> Option<&AnalystMetrics> {
        self.per_analyst.iter().find(|m| m.analyst_id == analyst_id)
    }
}
