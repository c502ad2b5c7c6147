//! Per-ticket SLA evaluation

use crate::analytics::targets::{MetricKind, SlaTargetTable};
use crate::analytics::time::elapsed_minutes;
use crate::models::Ticket;
use serde::{Deserialize, Serialize};

/// Outcome of checking one ticket against one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaOutcome {
    Met,
    Breached,
    /// The milestone has not been reached yet
    Unknown,
}

impl SlaOutcome {
    /// `None` when the ticket cannot be judged yet
    pub fn is_within(&self) -> Option<bool> {
        match self {
            SlaOutcome::Met => Some(true),
            SlaOutcome::Breached => Some(false),
            SlaOutcome::Unknown => None,
        }
    }
}

/// Minutes from creation to the milestone `kind` measures, if reached
pub fn milestone_minutes(ticket: &Ticket, kind: MetricKind) -> Option<i64> {
    let milestone = match kind {
        MetricKind::Response => ticket.first_response_at,
        MetricKind::Resolution => ticket.closed_at,
    }?;
    Some(elapsed_minutes(ticket.created_at, milestone))
}

pub fn evaluate(ticket: &Ticket, kind: MetricKind, targets: &SlaTargetTable) -> SlaOutcome {
    match milestone_minutes(ticket, kind) {
        None => SlaOutcome::Unknown,
        Some(elapsed) if elapsed <= targets.target_minutes(ticket.priority, kind) => SlaOutcome::Met,
        Some(_) => SlaOutcome::Breached,
    }
}

/// Met / measured counter behind a compliance percentage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplianceTally {
    pub met: u64,
    pub measured: u64,
}

impl ComplianceTally {
    pub fn record(&mut self, outcome: SlaOutcome) {
        match outcome {
            SlaOutcome::Met => {
                self.met += 1;
                self.measured += 1;
            }
            SlaOutcome::Breached => self.measured += 1,
            SlaOutcome::Unknown => {}
        }
    }

    /// 0 when nothing is measurable
    pub fn percentage(&self) -> f64 {
        if self.measured == 0 {
            0.0
        } else {
            self.met as f64 / self.measured as f64 * 100.0
        }
    }
}
