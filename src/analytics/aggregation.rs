//! Folding tickets into overall and per-analyst SLA statistics

use crate::analytics::evaluator::{evaluate, milestone_minutes, ComplianceTally};
use crate::analytics::metrics::{AnalystMetrics, OverallStats, SlaAggregate};
use crate::analytics::targets::{MetricKind, SlaTargetTable};
use crate::analytics::window::DateRange;
use crate::models::{AnalystFilter, CallerContext, Ticket};
use std::collections::HashMap;

/// Display name used when the profile store has none for an analyst
pub const UNKNOWN_ANALYST_NAME: &str = "Unknown";

/// Stateless aggregator over an already-fetched ticket list
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Assigned tickets the caller is allowed to aggregate.
    ///
    /// Admins get every assigned ticket, or only the selected analyst's.
    /// Everyone else gets their own tickets and the filter is ignored.
    pub fn visible_tickets<'a, I>(
        tickets: I,
        filter: &AnalystFilter,
        caller: &CallerContext,
    ) -> Vec<&'a Ticket>
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        let scope: Option<&str> = if caller.role.is_elevated() {
            match filter {
                AnalystFilter::All => None,
                AnalystFilter::Analyst(id) => Some(id.as_str()),
            }
        } else {
            Some(caller.caller_id.as_str())
        };

        tickets
            .into_iter()
            .filter(|t| match (t.assignee(), scope) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(assignee), Some(wanted)) => assignee == wanted,
            })
            .collect()
    }

    /// Role-filter the tickets and compute overall and per-analyst statistics.
    ///
    /// Admins get a rollup for every analyst even when one is selected.
    pub fn aggregate<'a, I>(
        tickets: I,
        filter: &AnalystFilter,
        caller: &CallerContext,
        targets: &SlaTargetTable,
    ) -> SlaAggregate
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        let windowed: Vec<&Ticket> = tickets.into_iter().collect();
        let visible = Self::visible_tickets(windowed.iter().copied(), filter, caller);
        // The analyst selection narrows the overall figures only
        let roster = Self::visible_tickets(windowed, &AnalystFilter::All, caller);

        SlaAggregate {
            overall: Self::overall_stats(&visible, targets),
            per_analyst: Self::per_analyst(&roster, targets),
        }
    }

    pub fn overall_stats(tickets: &[&Ticket], targets: &SlaTargetTable) -> OverallStats {
        let mut response_samples = Vec::new();
        let mut resolution_samples = Vec::new();
        let mut response = ComplianceTally::default();
        let mut resolution = ComplianceTally::default();

        for ticket in tickets {
            if let Some(minutes) = milestone_minutes(ticket, MetricKind::Response) {
                response_samples.push(minutes as f64);
            }
            if let Some(minutes) = milestone_minutes(ticket, MetricKind::Resolution) {
                resolution_samples.push(minutes as f64);
            }
            response.record(evaluate(ticket, MetricKind::Response, targets));
            resolution.record(evaluate(ticket, MetricKind::Resolution, targets));
        }

        OverallStats {
            total_tickets: tickets.len() as u64,
            responded_tickets: response_samples.len() as u64,
            resolved_tickets: resolution_samples.len() as u64,
            avg_response_time: mean(&response_samples),
            avg_resolution_time: mean(&resolution_samples),
            response_compliance: response.percentage(),
            resolution_compliance: resolution.percentage(),
        }
    }

    /// Group by assignee in order of first appearance
    pub fn per_analyst(tickets: &[&Ticket], targets: &SlaTargetTable) -> Vec<AnalystMetrics> {
        let mut order: Vec<AnalystAccumulator> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for ticket in tickets {
            let Some(analyst_id) = ticket.assignee() else {
                continue;
            };

            let slot = *index.entry(analyst_id).or_insert_with(|| {
                order.push(AnalystAccumulator::new(analyst_id));
                order.len() - 1
            });
            order[slot].fold(ticket, targets);
        }

        order.into_iter().map(AnalystAccumulator::finish).collect()
    }
}

/// Pure entry point: window filter, then role filter and aggregation
pub fn compute_sla_metrics(
    tickets: &[Ticket],
    range: &DateRange,
    filter: &AnalystFilter,
    caller: &CallerContext,
    targets: &SlaTargetTable,
) -> SlaAggregate {
    let windowed = range.filter(tickets);
    MetricsAggregator::aggregate(windowed, filter, caller, targets)
}

struct AnalystAccumulator {
    analyst_id: String,
    analyst_name: Option<String>,
    total_tickets: u64,
    resolved_tickets: u64,
    avg_response_time: f64,
    avg_resolution_time: f64,
    response: ComplianceTally,
    resolution: ComplianceTally,
}

impl AnalystAccumulator {
    fn new(analyst_id: &str) -> Self {
        Self {
            analyst_id: analyst_id.to_string(),
            analyst_name: None,
            total_tickets: 0,
            resolved_tickets: 0,
            avg_response_time: 0.0,
            avg_resolution_time: 0.0,
            response: ComplianceTally::default(),
            resolution: ComplianceTally::default(),
        }
    }

    /// The response mean divides by the analyst's running ticket position, not
    /// by the number of responded tickets seen so far. Tickets without a
    /// response still advance the denominator. The resolution mean divides by
    /// the resolved count.
    fn fold(&mut self, ticket: &Ticket, targets: &SlaTargetTable) {
        self.total_tickets += 1;

        if self.analyst_name.is_none() {
            self.analyst_name = ticket
                .assignee_display_name
                .as_ref()
                .filter(|name| !name.trim().is_empty())
                .cloned();
        }

        if let Some(minutes) = milestone_minutes(ticket, MetricKind::Response) {
            let n = self.total_tickets as f64;
            self.avg_response_time = (self.avg_response_time * (n - 1.0) + minutes as f64) / n;
        }

        if let Some(minutes) = milestone_minutes(ticket, MetricKind::Resolution) {
            self.resolved_tickets += 1;
            let n = self.resolved_tickets as f64;
            self.avg_resolution_time = (self.avg_resolution_time * (n - 1.0) + minutes as f64) / n;
        }

        self.response.record(evaluate(ticket, MetricKind::Response, targets));
        self.resolution.record(evaluate(ticket, MetricKind::Resolution, targets));
    }

    fn finish(self) -> AnalystMetrics {
        AnalystMetrics {
            analyst_id: self.analyst_id,
            analyst_name: self
                .analyst_name
                .unwrap_or_else(|| UNKNOWN_ANALYST_NAME.to_string()),
            total_tickets: self.total_tickets,
            resolved_tickets: self.resolved_tickets,
            avg_response_time: self.avg_response_time,
            avg_resolution_time: self.avg_resolution_time,
            sla_response_compliance: self.response.percentage(),
            sla_resolution_compliance: self.resolution.percentage(),
        }
    }
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}
