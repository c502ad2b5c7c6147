//! SLA target table: (priority, metric kind) -> allowed minutes

use crate::models::Priority;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which milestone a target applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MetricKind {
    /// Creation to first staff reply
    Response,
    /// Creation to closure
    Resolution,
}

/// Target minutes per priority for one metric kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTargets {
    pub low: i64,
    pub medium: i64,
    pub high: i64,
    pub critical: i64,
}

impl PriorityTargets {
    /// Unrecognized priorities use the medium target
    pub fn for_priority(&self, priority: Priority) -> i64 {
        match priority {
            Priority::Low => self.low,
            Priority::Medium | Priority::Unrecognized => self.medium,
            Priority::High => self.high,
            Priority::Critical => self.critical,
        }
    }

    fn all(&self) -> [(&'static str, i64); 4] {
        [
            ("low", self.low),
            ("medium", self.medium),
            ("high", self.high),
            ("critical", self.critical),
        ]
    }
}

/// Static SLA configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaTargetTable {
    #[serde(default = "default_response_targets")]
    pub response: PriorityTargets,

    #[serde(default = "default_resolution_targets")]
    pub resolution: PriorityTargets,
}

impl SlaTargetTable {
    pub fn target_minutes(&self, priority: Priority, kind: MetricKind) -> i64 {
        match kind {
            MetricKind::Response => self.response.for_priority(priority),
            MetricKind::Resolution => self.resolution.for_priority(priority),
        }
    }

    /// Every target must be a positive number of minutes
    pub fn validate(&self) -> Result<(), String> {
        for (kind, targets) in [("response", &self.response), ("resolution", &self.resolution)] {
            for (priority, minutes) in targets.all() {
                if minutes <= 0 {
                    return Err(format!(
                        "sla.{}.{} must be a positive number of minutes, got {}",
                        kind, priority, minutes
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for SlaTargetTable {
    fn default() -> Self {
        Self {
            response: default_response_targets(),
            resolution: default_resolution_targets(),
        }
    }
}

fn default_response_targets() -> PriorityTargets {
    PriorityTargets {
        low: 480,     // 8 hours
        medium: 240,  // 4 hours
        high: 60,     // 1 hour
        critical: 30, // 30 minutes
    }
}

fn default_resolution_targets() -> PriorityTargets {
    PriorityTargets {
        low: 2880,     // 48 hours
        medium: 1440,  // 24 hours
        high: 480,     // 8 hours
        critical: 240, // 4 hours
    }
}
