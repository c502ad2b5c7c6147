use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// A support ticket as exported by the ticketing store.
///
/// The SLA engine only reads `priority`, `created_at`, `first_response_at`,
/// `closed_at`, `assigned_to` and `assignee_display_name`; the remaining fields
/// are carried for the store and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Ticket {
    /// Unique identifier
    pub id: Uuid,

    /// Short subject line
    #[serde(default)]
    #[validate(length(max = 500))]
    pub title: String,

    /// Priority level
    pub priority: Priority,

    /// Workflow status
    #[serde(default)]
    pub status: TicketStatus,

    /// Sector the ticket was filed against
    #[serde(default)]
    pub sector: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// First staff reply, if any
    #[serde(default)]
    pub first_response_at: Option<DateTime<Utc>>,

    /// Closure timestamp, if closed
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,

    /// Assigned analyst identity
    #[serde(default)]
    #[validate(length(min = 1))]
    pub assigned_to: Option<String>,

    /// Assigned analyst display name, resolved by the profile store
    #[serde(default)]
    pub assignee_display_name: Option<String>,

    /// Archived tickets are kept by the store but never listed
    #[serde(default)]
    pub archived: bool,
}

impl Ticket {
    /// Create an open, unassigned ticket
    pub fn new(title: impl Into<String>, priority: Priority, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            priority,
            status: TicketStatus::Open,
            sector: None,
            created_at,
            first_response_at: None,
            closed_at: None,
            assigned_to: None,
            assignee_display_name: None,
            archived: false,
        }
    }

    /// Assign the ticket to an analyst
    pub fn assigned_to(mut self, analyst_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.assigned_to = Some(analyst_id.into());
        self.assignee_display_name = Some(display_name.into());
        self
    }

    /// Record the first staff response
    pub fn responded_at(mut self, at: DateTime<Utc>) -> Self {
        self.first_response_at = Some(at);
        if self.status == TicketStatus::Open {
            self.status = TicketStatus::InProgress;
        }
        self
    }

    /// Close the ticket
    pub fn closed_at(mut self, at: DateTime<Utc>) -> Self {
        self.closed_at = Some(at);
        self.status = TicketStatus::Closed;
        self
    }

    pub fn archive(mut self) -> Self {
        self.archived = true;
        self
    }

    /// Analyst identity, if the ticket is assigned
    pub fn assignee(&self) -> Option<&str> {
        self.assigned_to.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}

/// Ticket priority.
///
/// Deserialization is case-insensitive. Any value the ticket store sends that
/// is not one of the four known levels deserializes into `Unrecognized`, which
/// resolves to the medium SLA targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase", from = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
    Unrecognized,
}

impl Priority {
    /// Parse a priority, mapping unknown values to `Unrecognized`
    pub fn parse_lenient(value: &str) -> Self {
        value.trim().parse().unwrap_or(Priority::Unrecognized)
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Priority::parse_lenient(&value)
    }
}

/// Ticket workflow status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Waiting,
    Resolved,
    Closed,
}
