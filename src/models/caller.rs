use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

/// Role granted by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    User,
    Analyst,
    Admin,
}

impl Role {
    /// Staff roles see tickets beyond the ones they created
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Analyst | Role::Admin)
    }

    /// Only admins may look at other analysts' metrics
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Identity of whoever is asking for metrics
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerContext {
    pub role: Role,
    pub caller_id: String,
}

impl CallerContext {
    pub fn new(role: Role, caller_id: impl Into<String>) -> Self {
        Self {
            role,
            caller_id: caller_id.into(),
        }
    }

    pub fn admin(caller_id: impl Into<String>) -> Self {
        Self::new(Role::Admin, caller_id)
    }

    pub fn analyst(caller_id: impl Into<String>) -> Self {
        Self::new(Role::Analyst, caller_id)
    }
}

/// Analyst selection sent by the analytics view.
///
/// On the wire this is a plain string where `"all"` (or an empty value) is the
/// sentinel for every analyst.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalystFilter {
    #[default]
    All,
    Analyst(String),
}

impl AnalystFilter {
    pub const ALL_SENTINEL: &'static str = "all";

    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => AnalystFilter::All,
            Some(v) if v.eq_ignore_ascii_case(Self::ALL_SENTINEL) => AnalystFilter::All,
            Some(v) => AnalystFilter::Analyst(v.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, AnalystFilter::All)
    }
}

impl From<String> for AnalystFilter {
    fn from(value: String) -> Self {
        AnalystFilter::from_param(Some(&value))
    }
}

impl From<AnalystFilter> for String {
    fn from(filter: AnalystFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for AnalystFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalystFilter::All => f.write_str(Self::ALL_SENTINEL),
            AnalystFilter::Analyst(id) => f.write_str(id),
        }
    }
}
