//! Error types for analytics operations

use crate::error::AppError;

/// Result type for analytics operations
pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

/// Errors raised around the SLA engine.
///
/// The computation itself never fails; these cover request validation, the
/// ticket source and export.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Invalid date range
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// Ticket source failed
    #[error("Ticket source error: {0}")]
    Source(String),

    /// Export failed
    #[error("Export failed: {0}")]
    ExportFailed(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::InvalidDateRange(msg) | AnalyticsError::UnsupportedFormat(msg) => {
                AppError::Validation(msg)
            }
            _ => AppError::Internal(err.to_string()),
        }
    }
}
