//! Report export formats

use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::analytics::metrics::{AnalystMetrics, OverallStats};
use crate::analytics::reports::SlaReport;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display, EnumString};
use tokio::fs;

/// Export format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Parse a user-supplied format name
    pub fn from_name(name: &str) -> AnalyticsResult<Self> {
        name.trim()
            .parse()
            .map_err(|_| AnalyticsError::UnsupportedFormat(format!("unknown export format '{}'", name)))
    }

    /// Get file extension for this format
    pub fn extension(&self) -> &str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// Get MIME type for this format
    pub fn mime_type(&self) -> &str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

const CSV_HEADER: &str = "analyst_id,analyst_name,total_tickets,resolved_tickets,\
avg_response_time,avg_resolution_time,sla_response_compliance,sla_resolution_compliance\n";

/// Report exporter
pub struct ReportExporter;

impl ReportExporter {
    /// Render a report in memory
    pub fn render(report: &SlaReport, format: ExportFormat) -> AnalyticsResult<Vec<u8>> {
        match format {
            ExportFormat::Json => serde_json::to_vec_pretty(report).map_err(|e| {
                AnalyticsError::ExportFailed(format!("JSON serialization failed: {}", e))
            }),
            ExportFormat::Csv => Ok(Self::render_csv(report).into_bytes()),
        }
    }

    /// Render a report and write it to `output_path`
    pub async fn export(
        report: &SlaReport,
        format: ExportFormat,
        output_path: &Path,
    ) -> AnalyticsResult<Vec<u8>> {
        let bytes = Self::render(report, format)?;

        fs::write(output_path, &bytes).await.map_err(|e| {
            AnalyticsError::ExportFailed(format!(
                "Failed to write {}: {}",
                output_path.display(),
                e
            ))
        })?;

        tracing::info!(
            report_id = %report.id,
            format = %format,
            path = %output_path.display(),
            bytes = bytes.len(),
            "SLA report exported"
        );

        Ok(bytes)
    }

    fn render_csv(report: &SlaReport) -> String {
        let mut csv = String::from(CSV_HEADER);

        for analyst in &report.per_analyst {
            csv.push_str(&Self::analyst_row(analyst));
        }
        csv.push_str(&Self::overall_row(&report.overall));

        csv
    }

    fn analyst_row(m: &AnalystMetrics) -> String {
        format!(
            "\"{}\",\"{}\",{},{},{:.1},{:.1},{:.1},{:.1}\n",
            Self::escape_csv(&m.analyst_id),
            Self::escape_csv(&m.analyst_name),
            m.total_tickets,
            m.resolved_tickets,
            m.avg_response_time,
            m.avg_resolution_time,
            m.sla_response_compliance,
            m.sla_resolution_compliance,
        )
    }

    fn overall_row(o: &OverallStats) -> String {
        format!(
            "\"overall\",\"\",{},{},{:.1},{:.1},{:.1},{:.1}\n",
            o.total_tickets,
            o.resolved_tickets,
            o.avg_response_time,
            o.avg_resolution_time,
            o.response_compliance,
            o.resolution_compliance,
        )
    }

    /// Escape CSV special characters
    fn escape_csv(s: &str) -> String {
        s.replace('"', "\"\"")
    }
}
