//! Analytics engine: ticket source + SLA computation + report cache

use crate::analytics::aggregation::compute_sla_metrics;
use crate::analytics::error::{AnalyticsError, AnalyticsResult};
use crate::analytics::reports::{SlaReport, SlaReportRequest};
use crate::analytics::targets::SlaTargetTable;
use crate::metrics::{
    SLA_COMPUTATION_DURATION_SECONDS, SLA_REPORTS_GENERATED_TOTAL, SLA_REPORT_CACHE_HITS_TOTAL,
    SLA_WINDOW_TICKETS, TICKETS_IMPORTED_TOTAL,
};
use crate::models::Ticket;
use crate::state::TicketSource;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Configuration for the analytics engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// SLA targets in minutes
    #[serde(default)]
    pub sla_targets: SlaTargetTable,

    /// Cache TTL for reports (seconds), 0 disables caching
    pub report_cache_ttl_secs: u64,

    /// Maximum cached reports
    pub report_cache_capacity: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            sla_targets: SlaTargetTable::default(),
            report_cache_ttl_secs: 60,
            report_cache_capacity: 1_000,
        }
    }
}

/// Main analytics engine
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
    source: Arc<dyn TicketSource>,
    report_cache: Option<Cache<String, SlaReport>>,
    last_generated_at: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new(source: Arc<dyn TicketSource>, config: AnalyticsConfig) -> Self {
        let report_cache = (config.report_cache_ttl_secs > 0).then(|| {
            Cache::builder()
                .max_capacity(config.report_cache_capacity)
                .time_to_live(Duration::from_secs(config.report_cache_ttl_secs))
                .build()
        });

        Self {
            config,
            source,
            report_cache,
            last_generated_at: Arc::new(RwLock::new(None)),
        }
    }

    /// Create with default configuration
    pub fn with_defaults(source: Arc<dyn TicketSource>) -> Self {
        Self::new(source, AnalyticsConfig::default())
    }

    /// Generate (or fetch from cache) the SLA report for a request
    #[tracing::instrument(
        skip(self, request),
        fields(
            start = %request.range.start_date,
            end = %request.range.end_date,
            role = %request.caller.role,
        )
    )]
    pub async fn generate_sla_report(&self, request: &SlaReportRequest) -> AnalyticsResult<SlaReport> {
        request.validate()?;

        let cache_key = request.cache_key();
        if let Some(cache) = &self.report_cache {
            if let Some(report) = cache.get(&cache_key).await {
                SLA_REPORT_CACHE_HITS_TOTAL.inc();
                tracing::debug!(report_id = %report.id, "SLA report served from cache");
                return Ok(report);
            }
        }

        let tickets = self
            .source
            .list_tickets()
            .await
            .map_err(|e| AnalyticsError::Source(e.to_string()))?;

        let started = Instant::now();
        let aggregate = compute_sla_metrics(
            &tickets,
            &request.range,
            &request.analyst_filter,
            &request.caller,
            &self.config.sla_targets,
        );
        SLA_COMPUTATION_DURATION_SECONDS.observe(started.elapsed().as_secs_f64());
        SLA_WINDOW_TICKETS.set(aggregate.overall.total_tickets as f64);
        SLA_REPORTS_GENERATED_TOTAL
            .with_label_values(&[&request.caller.role.to_string()])
            .inc();

        tracing::debug!(
            source_tickets = tickets.len(),
            visible_tickets = aggregate.overall.total_tickets,
            analysts = aggregate.per_analyst.len(),
            "SLA metrics computed"
        );

        let report = SlaReport::new(
            request.range,
            request.analyst_filter.clone(),
            &request.caller,
            aggregate,
        );

        *self.last_generated_at.write() = Some(report.generated_at);

        if let Some(cache) = &self.report_cache {
            cache.insert(cache_key, report.clone()).await;
        }

        Ok(report)
    }

    /// Replace the whole ticket snapshot
    pub async fn import_tickets(&self, tickets: Vec<Ticket>) -> AnalyticsResult<usize> {
        let imported = self
            .source
            .replace_all(tickets)
            .await
            .map_err(|e| AnalyticsError::Source(e.to_string()))?;

        TICKETS_IMPORTED_TOTAL.inc_by(imported as f64);
        self.clear_cache();
        tracing::info!(imported, "Ticket snapshot replaced");

        Ok(imported)
    }

    /// Insert or update a single ticket
    pub async fn upsert_ticket(&self, ticket: Ticket) -> AnalyticsResult<()> {
        self.source
            .upsert(ticket)
            .await
            .map_err(|e| AnalyticsError::Source(e.to_string()))?;
        self.clear_cache();
        Ok(())
    }

    pub async fn ticket_count(&self) -> AnalyticsResult<u64> {
        self.source
            .count()
            .await
            .map_err(|e| AnalyticsError::Source(e.to_string()))
    }

    /// Clear report cache
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.report_cache {
            cache.invalidate_all();
        }
    }

    /// Get cache statistics
    pub async fn get_cache_stats(&self) -> CacheStats {
        match &self.report_cache {
            Some(cache) => {
                cache.run_pending_tasks().await;
                CacheStats {
                    enabled: true,
                    cached_reports: cache.entry_count(),
                }
            }
            None => CacheStats {
                enabled: false,
                cached_reports: 0,
            },
        }
    }

    pub fn last_generated_at(&self) -> Option<DateTime<Utc>> {
        *self.last_generated_at.read()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub cached_reports: u64,
}
