use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use meuchapa_support_hub::analytics::{
    compute_sla_metrics, DateRange, ExportFormat, ReportExporter, SlaReport,
};
use meuchapa_support_hub::api::{CALLER_ID_HEADER, CALLER_ROLE_HEADER};
use meuchapa_support_hub::config::Config;
use meuchapa_support_hub::models::{AnalystFilter, CallerContext, Role};
use meuchapa_support_hub::state::load_snapshot;
use reqwest::Client;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meuchapa-cli")]
#[command(about = "MeuChapa Support Hub SLA tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute an SLA report from a ticket snapshot file
    Report {
        /// JSON array of tickets
        #[arg(short, long)]
        tickets: PathBuf,

        #[arg(short, long)]
        start: NaiveDate,

        #[arg(short, long)]
        end: NaiveDate,

        #[arg(short, long, default_value = "admin")]
        role: Role,

        #[arg(short, long, default_value = "cli")]
        caller: String,

        /// Analyst id, or "all"
        #[arg(short, long, default_value = "all")]
        analyst: String,

        /// Output format: json, csv or table
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Optional config file for SLA target overrides
        #[arg(long, env = "MEUCHAPA_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Fetch an SLA report from a running server
    Remote {
        #[arg(long, default_value = "http://localhost:8080")]
        endpoint: String,

        #[arg(short, long)]
        start: NaiveDate,

        #[arg(short, long)]
        end: NaiveDate,

        #[arg(short, long, default_value = "all")]
        analyst: String,

        #[arg(short, long)]
        caller: String,

        #[arg(short, long, default_value = "analyst")]
        role: Role,
    },

    /// Check server health
    Health {
        #[arg(long, default_value = "http://localhost:8080")]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            tickets,
            start,
            end,
            role,
            caller,
            analyst,
            format,
            config,
        } => {
            let config = Config::load_from(config).context("loading configuration")?;
            let snapshot = load_snapshot(&tickets)
                .await
                .with_context(|| format!("reading {}", tickets.display()))?;

            let range = DateRange::new(start, end);
            if !range.is_ordered() {
                bail!("start date {} is after end date {}", start, end);
            }

            let caller = CallerContext::new(role, caller);
            let filter = AnalystFilter::from_param(Some(&analyst));
            let aggregate = compute_sla_metrics(&snapshot, &range, &filter, &caller, &config.sla);
            let report = SlaReport::new(range, filter, &caller, aggregate);

            if format.eq_ignore_ascii_case("table") {
                print_table(&report);
            } else {
                let format = ExportFormat::from_name(&format)?;
                let bytes = ReportExporter::render(&report, format)?;
                println!("{}", String::from_utf8_lossy(&bytes));
            }
        }

        Commands::Remote {
            endpoint,
            start,
            end,
            analyst,
            caller,
            role,
        } => {
            let client = Client::new();
            let response = client
                .get(format!("{}/v1/analytics/sla", endpoint))
                .query(&[
                    ("start_date", start.to_string()),
                    ("end_date", end.to_string()),
                    ("analyst_id", analyst),
                ])
                .header(CALLER_ID_HEADER, caller)
                .header(CALLER_ROLE_HEADER, role.to_string())
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body: serde_json::Value = response.json().await.unwrap_or_default();
                bail!("server returned {}: {}", status, body);
            }

            let report: SlaReport = response.json().await?;
            print_table(&report);
        }

        Commands::Health { endpoint } => {
            let response = Client::new()
                .get(format!("{}/health", endpoint))
                .send()
                .await?;

            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

fn print_table(report: &SlaReport) {
    println!(
        "SLA report {} to {} (analyst: {})",
        report.start_date, report.end_date, report.analyst_filter
    );
    println!("{}", report.summary);
    println!();
    println!(
        "{:<24} {:>7} {:>8} {:>10} {:>10} {:>8} {:>8}",
        "analyst", "tickets", "resolved", "avg resp", "avg resol", "resp %", "resol %"
    );

    for m in &report.per_analyst {
        println!(
            "{:<24} {:>7} {:>8} {:>10.1} {:>10.1} {:>8.1} {:>8.1}",
            truncate(&m.analyst_name, 24),
            m.total_tickets,
            m.resolved_tickets,
            m.avg_response_time,
            m.avg_resolution_time,
            m.sla_response_compliance,
            m.sla_resolution_compliance,
        );
    }

    let o = &report.overall;
    println!(
        "{:<24} {:>7} {:>8} {:>10.1} {:>10.1} {:>8.1} {:>8.1}",
        "overall",
        o.total_tickets,
        o.resolved_tickets,
        o.avg_response_time,
        o.avg_resolution_time,
        o.response_compliance,
        o.resolution_compliance,
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).chain(std::iter::once('…')).collect()
    }
}
