//! JSON ticket snapshots exported from the hosted database

use crate::error::{AppError, Result};
use crate::models::Ticket;
use std::path::Path;
use validator::Validate;

/// Read a JSON array of tickets, validating each record
pub async fn load_snapshot(path: &Path) -> Result<Vec<Ticket>> {
    let raw = tokio::fs::read(path).await?;
    let tickets: Vec<Ticket> = serde_json::from_slice(&raw)?;

    for ticket in &tickets {
        ticket.validate().map_err(|e| {
            AppError::Validation(format!("ticket {} in {}: {}", ticket.id, path.display(), e))
        })?;
    }

    tracing::info!(path = %path.display(), tickets = tickets.len(), "Ticket snapshot read");
    Ok(tickets)
}

/// Write tickets as a pretty-printed JSON array
pub async fn write_snapshot(path: &Path, tickets: &[Ticket]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(tickets)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
