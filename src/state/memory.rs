use crate::error::Result;
use crate::models::Ticket;
use crate::state::store::{sort_newest_first, TicketSource};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory ticket store, fed from a snapshot of the hosted database
#[derive(Clone, Default)]
pub struct InMemoryTicketStore {
    tickets: Arc<DashMap<Uuid, Ticket>>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        let store = Self::new();
        for ticket in tickets {
            store.tickets.insert(ticket.id, ticket);
        }
        store
    }

    /// Number of stored tickets, archived ones included
    pub fn stored(&self) -> usize {
        self.tickets.len()
    }
}

#[async_trait]
impl TicketSource for InMemoryTicketStore {
    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|entry| !entry.archived)
            .map(|entry| entry.value().clone())
            .collect();
        sort_newest_first(&mut tickets);
        Ok(tickets)
    }

    async fn replace_all(&self, tickets: Vec<Ticket>) -> Result<usize> {
        self.tickets.clear();
        for ticket in tickets {
            self.tickets.insert(ticket.id, ticket);
        }
        tracing::debug!(tickets = self.tickets.len(), "Ticket snapshot loaded");
        Ok(self.tickets.len())
    }

    async fn upsert(&self, ticket: Ticket) -> Result<()> {
        tracing::debug!(ticket_id = %ticket.id, "Ticket upserted");
        self.tickets.insert(ticket.id, ticket);
        Ok(())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.tickets.iter().filter(|entry| !entry.archived).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_list_is_newest_first_and_skips_archived() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let store = InMemoryTicketStore::with_tickets(vec![
            Ticket::new("old", Priority::Low, t0),
            Ticket::new("new", Priority::Low, t0 + Duration::hours(2)),
            Ticket::new("mid", Priority::Low, t0 + Duration::hours(1)),
            Ticket::new("gone", Priority::Low, t0 + Duration::hours(3)).archive(),
        ]);

        let titles: Vec<_> = store
            .list_tickets()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
        assert_eq!(store.count().await.unwrap(), 3);
        assert_eq!(store.stored(), 4);
    }

    #[tokio::test]
    async fn test_replace_and_upsert() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let store = InMemoryTicketStore::with_tickets(vec![Ticket::new("a", Priority::Low, t0)]);

        let replaced = store
            .replace_all(vec![
                Ticket::new("b", Priority::High, t0),
                Ticket::new("c", Priority::High, t0),
            ])
            .await
            .unwrap();
        assert_eq!(replaced, 2);

        let mut ticket = store.list_tickets().await.unwrap().remove(0);
        ticket.title = "renamed".to_string();
        store.upsert(ticket.clone()).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
        assert!(store
            .list_tickets()
            .await
            .unwrap()
            .iter()
            .any(|t| t.id == ticket.id && t.title == "renamed"));
    }
}
