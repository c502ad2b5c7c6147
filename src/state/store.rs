use crate::error::Result;
use crate::models::Ticket;
use async_trait::async_trait;

/// Read side of the ticketing store as seen by the analytics engine
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Non-archived tickets, newest first
    async fn list_tickets(&self) -> Result<Vec<Ticket>>;

    /// Swap the whole snapshot, returns the number of tickets stored
    async fn replace_all(&self, tickets: Vec<Ticket>) -> Result<usize>;

    /// Insert or overwrite a single ticket
    async fn upsert(&self, ticket: Ticket) -> Result<()>;

    /// Number of non-archived tickets
    async fn count(&self) -> Result<u64>;
}

/// Order tickets the way the analytics view receives them
pub fn sort_newest_first(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}
