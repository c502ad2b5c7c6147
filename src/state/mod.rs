pub mod memory;
pub mod snapshot;
pub mod store;

pub use memory::InMemoryTicketStore;
pub use snapshot::{load_snapshot, write_snapshot};
pub use store::*;
