pub mod caller;
pub mod ticket;

pub use caller::*;
pub use ticket::*;
