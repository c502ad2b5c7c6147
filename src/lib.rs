//! MeuChapa Support Hub: SLA metrics engine and analytics service
//!
//! The [`analytics`] module holds the pure SLA computation over ticket
//! records. [`state`] supplies tickets, [`api`] exposes reports over HTTP and
//! [`metrics`] instruments both.

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod state;

pub use error::{AppError, Result};
