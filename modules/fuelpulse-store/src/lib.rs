//! Persistence for companies, leads, and notification subscribers.
//!
//! The pipeline talks to storage through the [`LeadStore`] trait only.
//! Two implementations:
//!
//! - [`PgStore`] — Postgres via sqlx, embedded migrations. Production.
//! - [`MemoryStore`] — insertion-ordered in-memory store. Tests and dry runs.

pub mod memory;
pub mod postgres;
pub mod traits;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use traits::LeadStore;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, fuelpulse_common::FuelPulseError>;
