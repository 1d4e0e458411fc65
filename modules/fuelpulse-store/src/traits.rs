//! Trait abstraction over the persistence store.
//!
//! The resolver and orchestrator depend on this trait, never on a concrete
//! store — deterministic tests run against `MemoryStore` with no database.

use async_trait::async_trait;

use fuelpulse_common::{
    CompanyId, LeadId, NewCompany, NewLead, NotificationTarget, SubscriberFilter,
};

use crate::Result;

#[async_trait]
pub trait LeadStore: Send + Sync {
    /// O(1) exact lookup of a company by canonical key.
    async fn resolve_exact(&self, canonical_key: &str) -> Result<Option<CompanyId>>;

    /// All stored companies as `(id, canonical_key)`, in stable stored
    /// (insertion) order. The fuzzy matcher's first-qualifying-match-wins
    /// semantics depend on this order being reproducible.
    async fn scan_companies(&self) -> Result<Vec<(CompanyId, String)>>;

    /// Create a company, conflict-safe on `normalized_name`: two concurrent
    /// resolvers racing on the same key both get the one surviving row.
    async fn create_company(&self, company: &NewCompany) -> Result<CompanyId>;

    /// Persist a lead in a single atomic write. Confidence and the scoring
    /// breakdown land together; there is no partial-state window.
    async fn create_lead(&self, lead: &NewLead) -> Result<LeadId>;

    /// Subscribers whose routing scope matches the filter.
    async fn list_subscribers(&self, filter: &SubscriberFilter)
        -> Result<Vec<NotificationTarget>>;
}
