//! Stateful in-memory store. Insertion-ordered, `Mutex`-guarded.
//!
//! Backs tests and `--dry-run` ingestion: same contract as `PgStore`,
//! including stored-order company scans and conflict-safe creation.

use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use fuelpulse_common::{
    Company, CompanyId, FuelPulseError, Lead, LeadId, NewCompany, NewLead, NotificationTarget,
    SubscriberFilter,
};

use crate::traits::LeadStore;
use crate::Result;

#[derive(Default)]
struct Inner {
    companies: Vec<Company>,
    leads: Vec<Lead>,
    subscribers: Vec<NotificationTarget>,
    subscriber_queries: usize,
    fail_writes: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a subscriber.
    pub fn with_subscriber(self, target: NotificationTarget) -> Self {
        self.inner.lock().unwrap().subscribers.push(target);
        self
    }

    /// Builder: make every write fail with a storage error. For tests that
    /// assert the no-retry propagation path.
    pub fn with_failing_writes(self) -> Self {
        self.inner.lock().unwrap().fail_writes = true;
        self
    }

    /// Snapshot of stored leads, in insertion order.
    pub fn leads(&self) -> Vec<Lead> {
        self.inner.lock().unwrap().leads.clone()
    }

    /// Snapshot of stored companies, in insertion order.
    pub fn companies(&self) -> Vec<Company> {
        self.inner.lock().unwrap().companies.clone()
    }

    /// How many times the subscriber list was fetched. Lets tests assert
    /// the notification gate was never crossed.
    pub fn subscriber_queries(&self) -> usize {
        self.inner.lock().unwrap().subscriber_queries
    }
}

#[async_trait::async_trait]
impl LeadStore for MemoryStore {
    async fn resolve_exact(&self, canonical_key: &str) -> Result<Option<CompanyId>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .companies
            .iter()
            .find(|c| c.normalized_name == canonical_key)
            .map(|c| c.id))
    }

    async fn scan_companies(&self) -> Result<Vec<(CompanyId, String)>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .companies
            .iter()
            .map(|c| (c.id, c.normalized_name.clone()))
            .collect())
    }

    async fn create_company(&self, company: &NewCompany) -> Result<CompanyId> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(FuelPulseError::Storage("writes disabled".into()));
        }

        // Conflict-safe: a racing creation of the same key returns the
        // surviving row instead of inserting a duplicate.
        if let Some(existing) = inner
            .companies
            .iter()
            .find(|c| c.normalized_name == company.normalized_name)
        {
            return Ok(existing.id);
        }

        let id = Uuid::new_v4();
        inner.companies.push(Company {
            id,
            name: company.name.clone(),
            normalized_name: company.normalized_name.clone(),
            industry: company.industry.clone(),
            location: company.location.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn create_lead(&self, lead: &NewLead) -> Result<LeadId> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(FuelPulseError::Storage("writes disabled".into()));
        }

        let id = Uuid::new_v4();
        inner.leads.push(Lead {
            id,
            company_id: lead.company_id,
            signal_type: lead.signal_type.clone(),
            signal_text: lead.signal_text.clone(),
            source_name: lead.source_name.clone(),
            source_url: lead.source_url.clone(),
            products_mentioned: lead.products_mentioned.clone(),
            confidence: lead.confidence,
            breakdown: lead.breakdown,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_subscribers(
        &self,
        filter: &SubscriberFilter,
    ) -> Result<Vec<NotificationTarget>> {
        let mut inner = self.inner.lock().unwrap();
        inner.subscriber_queries += 1;
        Ok(inner
            .subscribers
            .iter()
            .filter(|s| matches_scope(s, filter))
            .cloned()
            .collect())
    }
}

/// Mirror of the Postgres scope predicate: empty product scope matches
/// everything, otherwise codes must overlap; a territory constraint only
/// applies when both sides carry one.
fn matches_scope(sub: &NotificationTarget, filter: &SubscriberFilter) -> bool {
    let product_ok = sub.product_codes.is_empty()
        || sub
            .product_codes
            .iter()
            .any(|c| filter.product_codes.contains(c));

    let territory_ok = match (&sub.territory, &filter.territory) {
        (Some(s), Some(f)) => s.eq_ignore_ascii_case(f),
        _ => true,
    };

    product_ok && territory_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(name: &str, key: &str) -> NewCompany {
        NewCompany {
            name: name.to_string(),
            normalized_name: key.to_string(),
            industry: None,
            location: None,
        }
    }

    #[tokio::test]
    async fn create_company_is_conflict_safe() {
        let store = MemoryStore::new();
        let a = store.create_company(&company("Tata Power Ltd", "tata power")).await.unwrap();
        let b = store
            .create_company(&company("Tata Power Company Limited", "tata power"))
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(store.companies().len(), 1);
    }

    #[tokio::test]
    async fn scan_preserves_insertion_order() {
        let store = MemoryStore::new();
        let first = store.create_company(&company("Alpha", "alpha steel")).await.unwrap();
        let second = store.create_company(&company("Beta", "beta cement")).await.unwrap();

        let scanned = store.scan_companies().await.unwrap();
        assert_eq!(scanned[0], (first, "alpha steel".to_string()));
        assert_eq!(scanned[1], (second, "beta cement".to_string()));
    }

    #[tokio::test]
    async fn subscriber_scope_filters_by_product_overlap() {
        let all = NotificationTarget {
            phone: Some("+911111111111".into()),
            email: None,
            push_enabled: true,
            email_enabled: false,
            territory: None,
            product_codes: vec![],
        };
        let bitumen_only = NotificationTarget {
            product_codes: vec!["BITUMEN".into()],
            ..all.clone()
        };
        let store = MemoryStore::new()
            .with_subscriber(all)
            .with_subscriber(bitumen_only);

        let filter = SubscriberFilter {
            territory: None,
            product_codes: vec!["FO".into()],
        };
        assert_eq!(store.list_subscribers(&filter).await.unwrap().len(), 1);

        let filter = SubscriberFilter {
            territory: None,
            product_codes: vec!["BITUMEN".into(), "FO".into()],
        };
        assert_eq!(store.list_subscribers(&filter).await.unwrap().len(), 2);
    }
}
