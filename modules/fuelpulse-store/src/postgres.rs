//! Postgres-backed store.

use sqlx::postgres::PgPool;
use tracing::debug;
use uuid::Uuid;

use fuelpulse_common::{
    CompanyId, FuelPulseError, LeadId, NewCompany, NewLead, NotificationTarget, SubscriberFilter,
};

use crate::traits::LeadStore;
use crate::Result;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to Postgres and return a store over a fresh pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await.map_err(storage)?;
        Ok(Self { pool })
    }

    /// Run the embedded SQL migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| FuelPulseError::Storage(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl LeadStore for PgStore {
    async fn resolve_exact(&self, canonical_key: &str) -> Result<Option<CompanyId>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM companies WHERE normalized_name = $1",
        )
        .bind(canonical_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)
    }

    async fn scan_companies(&self) -> Result<Vec<(CompanyId, String)>> {
        sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, normalized_name FROM companies ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)
    }

    async fn create_company(&self, company: &NewCompany) -> Result<CompanyId> {
        // Upsert-with-unique-constraint: two resolvers racing on the same
        // canonical key both end up with the one surviving row.
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO companies (name, normalized_name, industry, location)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (normalized_name) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&company.name)
        .bind(&company.normalized_name)
        .bind(&company.industry)
        .bind(&company.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        match inserted {
            Some(id) => Ok(id),
            None => {
                // Lost the race — the row exists now.
                debug!(key = %company.normalized_name, "Company creation raced; reusing existing row");
                sqlx::query_scalar::<_, Uuid>(
                    "SELECT id FROM companies WHERE normalized_name = $1",
                )
                .bind(&company.normalized_name)
                .fetch_one(&self.pool)
                .await
                .map_err(storage)
            }
        }
    }

    async fn create_lead(&self, lead: &NewLead) -> Result<LeadId> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO leads
                (company_id, signal_type, signal_text, source_name, source_url,
                 products_mentioned, confidence,
                 intent_score, freshness_score, size_score, geography_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(lead.company_id)
        .bind(&lead.signal_type)
        .bind(&lead.signal_text)
        .bind(&lead.source_name)
        .bind(&lead.source_url)
        .bind(serde_json::json!(lead.products_mentioned))
        .bind(lead.confidence)
        .bind(lead.breakdown.intent)
        .bind(lead.breakdown.freshness)
        .bind(lead.breakdown.size)
        .bind(lead.breakdown.geography)
        .fetch_one(&self.pool)
        .await
        .map_err(storage)
    }

    async fn list_subscribers(
        &self,
        filter: &SubscriberFilter,
    ) -> Result<Vec<NotificationTarget>> {
        let rows = sqlx::query_as::<_, SubscriberRow>(
            r#"
            SELECT phone, email, push_enabled, email_enabled, territory, product_codes
            FROM subscribers
            WHERE (product_codes = '[]'::jsonb OR product_codes ?| $1)
              AND (territory IS NULL OR $2::text IS NULL OR lower(territory) = lower($2))
            ORDER BY created_at ASC
            "#,
        )
        .bind(&filter.product_codes)
        .bind(&filter.territory)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows.into_iter().map(SubscriberRow::into_target).collect())
    }
}

/// A row from the subscribers table.
#[derive(Debug, sqlx::FromRow)]
struct SubscriberRow {
    phone: Option<String>,
    email: Option<String>,
    push_enabled: bool,
    email_enabled: bool,
    territory: Option<String>,
    product_codes: serde_json::Value,
}

impl SubscriberRow {
    fn into_target(self) -> NotificationTarget {
        let product_codes = self
            .product_codes
            .as_array()
            .map(|codes| {
                codes
                    .iter()
                    .filter_map(|c| c.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        NotificationTarget {
            phone: self.phone,
            email: self.email,
            push_enabled: self.push_enabled,
            email_enabled: self.email_enabled,
            territory: self.territory,
            product_codes,
        }
    }
}

fn storage(e: sqlx::Error) -> FuelPulseError {
    FuelPulseError::Storage(e.to_string())
}
