//! Lead pipeline orchestrator.
//!
//! One `process` call per extracted signal, steps strictly ordered:
//! resolve → infer → score → persist → notify. The lead write is a single
//! atomic insert carrying both confidence and breakdown. Only storage
//! failures in steps 1–4 abort a signal; everything downstream of the
//! persisted lead is best-effort.

use std::sync::Arc;

use tracing::{info, warn};

use fuelpulse_common::{FuelPulseError, LeadId, NewLead, ProductMatch, Signal, SubscriberFilter};
use fuelpulse_store::LeadStore;

use crate::inference::InferenceEngine;
use crate::notify::{LeadSummary, NotificationRouter};
use crate::resolver::EntityResolver;
use crate::scoring::ScoringEngine;

/// Leads scoring at or above this reach the notification router.
pub const NOTIFY_THRESHOLD: f64 = 0.7;

pub struct LeadPipeline {
    store: Arc<dyn LeadStore>,
    resolver: EntityResolver,
    inference: InferenceEngine,
    scoring: ScoringEngine,
    router: NotificationRouter,
}

impl LeadPipeline {
    pub fn new(store: Arc<dyn LeadStore>, router: NotificationRouter) -> Self {
        Self {
            resolver: EntityResolver::new(store.clone()),
            inference: InferenceEngine::default(),
            scoring: ScoringEngine::new(),
            store,
            router,
        }
    }

    /// Turn one signal into a persisted lead, notifying subscribers when
    /// the score clears the threshold. Returns the lead id and ranked
    /// product candidates whether or not notification ran.
    pub async fn process(
        &self,
        signal: &Signal,
    ) -> Result<(LeadId, Vec<ProductMatch>), FuelPulseError> {
        // 1. Entity resolution
        let company_id = self
            .resolver
            .resolve(&signal.company_name, signal.industry.as_deref(), None)
            .await?;

        // 2. Product inference
        let products = self.inference.infer(&signal.text);

        // 3. Composite scoring. Location is not threaded through from the
        //    scrapers, so geography scores its absent-input default here.
        let score = self.scoring.score(
            &signal.signal_type,
            &signal.captured_at,
            &signal.text,
            None,
            None,
        );

        // 4. Persist the lead — confidence and breakdown in one write.
        let product_codes: Vec<String> = products.iter().map(|p| p.code.clone()).collect();
        let lead_id = self
            .store
            .create_lead(&NewLead {
                company_id,
                signal_type: signal.signal_type.clone(),
                signal_text: signal.text.clone(),
                source_name: signal.source_name.clone(),
                source_url: signal.source_url.clone(),
                products_mentioned: product_codes.clone(),
                confidence: score.final_score,
                breakdown: score.breakdown,
            })
            .await?;

        info!(
            lead = %lead_id,
            company = %signal.company_name,
            score = score.final_score,
            products = product_codes.len(),
            "Lead created"
        );

        // 5. Threshold-gated notification. Failures here are logged, never
        //    raised — the lead already exists.
        if score.final_score >= NOTIFY_THRESHOLD {
            let filter = SubscriberFilter {
                territory: None,
                product_codes: product_codes.clone(),
            };
            match self.store.list_subscribers(&filter).await {
                Ok(subscribers) => {
                    let summary = LeadSummary {
                        company_name: signal.company_name.clone(),
                        confidence: score.final_score,
                        signal_type: signal.signal_type.clone(),
                        products: product_codes,
                        source_name: signal.source_name.clone(),
                    };
                    let dispatched = self.router.notify(&summary, &subscribers).await;
                    info!(lead = %lead_id, dispatched, "Notification pass complete");
                }
                Err(e) => {
                    warn!(lead = %lead_id, error = %e, "Subscriber fetch failed; skipping notification");
                }
            }
        }

        Ok((lead_id, products))
    }
}
