//! Product inference — keyword/context scan against the catalog.

use fuelpulse_common::{ProductMatch, ProductRule};

use crate::catalog::DEFAULT_CATALOG;
use crate::scoring::round2;

/// Candidates below this confidence are dropped. Independent of each
/// rule's own `min_confidence` review threshold.
pub const INCLUSION_FLOOR: f64 = 0.4;

const KEYWORD_WEIGHT: f64 = 0.6;
const CONTEXT_WEIGHT: f64 = 0.3;

pub struct InferenceEngine {
    rules: &'static [ProductRule],
    floor: f64,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG)
    }
}

impl InferenceEngine {
    pub fn new(rules: &'static [ProductRule]) -> Self {
        Self {
            rules,
            floor: INCLUSION_FLOOR,
        }
    }

    /// Override the inclusion floor.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Rank catalog products against a signal text. Each rule scores
    /// independently: first primary keyword hit adds 0.6, first context
    /// hit adds 0.3, capped at 1.0. The result is sorted descending by
    /// confidence; ties keep catalog order. No match yields an empty list.
    pub fn infer(&self, text: &str) -> Vec<ProductMatch> {
        let text_lower = text.to_lowercase();
        let mut results = Vec::new();

        for rule in self.rules {
            let mut confidence = 0.0;
            let mut reasons = Vec::new();

            // Only one keyword's credit counted per product.
            if let Some(kw) = rule.keywords.iter().find(|kw| text_lower.contains(*kw)) {
                confidence += KEYWORD_WEIGHT;
                reasons.push(format!("Matched keyword: '{kw}'"));
            }

            if let Some(ctx) = rule.contexts.iter().find(|ctx| text_lower.contains(*ctx)) {
                confidence += CONTEXT_WEIGHT;
                reasons.push(format!("Matched context: '{ctx}'"));
            }

            let confidence = confidence.min(1.0);
            if confidence >= self.floor {
                results.push(ProductMatch {
                    code: rule.code.to_string(),
                    name: rule.name.to_string(),
                    confidence: round2(confidence),
                    reasoning: reasons.join("; "),
                });
            }
        }

        results.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_plus_context_scores_first() {
        let engine = InferenceEngine::default();
        let results = engine.infer("Tender for Furnace Oil for boiler heating");

        let top = &results[0];
        assert_eq!(top.code, "FO");
        assert_eq!(top.confidence, 0.9);
        assert!(top.reasoning.contains("furnace oil"));
        assert!(top.reasoning.contains("boiler"));
    }

    #[test]
    fn only_first_keyword_hit_counts() {
        let engine = InferenceEngine::default();
        // Two FO keywords present; credit is still a single 0.6.
        let results = engine.infer("supply of fuel oil and bunker fuel");
        let fo = results.iter().find(|r| r.code == "FO").unwrap();
        assert_eq!(fo.confidence, 0.6);
        assert!(fo.reasoning.contains("fuel oil"));
        assert!(!fo.reasoning.contains("bunker fuel"));
    }

    #[test]
    fn context_only_match_falls_below_floor() {
        let engine = InferenceEngine::default();
        // "boiler" alone gives FO 0.3 — dropped.
        let results = engine.infer("new boiler installation");
        assert!(results.iter().all(|r| r.code != "FO"));
    }

    #[test]
    fn confidences_stay_within_bounds() {
        let engine = InferenceEngine::default();
        for text in [
            "Tender for Furnace Oil for boiler heating",
            "diesel genset with bitumen road construction and hexane solvent extraction",
            "jbo jute batching oil for jute textile mill",
            "nothing relevant here",
            "",
        ] {
            for m in engine.infer(text) {
                assert!(m.confidence >= INCLUSION_FLOOR, "{} below floor for {text:?}", m.code);
                assert!(m.confidence <= 1.0, "{} above cap for {text:?}", m.code);
            }
        }
    }

    #[test]
    fn sorts_descending_with_stable_catalog_order_ties() {
        let engine = InferenceEngine::default();
        // HSD keyword+context (0.9); FO and BITUMEN keyword-only (0.6 each,
        // FO earlier in the catalog).
        let results =
            engine.infer("diesel for genset, plus fuel oil and bitumen supply");
        let codes: Vec<&str> = results.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["HSD", "FO", "BITUMEN"]);
    }

    #[test]
    fn no_match_yields_empty_list() {
        let engine = InferenceEngine::default();
        assert!(engine.infer("quarterly software results").is_empty());
    }
}
