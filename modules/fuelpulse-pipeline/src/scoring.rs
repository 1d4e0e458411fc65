//! Composite lead scoring.
//!
//! `final = w_intent·intent + w_fresh·freshness + w_size·size + w_geo·geography`
//!
//! Every component degrades to a safe default on missing or malformed
//! input; scoring never fails.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use fuelpulse_common::{LeadScore, ScoreBreakdown};

/// Freshness decay rate: ~90% after one day, ~50% after seven.
const DECAY_RATE: f64 = 0.1;

const HUGE_INDICATORS: &[&str] = &["billion", "mega project", "massive expansion", "integrated plant"];
const LARGE_INDICATORS: &[&str] = &["million", "crore", "large scale", "capacity expansion"];
const MEDIUM_INDICATORS: &[&str] = &["sme", "mid-sized", "growing"];

/// Component weights. Must sum to 1.0; the engine asserts this on
/// construction.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub intent: f64,
    pub freshness: f64,
    pub size: f64,
    pub geography: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            intent: 0.4,
            freshness: 0.3,
            size: 0.2,
            geography: 0.1,
        }
    }
}

pub struct ScoringEngine {
    weights: Weights,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::with_weights(Weights::default())
    }

    pub fn with_weights(weights: Weights) -> Self {
        let sum = weights.intent + weights.freshness + weights.size + weights.geography;
        assert!(
            (sum - 1.0).abs() < 1e-9,
            "scoring weights must sum to 1.0, got {sum}"
        );
        Self { weights }
    }

    /// Composite score with per-component breakdown, rounded to 2 decimals.
    pub fn score(
        &self,
        signal_type: &str,
        captured_at: &str,
        text: &str,
        location: Option<&str>,
        territory: Option<&str>,
    ) -> LeadScore {
        let breakdown = ScoreBreakdown {
            intent: intent_score(signal_type),
            freshness: freshness_score(captured_at, Utc::now()),
            size: size_score(text),
            geography: geo_score(location, territory),
        };

        let final_score = round2(
            self.weights.intent * breakdown.intent
                + self.weights.freshness * breakdown.freshness
                + self.weights.size * breakdown.size
                + self.weights.geography * breakdown.geography,
        );

        LeadScore {
            final_score,
            breakdown,
        }
    }
}

/// Purchase-intent weight of the signal type. Unknown types sit at the
/// news-level default.
fn intent_score(signal_type: &str) -> f64 {
    match signal_type.to_lowercase().as_str() {
        "tender" => 1.0,
        "procurement" => 0.9,
        "expansion" => 0.8,
        "commissioning" => 0.75,
        "news" => 0.5,
        "directory" => 0.3,
        _ => 0.5,
    }
}

/// Exponential age decay on whole elapsed days. Unparseable timestamps
/// score as maximally fresh rather than erroring.
fn freshness_score(captured_at: &str, now: DateTime<Utc>) -> f64 {
    let Some(captured) = parse_timestamp(captured_at) else {
        return 1.0;
    };
    let days = (now - captured).num_days().max(0);
    round2((-DECAY_RATE * days as f64).exp())
}

/// Accept RFC 3339, bare ISO datetimes, and bare dates — scrapers store
/// whatever the source gave them.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Company-scale proxy from scale vocabulary. Tiers checked in priority
/// order; first hit wins.
fn size_score(text: &str) -> f64 {
    let text_lower = text.to_lowercase();
    if HUGE_INDICATORS.iter().any(|i| text_lower.contains(i)) {
        return 1.0;
    }
    if LARGE_INDICATORS.iter().any(|i| text_lower.contains(i)) {
        return 0.7;
    }
    if MEDIUM_INDICATORS.iter().any(|i| text_lower.contains(i)) {
        return 0.4;
    }
    0.2
}

/// Territory relevance: certain match 1.0, anything unknown 0.5.
fn geo_score(location: Option<&str>, territory: Option<&str>) -> f64 {
    let (Some(location), Some(territory)) = (location, territory) else {
        return 0.5;
    };
    if location.to_lowercase().contains(&territory.to_lowercase()) {
        return 1.0;
    }
    0.5
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    #[should_panic(expected = "must sum to 1.0")]
    fn rejects_weights_that_do_not_sum_to_one() {
        ScoringEngine::with_weights(Weights {
            intent: 0.5,
            freshness: 0.3,
            size: 0.2,
            geography: 0.1,
        });
    }

    #[test]
    fn fresh_tender_composite() {
        let engine = ScoringEngine::new();
        let score = engine.score("tender", &Utc::now().to_rfc3339(), "", None, None);

        assert_eq!(score.breakdown.intent, 1.0);
        assert_eq!(score.breakdown.freshness, 1.0);
        assert_eq!(score.breakdown.size, 0.2);
        assert_eq!(score.breakdown.geography, 0.5);
        assert_eq!(score.final_score, 0.79);
    }

    #[test]
    fn intent_lookup_is_case_insensitive_with_default() {
        assert_eq!(intent_score("Tender"), 1.0);
        assert_eq!(intent_score("PROCUREMENT"), 0.9);
        assert_eq!(intent_score("expansion"), 0.8);
        assert_eq!(intent_score("commissioning"), 0.75);
        assert_eq!(intent_score("directory"), 0.3);
        assert_eq!(intent_score("press-release"), 0.5);
    }

    #[test]
    fn freshness_decays_to_half_after_a_week() {
        let now = Utc::now();
        let week_ago = (now - Duration::days(7)).to_rfc3339();
        assert_eq!(freshness_score(&week_ago, now), 0.5);
    }

    #[test]
    fn freshness_defaults_for_malformed_and_future_timestamps() {
        let now = Utc::now();
        assert_eq!(freshness_score("not a date", now), 1.0);
        assert_eq!(freshness_score("", now), 1.0);
        // A clock-skewed future capture clamps to zero days.
        let tomorrow = (now + Duration::days(1)).to_rfc3339();
        assert_eq!(freshness_score(&tomorrow, now), 1.0);
    }

    #[test]
    fn freshness_accepts_naive_iso_timestamps() {
        let now = Utc::now();
        let naive = (now - Duration::days(7)).format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        assert_eq!(freshness_score(&naive, now), 0.5);
    }

    #[test]
    fn size_tiers_check_in_priority_order() {
        assert_eq!(size_score("a billion dollar capacity expansion"), 1.0);
        assert_eq!(size_score("Rs 500 crore order"), 0.7);
        assert_eq!(size_score("growing sme unit"), 0.4);
        assert_eq!(size_score("tender notice"), 0.2);
    }

    #[test]
    fn geography_matches_territory_substring() {
        assert_eq!(geo_score(Some("Mumbai, Maharashtra"), Some("maharashtra")), 1.0);
        assert_eq!(geo_score(Some("Chennai"), Some("Maharashtra")), 0.5);
        assert_eq!(geo_score(None, Some("Maharashtra")), 0.5);
        assert_eq!(geo_score(Some("Chennai"), None), 0.5);
    }
}
