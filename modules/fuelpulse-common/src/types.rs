use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CompanyId = Uuid;
pub type LeadId = Uuid;

// --- Signals ---

/// A unit of scraped text with provenance, before it becomes a Lead.
/// Immutable once captured; exists only transiently as pipeline input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub company_name: String,
    pub text: String,
    /// Free-form signal type as emitted by the scraper ("tender", "news",
    /// "directory", ...). Kept as a string: scoring knows more types than
    /// the capture layer does, and scrapers emit whatever they see.
    pub signal_type: String,
    pub source_name: String,
    pub source_url: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Capture timestamp as scraped. Kept raw; freshness scoring parses it
    /// and treats unparseable values as maximally fresh.
    pub captured_at: String,
}

// --- Companies ---

/// Identity record for a prospective buyer. `normalized_name` is a pure
/// function of `name` and is the dedup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub normalized_name: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a company during entity resolution.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub normalized_name: String,
    pub industry: Option<String>,
    pub location: Option<String>,
}

// --- Leads ---

/// Per-factor components of a lead's composite score. Fixed at lead
/// creation; downstream sales workflow never touches these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub intent: f64,
    pub freshness: f64,
    pub size: f64,
    pub geography: f64,
}

/// Output of the scoring engine: the weighted composite plus its parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadScore {
    pub final_score: f64,
    pub breakdown: ScoreBreakdown,
}

/// A persisted, scored, product-tagged sales opportunity derived from one
/// Signal. Append-only from the pipeline's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub company_id: CompanyId,
    pub signal_type: String,
    pub signal_text: String,
    pub source_name: String,
    pub source_url: String,
    pub products_mentioned: Vec<String>,
    pub confidence: f64,
    pub breakdown: ScoreBreakdown,
    pub created_at: DateTime<Utc>,
}

/// Parameters for the single atomic lead insert. Confidence and breakdown
/// land in the same write — there is no second scoring write to race with.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub company_id: CompanyId,
    pub signal_type: String,
    pub signal_text: String,
    pub source_name: String,
    pub source_url: String,
    pub products_mentioned: Vec<String>,
    pub confidence: f64,
    pub breakdown: ScoreBreakdown,
}

// --- Product catalog ---

/// Static catalog entry mapping keyword evidence to a fuel product.
/// Read-only to the pipeline; edited only by the admin surface.
#[derive(Debug, Clone)]
pub struct ProductRule {
    pub code: &'static str,
    pub name: &'static str,
    /// Direct product mentions. First hit contributes 0.6.
    pub keywords: &'static [&'static str],
    /// Usage-context mentions. First hit contributes 0.3.
    pub contexts: &'static [&'static str],
    /// Review threshold consumed by the admin surface. Inference does not
    /// consult this; it applies its own inclusion floor.
    pub min_confidence: f64,
}

/// One inferred product candidate for a signal, with the evidence that
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMatch {
    pub code: String,
    pub name: String,
    pub confidence: f64,
    pub reasoning: String,
}

// --- Notification ---

/// A subscriber's channel preferences and routing scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationTarget {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub push_enabled: bool,
    pub email_enabled: bool,
    #[serde(default)]
    pub territory: Option<String>,
    /// Product codes this subscriber covers. Empty means all products.
    #[serde(default)]
    pub product_codes: Vec<String>,
}

/// Scope for fetching the subscriber list for one lead.
#[derive(Debug, Clone, Default)]
pub struct SubscriberFilter {
    pub territory: Option<String>,
    pub product_codes: Vec<String>,
}
