//! Entity resolution — canonical company keys and dedup.
//!
//! `normalize` turns a raw company name into its canonical key; the
//! resolver then matches exact, falls back to a stored-order substring
//! scan, and creates a new company only when both miss.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::info;

use fuelpulse_common::{CompanyId, NewCompany};
use fuelpulse_store::LeadStore;

/// Legal-entity suffixes stripped during normalization. Whole-word,
/// case-insensitive, optional trailing period; multiword forms listed
/// before their single-word tails so "pvt ltd" never half-matches.
static SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:pvt\.?\s+ltd|private\s+limited|limited|ltd|corporation|corp|incorporated|inc|llc|llp|company|co|industries|inds|enterprises|ent|group|holdings)\.?\b",
    )
    .expect("valid regex")
});

/// Keys shorter than this never fuzzy-merge. Guards against spurious
/// collisions on short tokens.
const MIN_FUZZY_KEY_LEN: usize = 5;

/// Canonical key for a company name. Pure and total: empty input yields
/// an empty key, and `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = SUFFIX_RE.replace_all(&lower, " ");
    stripped
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct EntityResolver {
    store: Arc<dyn LeadStore>,
}

impl EntityResolver {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self { store }
    }

    /// Resolve a company name to a stored company, creating one if no
    /// existing record matches. First match wins:
    ///
    /// 1. Exact canonical-key lookup.
    /// 2. Stored-order scan, substring containment in either direction,
    ///    gated on the shorter key being at least `MIN_FUZZY_KEY_LEN` chars.
    /// 3. Create.
    ///
    /// Storage failures propagate; there are no retries here.
    pub async fn resolve(
        &self,
        name: &str,
        industry: Option<&str>,
        location: Option<&str>,
    ) -> fuelpulse_store::Result<CompanyId> {
        let key = normalize(name);

        if let Some(id) = self.store.resolve_exact(&key).await? {
            return Ok(id);
        }

        let key_len = key.chars().count();
        for (id, stored_key) in self.store.scan_companies().await? {
            if stored_key.is_empty() {
                continue;
            }
            let stored_len = stored_key.chars().count();
            if (stored_key.contains(&key) && key_len >= MIN_FUZZY_KEY_LEN)
                || (key.contains(&stored_key) && stored_len >= MIN_FUZZY_KEY_LEN)
            {
                return Ok(id);
            }
        }

        info!(company = name, key = %key, "New entity");
        self.store
            .create_company(&NewCompany {
                name: name.to_string(),
                normalized_name: key,
                industry: industry.map(str::to_string),
                location: location.map(str::to_string),
            })
            .await
    }
}
