//! Exact-then-fuzzy resolution of raw product labels against the catalog.

use std::collections::HashMap;

use strsim::normalized_levenshtein;

use super::canonical::CANONICAL_PRODUCTS;
use super::cleaner::{clean, display_clean};

/// Minimum similarity (0-100 scale) for a fuzzy match to be accepted.
pub const MATCH_THRESHOLD: f64 = 85.0;

/// All rental-fee line items collapse to this single product, whatever the
/// sub-variant on the invoice says.
pub const RENTAL_PRODUCT: &str = "ARRENDAMIENTO";

/// Resolves raw product labels to canonical names.
///
/// The catalog is cleaned once at construction. Cleaned keys are kept in
/// first-seen declaration order for the fuzzy scan; the exact-match index is
/// last-write-wins when two canonical names reduce to the same key.
pub struct ProductMatcher {
    keys: Vec<String>,
    canonical_by_key: HashMap<String, String>,
    threshold: f64,
}

impl Default for ProductMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductMatcher {
    /// Matcher over the built-in master catalog.
    pub fn new() -> Self {
        Self::with_catalog(CANONICAL_PRODUCTS, MATCH_THRESHOLD)
    }

    /// Matcher over an explicit catalog, mainly for tests.
    pub fn with_catalog(catalog: &[&str], threshold: f64) -> Self {
        let mut keys = Vec::with_capacity(catalog.len());
        let mut canonical_by_key = HashMap::with_capacity(catalog.len());

        for name in catalog {
            let key = clean(name);
            if !canonical_by_key.contains_key(&key) {
                keys.push(key.clone());
            }
            canonical_by_key.insert(key, (*name).to_string());
        }

        Self {
            keys,
            canonical_by_key,
            threshold,
        }
    }

    /// Resolve one raw label to a canonical name, or to a cleaned display
    /// name when nothing in the catalog is close enough. Unmatched labels
    /// are not errors: they stay visible under their display form.
    pub fn resolve(&self, raw: &str) -> String {
        // Rental fees group unconditionally, before any cleaning
        if raw.to_lowercase().contains("arrendamiento") {
            return RENTAL_PRODUCT.to_string();
        }

        let cleaned = clean(raw);

        if let Some(name) = self.canonical_by_key.get(&cleaned) {
            return name.clone();
        }

        let mut best: Option<(&str, f64)> = None;
        for key in &self.keys {
            let score = normalized_levenshtein(&cleaned, key) * 100.0;
            let improves = match best {
                // Strict comparison keeps the first candidate on ties
                Some((_, top)) => score > top,
                None => true,
            };
            if improves {
                best = Some((key.as_str(), score));
            }
        }

        if let Some((key, score)) = best {
            if score >= self.threshold {
                if let Some(name) = self.canonical_by_key.get(key) {
                    return name.clone();
                }
            }
        }

        display_clean(raw)
    }

    /// Build the label -> name mapping for a set of distinct raw labels.
    ///
    /// Resolution runs once per distinct label, not per row: a dataset with
    /// tens of thousands of rows typically carries only a few hundred
    /// distinct labels.
    pub fn build_mapping<'a, I>(&self, labels: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut mapping = HashMap::new();
        for label in labels {
            if !mapping.contains_key(label) {
                mapping.insert(label.to_string(), self.resolve(label));
            }
        }
        mapping
    }

    /// Number of distinct cleaned keys in the index.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}
