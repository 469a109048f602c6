// File: src/core/normalizer.rs
use crate::core::catalog::Catalog;
use std::collections::BTreeSet;

/// Folds free-form item names onto canonical lookup keys.
pub struct NameNormalizer<'a> {
    catalog: &'a Catalog,
}

impl<'a> NameNormalizer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Lowercase and trim, then fold variants onto their base name, then fold a
    /// plural of a common item onto its singular. A variant match always wins.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let lowered = lowered.trim();

        if let Some(base) = self.catalog.variant_base(lowered) {
            return base.to_string();
        }

        if let Some(singular) = lowered.strip_suffix('s') {
            if self.catalog.is_common_item(singular) {
                return singular.to_string();
            }
        }

        lowered.to_string()
    }

    /// Every spelling treated as the same item as `raw`, for duplicate checks.
    pub fn similar_items(&self, raw: &str) -> BTreeSet<String> {
        let normalized = self.normalize(raw);
        let mut similar = BTreeSet::new();
        if normalized.is_empty() {
            return similar;
        }

        for (base, variants) in self.catalog.variant_groups_containing(&normalized) {
            similar.insert(base.to_string());
            similar.extend(variants.iter().map(|v| v.to_string()));
        }

        match normalized.strip_suffix('s') {
            Some(singular) => similar.insert(singular.to_string()),
            None => similar.insert(format!("{}s", normalized)),
        };

        similar
    }
}
