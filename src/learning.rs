// File: src/learning.rs
use crate::core::types::CategoryKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// How learned categories that are missing from the category table are treated
/// when suggesting. Writes are never rejected under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LearnedCategoryPolicy {
    /// Any learned string can be suggested, including free-text categories.
    #[default]
    Permissive,
    /// Learned categories outside the table are ignored when suggesting.
    Strict,
}

/// Per-item histogram of confirmed categories, keyed by normalized name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningTable {
    entries: BTreeMap<String, BTreeMap<CategoryKey, u64>>,
}

impl LearningTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one confirmation and returns the new count for that pair.
    pub fn record(&mut self, normalized: &str, category: &str) -> u64 {
        self.add(normalized, category, 1)
    }

    pub fn add(&mut self, normalized: &str, category: &str, amount: u64) -> u64 {
        let count = self
            .entries
            .entry(normalized.to_string())
            .or_default()
            .entry(category.to_string())
            .or_insert(0);
        *count = count.saturating_add(amount);
        *count
    }

    pub fn counts(&self, normalized: &str) -> Option<&BTreeMap<CategoryKey, u64>> {
        self.entries.get(normalized)
    }

    /// Most confirmed category among those accepted by `keep`.
    /// Equal counts resolve to the lexicographically smallest key.
    pub fn top_category<F>(&self, normalized: &str, keep: F) -> Option<&str>
    where
        F: Fn(&str) -> bool,
    {
        let mut best: Option<(&str, u64)> = None;
        // BTreeMap iterates in key order, so a strict `>` keeps the smallest key on ties.
        for (category, &count) in self.entries.get(normalized)? {
            if count == 0 || !keep(category.as_str()) {
                continue;
            }
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((category.as_str(), count));
            }
        }
        best.map(|(category, _)| category)
    }

    /// Adds every count of `other` into this table.
    pub fn merge(&mut self, other: LearningTable) {
        for (item, categories) in other.entries {
            let target = self.entries.entry(item).or_default();
            for (category, count) in categories {
                let slot = target.entry(category).or_insert(0);
                *slot = slot.saturating_add(count);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<CategoryKey, u64>)> {
        self.entries.iter()
    }
}

/// A user accepting or overriding a category for an item.
pub struct CategoryConfirmation {
    pub item: String,
    pub category: String,
}

pub struct LearningEngine {
    increment: u64,
}

impl LearningEngine {
    pub fn new() -> Self {
        Self { increment: 1 }
    }

    /// Records the confirmation under the already-normalized item name, keeping
    /// the category text as given. Blank names or categories are skipped.
    pub fn learn(
        &self,
        table: &mut LearningTable,
        normalized: &str,
        confirmation: &CategoryConfirmation,
    ) -> Option<u64> {
        let category = confirmation.category.as_str();
        if normalized.is_empty() || category.trim().is_empty() {
            debug!(item = %confirmation.item, "skipping blank confirmation");
            return None;
        }

        let count = table.add(normalized, category, self.increment);
        debug!(item = normalized, category, count, "learned category");
        Some(count)
    }
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_wins() {
        let mut table = LearningTable::new();
        table.record("basil", "fresh_herbs");
        table.record("basil", "fresh_herbs");
        table.record("basil", "dried_herbs");
        assert_eq!(table.top_category("basil", |_| true), Some("fresh_herbs"));
    }

    #[test]
    fn test_tie_resolves_to_smallest_key() {
        let mut table = LearningTable::new();
        table.record("tofu", "vegan");
        table.record("tofu", "health");
        assert_eq!(table.top_category("tofu", |_| true), Some("health"));

        table.record("tofu", "vegan");
        assert_eq!(table.top_category("tofu", |_| true), Some("vegan"));
    }

    #[test]
    fn test_filter_skips_rejected_categories() {
        let mut table = LearningTable::new();
        table.record("kombucha", "fizzy stuff");
        table.record("kombucha", "fizzy stuff");
        table.record("kombucha", "beverage");
        assert_eq!(table.top_category("kombucha", |c| c != "fizzy stuff"), Some("beverage"));
        assert_eq!(table.top_category("kombucha", |_| false), None);
        assert_eq!(table.top_category("unknown", |_| true), None);
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut a = LearningTable::new();
        a.record("milk", "fresh_dairy");
        let mut b = LearningTable::new();
        b.record("milk", "fresh_dairy");
        b.record("milk", "beverage");
        b.record("oats", "grain");
        a.merge(b);

        assert_eq!(a.len(), 2);
        assert_eq!(a.iter().map(|(item, _)| item.as_str()).collect::<Vec<_>>(), vec!["milk", "oats"]);
        assert_eq!(a.counts("milk").and_then(|c| c.get("fresh_dairy")), Some(&2));
        assert_eq!(a.counts("milk").and_then(|c| c.get("beverage")), Some(&1));
    }

    #[test]
    fn test_engine_skips_blank_input() {
        let engine = LearningEngine::new();
        let mut table = LearningTable::new();
        let blank = CategoryConfirmation { item: " ".into(), category: "grain".into() };
        assert_eq!(engine.learn(&mut table, "", &blank), None);

        let no_category = CategoryConfirmation { item: "rice".into(), category: "  ".into() };
        assert_eq!(engine.learn(&mut table, "rice", &no_category), None);
        assert!(table.is_empty());

        let ok = CategoryConfirmation { item: "Rice".into(), category: "grain".into() };
        assert_eq!(engine.learn(&mut table, "rice", &ok), Some(1));
    }

    #[test]
    fn test_engine_keeps_category_text_verbatim() {
        let engine = LearningEngine::new();
        let mut table = LearningTable::new();
        let padded = CategoryConfirmation { item: "kombucha".into(), category: " fizzy ".into() };
        assert_eq!(engine.learn(&mut table, "kombucha", &padded), Some(1));
        assert_eq!(table.top_category("kombucha", |_| true), Some(" fizzy "));
        assert_eq!(table.counts("kombucha").and_then(|c| c.get("fizzy")), None);
    }
}
