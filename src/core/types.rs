// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A category key from the canonical table, e.g. `fresh_fruits`.
/// Learned categories may also hold free text, so this stays a plain string.
pub type CategoryKey = String;

/// The category every unmatched item resolves to.
pub const DEFAULT_CATEGORY: &str = "other";

/// Shown for stored items that carry no category at all.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Where a suggested category came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionSource {
    /// The learning table had a confirmed category for this item.
    Learned,
    /// A keyword rule fired; holds the rule name.
    Rule(String),
    /// The normalized name is a known common item.
    ExactCatalog,
    /// A known common item appears inside the normalized name.
    SubstringCatalog,
    Default,
}

/// A category suggestion together with the stage of the chain that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: CategoryKey,
    pub source: SuggestionSource,
}

impl Suggestion {
    pub fn new(category: impl Into<CategoryKey>, source: SuggestionSource) -> Self {
        Self { category: category.into(), source }
    }

    pub fn fallback() -> Self {
        Self::new(DEFAULT_CATEGORY, SuggestionSource::Default)
    }
}

impl std::fmt::Display for SuggestionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionSource::Learned => write!(f, "learned"),
            SuggestionSource::Rule(name) => write!(f, "rule:{}", name),
            SuggestionSource::ExactCatalog => write!(f, "catalog"),
            SuggestionSource::SubstringCatalog => write!(f, "catalog-substring"),
            SuggestionSource::Default => write!(f, "default"),
        }
    }
}
