// File: src/core/engine.rs
use crate::config::ResolverConfig;
use crate::core::catalog::Catalog;
use crate::core::normalizer::NameNormalizer;
use crate::core::rules::{Descriptor, RuleChain};
use crate::core::types::{CategoryKey, Suggestion, SuggestionSource};
use crate::error::Result;
use crate::learning::{CategoryConfirmation, LearnedCategoryPolicy, LearningEngine, LearningTable};
use crate::persistence::{load_from_disk, save_to_disk};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, warn};

// Owns its learning table. Threads share a resolver through `shared::SharedResolver`.
pub struct CategoryResolver {
    pub catalog: Catalog,
    pub rules: RuleChain,
    learning: LearningTable,
    learning_engine: LearningEngine,
    policy: LearnedCategoryPolicy,
    learning_path: Option<PathBuf>,
}

impl CategoryResolver {
    pub fn new() -> Self {
        Self::with_learning(LearningTable::new())
    }

    pub fn with_learning(learning: LearningTable) -> Self {
        Self {
            catalog: Catalog::new(),
            rules: RuleChain::default(),
            learning,
            learning_engine: LearningEngine::new(),
            policy: LearnedCategoryPolicy::default(),
            learning_path: None,
        }
    }

    /// Loads learned categories from the configured file, starting empty when the
    /// file is missing or unreadable.
    pub fn from_file_or_new(config: &ResolverConfig) -> Self {
        let learning = match &config.learning_path {
            Some(path) if path.exists() => load_from_disk(path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "could not load learning state, starting empty");
                LearningTable::new()
            }),
            _ => LearningTable::new(),
        };

        let mut resolver = Self::with_learning(learning).with_policy(config.policy);
        resolver.learning_path = config.learning_path.clone();
        resolver
    }

    pub fn with_policy(mut self, policy: LearnedCategoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_rules(mut self, rules: RuleChain) -> Self {
        self.rules = rules;
        self
    }

    pub fn policy(&self) -> LearnedCategoryPolicy {
        self.policy
    }

    pub fn normalize(&self, raw: &str) -> String {
        NameNormalizer::new(&self.catalog).normalize(raw)
    }

    pub fn similar_items(&self, raw: &str) -> BTreeSet<String> {
        NameNormalizer::new(&self.catalog).similar_items(raw)
    }

    /// Records that `category` was confirmed for `raw`. Returns the new count, or
    /// `None` when the name or category is blank.
    pub fn learn_category(&mut self, raw: &str, category: &str) -> Option<u64> {
        let normalized = self.normalize(raw);
        let confirmation = CategoryConfirmation {
            item: raw.to_string(),
            category: category.to_string(),
        };
        self.learning_engine
            .learn(&mut self.learning, &normalized, &confirmation)
    }

    pub fn suggest_category(&self, raw: &str) -> CategoryKey {
        self.explain(raw).category
    }

    /// Like `suggest_category`, but also reports which stage decided.
    pub fn explain(&self, raw: &str) -> Suggestion {
        let normalized = self.normalize(raw);
        let lowered = raw.to_lowercase();
        let text = lowered.trim();

        let learned = match self.policy {
            LearnedCategoryPolicy::Permissive => self.learning.top_category(&normalized, |_| true),
            LearnedCategoryPolicy::Strict => self
                .learning
                .top_category(&normalized, |c| self.catalog.is_valid_category(c))
                .and_then(|c| self.catalog.canonical_key(c)),
        };

        let suggestion = if let Some(category) = learned {
            Suggestion::new(category, SuggestionSource::Learned)
        } else {
            self.rules
                .classify(&Descriptor::new(text, &normalized), &self.catalog)
                .map(|(category, source)| Suggestion::new(category, source))
                .unwrap_or_else(Suggestion::fallback)
        };

        debug!(item = %normalized, category = %suggestion.category, source = %suggestion.source, "suggested category");
        suggestion
    }

    pub fn is_valid_category(&self, category: &str) -> bool {
        self.catalog.is_valid_category(category)
    }

    pub fn category_description(&self, category: &str) -> Option<&'static str> {
        self.catalog.category_description(category)
    }

    pub fn list_categories(&self) -> Vec<&'static str> {
        self.catalog.categories()
    }

    pub fn format_category(&self, category: Option<&str>) -> &'static str {
        self.catalog.format_category(category)
    }

    pub fn learning(&self) -> &LearningTable {
        &self.learning
    }

    /// Folds previously exported counts into the live table.
    pub fn absorb(&mut self, other: LearningTable) {
        self.learning.merge(other);
    }

    pub fn into_learning(self) -> LearningTable {
        self.learning
    }

    pub fn save_learning(&self) -> Result<()> {
        if let Some(path) = &self.learning_path {
            save_to_disk(&self.learning, path)
        } else {
            Ok(()) // Nothing to do without a configured path
        }
    }
}

impl Default for CategoryResolver {
    fn default() -> Self {
        Self::new()
    }
}
