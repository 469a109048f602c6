// File: src/config.rs
use crate::learning::LearnedCategoryPolicy;
use std::path::PathBuf;

pub const DEFAULT_LEARNING_PATH: &str = "category_learning.bin";

/// Settings for building a `CategoryResolver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Where learned categories are loaded from and saved to. `None` keeps them in memory.
    pub learning_path: Option<PathBuf>,
    pub policy: LearnedCategoryPolicy,
}

impl ResolverConfig {
    pub fn in_memory() -> Self {
        Self {
            learning_path: None,
            policy: LearnedCategoryPolicy::default(),
        }
    }

    pub fn with_learning_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.learning_path = Some(path.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.policy = if strict {
            LearnedCategoryPolicy::Strict
        } else {
            LearnedCategoryPolicy::Permissive
        };
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::in_memory().with_learning_path(DEFAULT_LEARNING_PATH)
    }
}
