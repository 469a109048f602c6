// src/core/mod.rs

pub mod catalog;
pub mod engine;
pub mod normalizer;
pub mod rules;
pub mod types;
