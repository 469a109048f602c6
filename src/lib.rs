// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod intake;
pub mod learning;
pub mod persistence;
pub mod shared;
pub use crate::core::engine::CategoryResolver;
pub use crate::config::ResolverConfig;
pub use crate::error::{PantryError, Result};
pub use crate::shared::SharedResolver;
