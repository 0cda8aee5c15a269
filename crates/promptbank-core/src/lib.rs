//! # promptbank-core
//!
//! Core types, traits, and abstractions for the promptbank catalog.
//!
//! This crate provides the domain records, the record store trait, the
//! error taxonomy and the pure filtering logic that the client and the
//! application crates depend on.

pub mod defaults;
pub mod error;
pub mod filter;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use filter::{derive_categories, sort_prompts, CatalogFilter};
pub use models::*;
pub use traits::*;
