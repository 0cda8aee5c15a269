//! Core traits for promptbank abstractions.
//!
//! The record store is the only seam between the application and the
//! outside world's data, so the HTTP backend and the sample-data fallback
//! are interchangeable behind it.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Prompt, PromptFields};

// =============================================================================
// RECORD STORE
// =============================================================================

/// Source of truth for catalog records.
///
/// Mutations return no record: callers reload the full list afterwards to
/// observe their effect.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record.
    async fn list_all(&self) -> Result<Vec<Prompt>>;

    /// Create a record from its editable fields. The store assigns `id`
    /// and `created_at`.
    async fn create(&self, fields: PromptFields) -> Result<()>;

    /// Replace title, category and body of an existing record. `id` and
    /// `created_at` are sent back unchanged.
    async fn update(&self, prompt: Prompt) -> Result<()>;

    /// Delete a record by id.
    async fn delete(&self, id: &str) -> Result<()>;

    /// True for the sample-data fallback that persists nothing.
    fn is_mock(&self) -> bool {
        false
    }
}
