//! Sample-data record store used when no endpoint is configured.
//!
//! Listing returns two fixed records after an artificial delay so the
//! loading view shows up. Mutations succeed and are discarded: anything
//! created here will not reappear after a reload.
//!
//! ## Usage
//!
//! ```rust
//! use promptbank_client::{MockRecordStore, RecordStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MockRecordStore::new().with_delay_ms(0);
//!     let prompts = store.list_all().await.unwrap();
//!     assert_eq!(prompts.len(), 2);
//! }
//! ```

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, SecondsFormat, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use promptbank_core::defaults;
use promptbank_core::{Prompt, PromptFields, RecordStore, Result};

/// Sample-data record store.
#[derive(Clone)]
pub struct MockRecordStore {
    delay_ms: u64,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

/// One recorded store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
}

impl MockRecordStore {
    /// Create a mock store with the default artificial delay.
    pub fn new() -> Self {
        Self {
            delay_ms: defaults::MOCK_DELAY_MS,
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the artificial delay applied to list calls.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Number of calls for one operation name.
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log_call(&self, operation: &str, input: &str) {
        if let Ok(mut log) = self.call_log.lock() {
            log.push(MockCall {
                operation: operation.to_string(),
                input: input.to_string(),
            });
        }
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The two seeded records. Timestamps are relative to now: the first was
/// created now, the second a day earlier.
pub fn sample_prompts() -> Vec<Prompt> {
    let now = Utc::now();
    vec![
        Prompt {
            id: "1".to_string(),
            title: "SEO Article Writer".to_string(),
            category: "Writing".to_string(),
            body: "You are an expert SEO copywriter. Write a 1000-word article about..."
                .to_string(),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        },
        Prompt {
            id: "2".to_string(),
            title: "Python Bug Fixer".to_string(),
            category: "Coding".to_string(),
            body: "Analyze the following Python code and identify potential memory leaks..."
                .to_string(),
            created_at: (now - ChronoDuration::days(1))
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        },
    ]
}

#[async_trait]
impl RecordStore for MockRecordStore {
    #[instrument(skip(self), fields(subsystem = "client", component = "mock_store", op = "list_all"))]
    async fn list_all(&self) -> Result<Vec<Prompt>> {
        self.log_call("list_all", "");
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        let prompts = sample_prompts();
        debug!(result_count = prompts.len(), "Returning sample prompts");
        Ok(prompts)
    }

    async fn create(&self, draft: PromptFields) -> Result<()> {
        self.log_call("create", &draft.title);
        warn!(title = %draft.title, "Mock mode: create discarded");
        Ok(())
    }

    async fn update(&self, prompt: Prompt) -> Result<()> {
        self.log_call("update", &prompt.id);
        warn!(prompt_id = %prompt.id, "Mock mode: update discarded");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.log_call("delete", id);
        warn!(prompt_id = %id, "Mock mode: delete discarded");
        Ok(())
    }

    fn is_mock(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_list_waits_for_delay() {
        let store = MockRecordStore::new();
        let start = tokio::time::Instant::now();
        let prompts = store.list_all().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(defaults::MOCK_DELAY_MS));
        assert_eq!(prompts.len(), 2);
    }

    #[tokio::test]
    async fn test_sample_records() {
        let prompts = MockRecordStore::new().with_delay_ms(0).list_all().await.unwrap();
        assert_eq!(prompts[0].title, "SEO Article Writer");
        assert_eq!(prompts[0].category, "Writing");
        assert_eq!(prompts[1].title, "Python Bug Fixer");
        assert_eq!(prompts[1].category, "Coding");

        let first = prompts[0].created_at_utc().unwrap();
        let second = prompts[1].created_at_utc().unwrap();
        assert_eq!((first - second).num_hours(), 24);
    }

    #[tokio::test]
    async fn test_mutations_are_discarded() {
        let store = MockRecordStore::new().with_delay_ms(0);
        store
            .create(PromptFields {
                title: "New".to_string(),
                category: "Misc".to_string(),
                body: "text".to_string(),
            })
            .await
            .unwrap();
        store.delete("1").await.unwrap();

        assert_eq!(store.list_all().await.unwrap().len(), 2);
        assert_eq!(store.call_count("create"), 1);
        assert_eq!(store.call_count("delete"), 1);
        assert_eq!(store.calls()[1].input, "1");
    }

    #[test]
    fn test_is_mock() {
        assert!(MockRecordStore::new().is_mock());
    }
}
