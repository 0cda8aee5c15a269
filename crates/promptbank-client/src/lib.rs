//! # promptbank-client
//!
//! Record store implementations for promptbank.
//!
//! This crate provides:
//! - [`HttpRecordStore`]: the remote spreadsheet-style endpoint over HTTP
//! - [`MockRecordStore`]: static sample data used when no endpoint is set
//! - [`ClientConfig`]: environment-driven configuration
//! - [`connect`]: picks one of the two from a config
//!
//! # Example
//!
//! ```rust,no_run
//! use promptbank_client::{connect, ClientConfig, RecordStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = connect(&ClientConfig::from_env()).unwrap();
//!     let prompts = store.list_all().await.unwrap();
//!     println!("{} prompts", prompts.len());
//! }
//! ```

pub mod config;
pub mod http;
pub mod mock;

use std::sync::Arc;

use tracing::{info, warn};

// Re-export core types
pub use promptbank_core::*;

pub use config::ClientConfig;
pub use http::HttpRecordStore;
pub use mock::MockRecordStore;

/// Build the record store described by `config`: HTTP when an endpoint is
/// configured, sample data otherwise.
pub fn connect(config: &ClientConfig) -> Result<Arc<dyn RecordStore>> {
    match config.api_url.as_deref() {
        Some(url) => {
            info!(url, strict = config.strict_mutations, "Using remote record store");
            Ok(Arc::new(HttpRecordStore::new(config)?))
        }
        None => {
            warn!("API URL is not set. Using mock data; changes will not persist");
            Ok(Arc::new(MockRecordStore::new().with_delay_ms(config.mock_delay_ms)))
        }
    }
}
