//! HTTP record store for a spreadsheet-style web app endpoint.
//!
//! A single URL serves everything: `GET` lists all records, `POST` carries
//! an `action` field (`create`, `update`, `delete`) plus its payload.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use promptbank_core::defaults;
use promptbank_core::{Envelope, Error, Prompt, PromptFields, RecordStore, Result};

use crate::config::ClientConfig;

/// Record store backed by the remote endpoint.
pub struct HttpRecordStore {
    client: Client,
    url: String,
    strict_mutations: bool,
}

/// Request payload for `POST <endpoint>`.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum MutationRequest<'a> {
    Create {
        title: &'a str,
        category: &'a str,
        body: &'a str,
    },
    Update {
        id: &'a str,
        title: &'a str,
        category: &'a str,
        body: &'a str,
        #[serde(rename = "createdAt")]
        created_at: &'a str,
    },
    Delete {
        id: &'a str,
    },
}

impl MutationRequest<'_> {
    fn op(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

impl HttpRecordStore {
    /// Create a store for the endpoint in `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let url = config
            .api_url
            .clone()
            .ok_or_else(|| Error::Config("PROMPTBANK_API_URL is not set".to_string()))?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            url = %url,
            strict_mutations = config.strict_mutations,
            timeout_secs = ?config.request_timeout_secs,
            "Initializing HTTP record store"
        );

        Ok(Self {
            client,
            url,
            strict_mutations: config.strict_mutations,
        })
    }

    /// Endpoint this store talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, request: MutationRequest<'_>) -> Result<()> {
        let start = Instant::now();
        let op = request.op();

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Request failed: {}", e)))?;

        let response = ensure_success(response).await?;

        if self.strict_mutations {
            let text = response
                .text()
                .await
                .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))?;
            check_mutation_body(&text)?;
        }

        log_elapsed(op, start);
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    // An error envelope on a failed status still names the cause.
    if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(&body) {
        if let (false, Some(message)) = (envelope.is_success(), envelope.message) {
            warn!(status = %status, error = %message, "Store rejected request");
            return Err(Error::Remote(message));
        }
    }
    Err(Error::Transport(format!(
        "Store returned {}: {}",
        status, body
    )))
}

/// Mutation responses are not contractually defined: only a decodable
/// envelope with `status: "error"` counts as a failure.
fn check_mutation_body(text: &str) -> Result<()> {
    match serde_json::from_str::<Envelope<serde_json::Value>>(text) {
        Ok(envelope) if !envelope.is_success() => {
            Err(Error::Remote(envelope.message_or("Operation failed")))
        }
        Ok(envelope) => {
            if let Some(id) = envelope.id {
                debug!(prompt_id = %id, "Store acknowledged mutation");
            }
            Ok(())
        }
        Err(_) => {
            debug!(response_len = text.len(), "Mutation response is not an envelope");
            Ok(())
        }
    }
}

fn log_elapsed(op: &str, start: Instant) {
    let elapsed = start.elapsed().as_millis() as u64;
    debug!(op, duration_ms = elapsed, "Store call complete");
    if elapsed > defaults::SLOW_REQUEST_MS {
        warn!(op, duration_ms = elapsed, slow = true, "Slow store call");
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    #[instrument(skip(self), fields(subsystem = "client", component = "http_store", op = "list_all"))]
    async fn list_all(&self) -> Result<Vec<Prompt>> {
        let start = Instant::now();

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Request failed: {}", e)))?;

        let response = ensure_success(response).await?;

        let envelope: Envelope<Vec<Prompt>> = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("Failed to parse response: {}", e)))?;

        if !envelope.is_success() || envelope.data.is_none() {
            return Err(Error::Remote(
                envelope.message_or(defaults::FETCH_FAILED_MESSAGE),
            ));
        }
        let prompts = envelope.data.unwrap_or_default();

        debug!(result_count = prompts.len(), "Fetched prompts");
        log_elapsed("list_all", start);
        Ok(prompts)
    }

    #[instrument(skip(self, draft), fields(subsystem = "client", component = "http_store", op = "create"))]
    async fn create(&self, draft: PromptFields) -> Result<()> {
        self.post(MutationRequest::Create {
            title: &draft.title,
            category: &draft.category,
            body: &draft.body,
        })
        .await
    }

    #[instrument(skip(self, prompt), fields(subsystem = "client", component = "http_store", op = "update", prompt_id = %prompt.id))]
    async fn update(&self, prompt: Prompt) -> Result<()> {
        self.post(MutationRequest::Update {
            id: &prompt.id,
            title: &prompt.title,
            category: &prompt.category,
            body: &prompt.body,
            created_at: &prompt.created_at,
        })
        .await
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "http_store", op = "delete", prompt_id = %id))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.post(MutationRequest::Delete { id }).await
    }
}
