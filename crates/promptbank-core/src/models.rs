//! Core data models for promptbank.
//!
//! These types are shared across all promptbank crates and describe the
//! catalog records and the JSON envelope of the remote record store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// =============================================================================
// PROMPT TYPES
// =============================================================================

/// A single catalog entry as stored by the remote record store.
///
/// `id` and `created_at` are assigned by the store and round-tripped
/// verbatim on update; the client never generates them.
///
/// The `prompts` and `created_at` aliases apply only when reading. Writes
/// always use `body` and `createdAt`, so a store that still names its
/// columns the old way will not see updated values in them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub category: String,
    /// The prompt text itself. Older sheets name this column `prompts`
    /// (read only).
    #[serde(alias = "prompts")]
    pub body: String,
    /// ISO-8601 creation timestamp, kept as the store sent it.
    #[serde(alias = "created_at")]
    pub created_at: String,
}

impl Prompt {
    /// Parsed creation time, or `None` when the store sent something that
    /// is not RFC 3339.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Editable fields of this record.
    pub fn fields(&self) -> PromptFields {
        PromptFields {
            title: self.title.clone(),
            category: self.category.clone(),
            body: self.body.clone(),
        }
    }

    /// Replace the editable fields, keeping `id` and `created_at`.
    pub fn with_fields(&self, fields: PromptFields) -> Prompt {
        Prompt {
            id: self.id.clone(),
            title: fields.title,
            category: fields.category,
            body: fields.body,
            created_at: self.created_at.clone(),
        }
    }
}

/// Editable part of a prompt: the create payload and the form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptFields {
    pub title: String,
    pub category: String,
    pub body: String,
}

impl PromptFields {
    /// Names of required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        if self.body.trim().is_empty() {
            missing.push("body");
        }
        missing
    }

    /// True when every required field has content.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(f) => f.to_string(),
    })
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// Outcome flag carried by every store response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// JSON wrapper returned by the remote record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Id of a freshly created record, when the store reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }

    /// Envelope message, or `default` when the store sent none.
    pub fn message_or(&self, default: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(default)
            .to_string()
    }
}

// =============================================================================
// SORTING
// =============================================================================

/// Display order for the catalog grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Most recently created first.
    Newest,
    /// Oldest first.
    Oldest,
    /// Title, case-insensitive.
    Az,
}

impl FromStr for SortOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "az" | "a-z" => Ok(Self::Az),
            _ => Err(Error::Validation(format!("unknown sort option: {}", s))),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Newest => write!(f, "newest"),
            Self::Oldest => write!(f, "oldest"),
            Self::Az => write!(f, "az"),
        }
    }
}
