//! Preview-plus-pointer summaries of oversized result sets.
//!
//! The full result set is written to the overflow store and the caller gets
//! back a prefix of it that fits the token budget, together with a signed
//! URL for the rest.

use crate::store::{Metadata, OverflowStore};
use crate::tokens::{TokenCounter, pretty_json};
use chrono::{DateTime, SecondsFormat, Utc};
use datamaker_mcp_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Lifetime of every retrieval URL.
pub const RETRIEVAL_URL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Result of summarizing a result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Leading items that fit the token budget (at least one when non-empty)
    pub preview_items: Vec<Value>,
    /// Number of items in the full result set
    pub total_count: usize,
    /// Key of the stored full result set
    pub storage_key: String,
    /// Signed URL for the stored result set, valid for [`RETRIEVAL_URL_TTL`]
    pub retrieval_url: String,
}

/// Stores result sets and builds budget-sized previews.
#[derive(Debug, Clone)]
pub struct Summarizer {
    store: Arc<dyn OverflowStore>,
    counter: Arc<dyn TokenCounter>,
    threshold: usize,
}

impl Summarizer {
    /// Creates a summarizer with a token budget of `threshold`.
    #[must_use]
    pub fn new(
        store: Arc<dyn OverflowStore>,
        counter: Arc<dyn TokenCounter>,
        threshold: usize,
    ) -> Self {
        Self {
            store,
            counter,
            threshold,
        }
    }

    /// Token budget used for previews.
    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Persists `items` under `name_prefix` and returns a preview with a
    /// retrieval pointer.
    ///
    /// # Errors
    ///
    /// Returns [`datamaker_mcp_core::Error::Storage`] if the write or URL
    /// signing fails. Nothing is returned in that case; a failed write is
    /// never followed by a presign.
    pub async fn summarize(&self, items: &[Value], name_prefix: &str) -> Result<Summary> {
        let stored_at = Utc::now();
        let storage_key = storage_key(name_prefix, stored_at);
        let payload = pretty_json(&Value::Array(items.to_vec()));

        let mut metadata = Metadata::new();
        metadata.insert("total-count".to_string(), items.len().to_string());
        metadata.insert(
            "stored-at".to_string(),
            stored_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        );

        self.store
            .put(&storage_key, payload.into_bytes(), "application/json", metadata)
            .await?;
        let retrieval_url = self
            .store
            .presign_get(&storage_key, RETRIEVAL_URL_TTL)
            .await?;

        let preview_len = self.preview_len(items);
        info!(
            key = %storage_key,
            total = items.len(),
            preview = preview_len,
            "Stored oversized result set"
        );

        Ok(Summary {
            preview_items: items[..preview_len].to_vec(),
            total_count: items.len(),
            storage_key,
            retrieval_url,
        })
    }

    /// Length of the longest prefix whose cumulative cost stays within the
    /// budget, but never less than one item of a non-empty set.
    fn preview_len(&self, items: &[Value]) -> usize {
        let mut running = 0usize;
        for (index, item) in items.iter().enumerate() {
            running = running.saturating_add(self.counter.count_json(item));
            if running > self.threshold {
                debug!(index, running, threshold = self.threshold, "Preview budget exceeded");
                return index.max(1);
            }
        }
        items.len()
    }
}

/// Builds `<prefix>/<timestamp>.json` with `:` and `.` in the UTC timestamp
/// replaced by `-`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use datamaker_mcp_overflow::storage_key;
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
/// assert_eq!(
///     storage_key("templates", at),
///     "templates/2024-05-01T12-30-00-000000000Z.json"
/// );
/// ```
#[must_use]
pub fn storage_key(prefix: &str, at: DateTime<Utc>) -> String {
    let stamp = at
        .to_rfc3339_opts(SecondsFormat::Nanos, true)
        .replace([':', '.'], "-");
    format!("{prefix}/{stamp}.json")
}
