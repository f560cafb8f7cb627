//! Inline-or-summarize decision for tool output.

use crate::normalize::normalize;
use crate::summarize::{RETRIEVAL_URL_TTL, Summarizer, Summary};
use crate::tokens::{TokenCounter, pretty_json};
use datamaker_mcp_core::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Rendered body of a truncated tool response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruncatedResponse {
    /// Human-readable truncation notice
    pub message: String,
    /// Estimated token cost of the full response
    pub total_tokens: usize,
    /// Preview and retrieval pointer
    #[serde(flatten)]
    pub summary: Summary,
    /// Lifetime of the retrieval URL
    pub expires_in_seconds: u64,
}

/// Turns tool results into response text that respects the token budget.
///
/// Results within budget are returned as pretty JSON, untouched. Larger
/// results are normalized into items, stored in full, and replaced by a
/// [`TruncatedResponse`].
#[derive(Debug, Clone)]
pub struct ResponseShaper {
    counter: Arc<dyn TokenCounter>,
    summarizer: Summarizer,
}

impl ResponseShaper {
    /// Creates a shaper sharing `counter` with its summarizer.
    #[must_use]
    pub const fn new(counter: Arc<dyn TokenCounter>, summarizer: Summarizer) -> Self {
        Self {
            counter,
            summarizer,
        }
    }

    /// Renders `value` for a tool response, summarizing under `prefix` when
    /// it exceeds the token budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] when the oversized payload cannot be
    /// stored, and [`Error::Serialization`] if the summary cannot be encoded.
    pub async fn shape(&self, value: &Value, prefix: &str) -> Result<String> {
        let text = pretty_json(value);
        let total_tokens = self.counter.count_text(&text);
        let threshold = self.summarizer.threshold();

        if total_tokens <= threshold {
            return Ok(text);
        }

        debug!(prefix, total_tokens, threshold, "Response exceeds token budget");
        let items = normalize(Some(value));
        let summary = self.summarizer.summarize(&items, prefix).await?;

        let response = TruncatedResponse {
            message: format!(
                "Response truncated: it was estimated at {total_tokens} tokens (limit {threshold}). \
                 Showing {} of {} items. The full data is available at retrievalUrl.",
                summary.preview_items.len(),
                summary.total_count
            ),
            total_tokens,
            summary,
            expires_in_seconds: RETRIEVAL_URL_TTL.as_secs(),
        };

        serde_json::to_string_pretty(&response)
            .map_err(|e| Error::serialization("failed to encode truncated response", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryOverflowStore;
    use crate::tokens::HeuristicTokenCounter;
    use serde_json::json;

    fn shaper(store: Arc<MemoryOverflowStore>, threshold: usize) -> ResponseShaper {
        let counter: Arc<dyn TokenCounter> = Arc::new(HeuristicTokenCounter);
        ResponseShaper::new(
            counter.clone(),
            Summarizer::new(store, counter, threshold),
        )
    }

    #[tokio::test]
    async fn test_small_response_returned_verbatim() {
        let store = Arc::new(MemoryOverflowStore::new("b"));
        let value = json!([{ "id": 1 }, { "id": 2 }]);

        let text = shaper(store.clone(), 5000).shape(&value, "templates").await.unwrap();

        assert_eq!(text, serde_json::to_string_pretty(&value).unwrap());
        assert!(!text.contains("truncated"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_large_response_summarized() {
        let store = Arc::new(MemoryOverflowStore::new("b"));
        let records: Vec<Value> = (0..200)
            .map(|i| json!({ "id": i, "email": format!("user{i}@example.com") }))
            .collect();
        let value = json!({ "data": records, "total": 200 });

        let text = shaper(store.clone(), 300).shape(&value, "generated/t1").await.unwrap();
        let rendered: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(rendered["totalCount"], 200);
        assert_eq!(rendered["expiresInSeconds"], 86_400);
        assert!(rendered["message"].as_str().unwrap().contains("of 200 items"));
        assert!(rendered["totalTokens"].as_u64().unwrap() > 300);

        let preview = rendered["previewItems"].as_array().unwrap();
        assert!(!preview.is_empty() && preview.len() < 200);
        assert_eq!(preview[0], json!({ "id": 0, "email": "user0@example.com" }));

        let key = rendered["storageKey"].as_str().unwrap();
        assert!(key.starts_with("generated/t1/"));
        assert!(store.get(key).await.is_some());
    }

    #[tokio::test]
    async fn test_rendered_field_order() {
        let store = Arc::new(MemoryOverflowStore::new("b"));
        let value = json!("x".repeat(400));

        let text = shaper(store, 10).shape(&value, "p").await.unwrap();
        let rendered: Value = serde_json::from_str(&text).unwrap();
        let keys: Vec<&str> = rendered.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(
            keys,
            [
                "message",
                "totalTokens",
                "previewItems",
                "totalCount",
                "storageKey",
                "retrievalUrl",
                "expiresInSeconds"
            ]
        );
        assert_eq!(rendered["previewItems"].as_array().unwrap().len(), 1);
    }
}
