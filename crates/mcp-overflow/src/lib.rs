//! Token budgeting and overflow storage for DataMaker tool responses.
//!
//! MCP clients pay for every token a tool returns. This crate keeps tool
//! output within a configurable budget:
//!
//! - [`TokenCounter`] estimates the cost of a response
//! - [`normalize`] coerces any JSON shape into an ordered list of items
//! - [`OverflowStore`] persists the full payload (S3/R2 or in memory)
//! - [`Summarizer`] stores a result set and builds a budget-sized preview
//! - [`ResponseShaper`] decides between inline output and a summary
//!
//! # Examples
//!
//! ```
//! use datamaker_mcp_overflow::{
//!     HeuristicTokenCounter, MemoryOverflowStore, ResponseShaper, Summarizer, TokenCounter,
//! };
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let counter: Arc<dyn TokenCounter> = Arc::new(HeuristicTokenCounter);
//! let store = Arc::new(MemoryOverflowStore::new("local"));
//! let shaper = ResponseShaper::new(counter.clone(), Summarizer::new(store, counter, 5000));
//!
//! let text = shaper.shape(&json!({ "ok": true }), "status").await.unwrap();
//! assert_eq!(text, "{\n  \"ok\": true\n}");
//! # });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod normalize;
pub mod shape;
pub mod store;
pub mod summarize;
pub mod tokens;

pub use normalize::{COLLECTION_KEYS, normalize};
pub use shape::{ResponseShaper, TruncatedResponse};
pub use store::{MemoryOverflowStore, Metadata, OverflowStore, S3OverflowStore, StoredObject};
pub use summarize::{RETRIEVAL_URL_TTL, Summarizer, Summary, storage_key};
pub use tokens::{HeuristicTokenCounter, TokenCounter, pretty_json};
