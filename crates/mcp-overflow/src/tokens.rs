//! Token estimation for response budgeting.
//!
//! Counts are heuristic (characters / 4 plus a 10% safety margin) and fully
//! deterministic: the same text always yields the same count, which keeps
//! preview boundaries stable across repeated summaries.

use serde_json::Value;

/// Trait for token counting implementations.
pub trait TokenCounter: Send + Sync + std::fmt::Debug {
    /// Count tokens in a plain text string.
    fn count_text(&self, text: &str) -> usize;

    /// Count tokens in the pretty-printed serialization of a JSON value.
    fn count_json(&self, value: &Value) -> usize {
        self.count_text(&pretty_json(value))
    }
}

/// Heuristic token counter using character-based estimation.
///
/// `tokens = ceil(chars * 1.1 / 4)`, evaluated in integer arithmetic as
/// `ceil(chars * 11 / 40)`. Conservative on purpose: over-estimating only
/// moves the summarization boundary earlier.
///
/// # Examples
///
/// ```
/// use datamaker_mcp_overflow::{HeuristicTokenCounter, TokenCounter};
///
/// let counter = HeuristicTokenCounter::default();
/// assert_eq!(counter.count_text(""), 0);
/// assert_eq!(counter.count_text("abcd"), 2);
/// assert_eq!(counter.count_text(&"x".repeat(40)), 11);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTokenCounter;

impl HeuristicTokenCounter {
    /// Creates a new heuristic counter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TokenCounter for HeuristicTokenCounter {
    fn count_text(&self, text: &str) -> usize {
        let chars = text.chars().count();
        chars.saturating_mul(11).div_ceil(40)
    }
}

/// Pretty-prints a JSON value with two-space indentation.
///
/// Serializing a `Value` cannot fail (keys are always strings); the compact
/// form is used as a fallback to keep this infallible.
#[must_use]
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
