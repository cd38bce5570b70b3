//! Engine failure taxonomy. Every variant is surfaced to the caller unchanged;
//! the interpreter never recovers partially.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A `{` with no matching `}`. Position is the byte offset of the opener.
    #[error("unclosed block at byte {position}")]
    UnclosedBlock { position: usize },

    /// Block nesting deeper than the configured limit.
    #[error("block nesting exceeds the depth limit of {limit}")]
    DepthExceeded { limit: usize },

    /// Total interpreted text exceeded the work budget.
    #[error("script exceeded its work budget of {budget} bytes")]
    WorkBudgetExceeded { budget: usize },

    /// The configured execution deadline passed mid-script.
    #[error("execution deadline exceeded")]
    DeadlineExceeded,

    /// Math block could not evaluate its payload.
    #[error("math error in `{expr}`: {reason}")]
    Math { expr: String, reason: String },

    /// Embed block was handed a payload that is not valid JSON.
    #[error("malformed embed payload: {0}")]
    EmbedPayload(String),
}
