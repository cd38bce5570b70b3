//! Gateway failure taxonomy. Engine and store failures propagate unmodified;
//! the HTTP layer maps them onto a structured `{error, kind}` body.

use tagbridge_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The engine rejected or errored on the script. Not classified further.
    #[error("engine failure: {0}")]
    Engine(#[from] EngineError),

    /// The usage counter's backing store is unreachable or corrupt. Fails the
    /// whole contextual request so the `uses` field stays meaningful.
    #[error("usage store failure: {0}")]
    Store(#[from] sled::Error),
}

impl GatewayError {
    /// Stable machine-readable kind for the structured error body.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Engine(EngineError::DeadlineExceeded) => "timeout",
            GatewayError::Engine(_) => "engine",
            GatewayError::Store(_) => "store",
        }
    }
}
