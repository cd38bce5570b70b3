//! Engine output: rendered body, side-effect actions, diagnostics.

use crate::embed::Embed;
use serde_json::Value;
use std::collections::HashMap;

/// A side-effect instruction accumulated during execution. The embed action
/// keeps its structured form until the caller serializes it; everything else
/// is already plain JSON.
#[derive(Debug, Clone)]
pub enum Action {
    Embed(Embed),
    Value(Value),
}

/// Result of one `Interpreter::process` call.
#[derive(Debug, Default)]
pub struct Response {
    pub body: String,
    pub actions: HashMap<String, Action>,
    pub extras: HashMap<String, Value>,
}
