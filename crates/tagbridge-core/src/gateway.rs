//! Execution gateway: one request end to end.

use crate::codec;
use crate::error::GatewayError;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tagbridge_engine::{Action, ExecutionLimits, Interpreter, SeedSet};

/// Serializable result of one gateway run.
#[derive(Debug)]
pub struct RenderOutput {
    pub body: String,
    pub actions: Map<String, Value>,
    pub extras: Map<String, Value>,
}

/// Orchestrates decode -> diagnostic augmentation -> execution -> re-encode.
/// Constructed once per process; `run` is reentrant and shared by reference
/// across handlers.
pub struct ExecutionGateway {
    interpreter: Interpreter,
    timeout: Duration,
}

impl ExecutionGateway {
    pub fn new(interpreter: Interpreter, timeout: Duration) -> Self {
        Self {
            interpreter,
            timeout,
        }
    }

    /// Executes one transport-encoded script. The `{debug}` directive is
    /// always appended so the response extras carry the seed dump, whatever
    /// the caller sent.
    pub fn run(&self, script: &str, seeds: SeedSet) -> Result<RenderOutput, GatewayError> {
        let decoded = codec::decode(script);
        let script = format!("{decoded}{{debug}}");
        let limits = ExecutionLimits {
            deadline: Some(Instant::now() + self.timeout),
            ..ExecutionLimits::default()
        };
        let response = self
            .interpreter
            .process_with_limits(&script, seeds, limits)?;

        // Only the embed action needs structured-to-plain conversion; every
        // other action is forwarded untouched.
        let mut actions = Map::new();
        for (name, action) in response.actions {
            let value = match action {
                Action::Embed(embed) => embed.to_value(),
                Action::Value(value) => value,
            };
            actions.insert(name, value);
        }

        Ok(RenderOutput {
            body: codec::encode(&response.body),
            actions,
            extras: response.extras.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::build_seeds;
    use serde_json::{json, Value};

    fn gateway() -> ExecutionGateway {
        ExecutionGateway::new(Interpreter::with_default_blocks(), Duration::from_secs(5))
    }

    #[test]
    fn math_script_renders() {
        let out = gateway()
            .run("{m:1+1}", build_seeds(&Value::Null))
            .unwrap();
        assert_eq!(out.body, "2");
        assert!(out.actions.is_empty());
        assert!(out.extras.contains_key("debug"));
    }

    #[test]
    fn user_name_resolves_from_seed_payload() {
        let seeds = build_seeds(&json!({ "user": { "name": "Ada" } }));
        let out = gateway().run("{user(name)}", seeds).unwrap();
        assert_eq!(out.body, "Ada");
    }

    #[test]
    fn embed_action_is_a_plain_object() {
        let out = gateway()
            .run("{embed(title):Hello}", build_seeds(&Value::Null))
            .unwrap();
        assert_eq!(out.actions["embed"], json!({ "title": "Hello" }));
    }

    #[test]
    fn body_is_transport_encoded() {
        // `<` and `.` in the rendered body must come back as markers.
        let out = gateway()
            .run("a<b.c", build_seeds(&Value::Null))
            .unwrap();
        assert_eq!(out.body, "aꜳbꜶc");
    }

    #[test]
    fn transport_markers_in_the_script_decode_first() {
        // `₩` is the marker for `/`; the engine sees the raw character.
        let out = gateway().run("1₩2", build_seeds(&Value::Null)).unwrap();
        assert_eq!(out.body, "1₩2");
    }

    #[test]
    fn engine_failure_propagates() {
        let err = gateway()
            .run("{m:1+", build_seeds(&Value::Null))
            .unwrap_err();
        assert_eq!(err.kind(), "engine");
    }

    #[test]
    fn debug_extras_reflect_seeds() {
        let seeds = build_seeds(&json!({ "user": { "name": "Ada" } }));
        let out = gateway().run("hi", seeds).unwrap();
        assert_eq!(out.extras["debug"]["user"], "Ada");
    }
}
