//! `{debug}` — dumps every seed's default rendering into `extras`.

use super::Block;
use crate::error::EngineError;
use crate::interpreter::Context;
use crate::tag::Tag;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct DebugBlock;

impl Block for DebugBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["debug"])
    }

    fn process(&self, _tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        // BTreeMap keeps the dump deterministic across runs.
        let dump: BTreeMap<String, String> = ctx
            .seeds
            .iter()
            .map(|(name, adapter)| {
                (name.clone(), adapter.get_value(None).unwrap_or_default())
            })
            .collect();
        ctx.response.extras.insert(
            "debug".to_string(),
            serde_json::to_value(dump).unwrap_or(Value::Null),
        );
        Ok(Some(String::new()))
    }
}

#[cfg(test)]
mod tests {
    use crate::adapter::{SeedSet, StringAdapter};
    use crate::interpreter::Interpreter;
    use std::sync::Arc;

    #[test]
    fn debug_dumps_seeds_into_extras() {
        let interpreter = Interpreter::with_default_blocks();
        let mut seeds = SeedSet::new();
        seeds.insert("args".to_string(), Arc::new(StringAdapter::new("a b")));
        let out = interpreter.process("{var(x):1}{debug}", seeds).unwrap();
        assert_eq!(out.body, "");
        let dump = &out.extras["debug"];
        assert_eq!(dump["args"], "a b");
        assert_eq!(dump["x"], "1");
    }
}
