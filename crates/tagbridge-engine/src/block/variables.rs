//! Variable assignment and lookup.

use super::Block;
use crate::adapter::StringAdapter;
use crate::error::EngineError;
use crate::interpreter::Context;
use crate::tag::Tag;
use std::sync::Arc;

/// `{var(name):value}` — binds a new string variable for the rest of the
/// script. Renders to nothing.
pub struct VarBlock;

impl Block for VarBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["var", "=", "assign", "let"])
    }

    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Some(name) = tag.parameter.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(None);
        };
        ctx.seeds.insert(
            name.to_string(),
            Arc::new(StringAdapter::new(tag.payload.unwrap_or(""))),
        );
        Ok(Some(String::new()))
    }
}

/// Resolves any declaration that names a seed: `{user}`, `{user(name)}`,
/// `{args(1)}`. Accepts everything, so it must sit last in the dispatch
/// order; unknown names fall through verbatim.
pub struct LooseVariableGetterBlock;

impl Block for LooseVariableGetterBlock {
    fn will_accept(&self, _tag: &Tag<'_>) -> bool {
        true
    }

    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Some(adapter) = ctx.seeds.get(tag.declaration) else {
            return Ok(None);
        };
        Ok(adapter.get_value(tag.parameter))
    }
}

#[cfg(test)]
mod tests {
    use crate::adapter::SeedSet;
    use crate::interpreter::Interpreter;

    #[test]
    fn assign_then_read() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter
            .process("{var(greet):hello}{greet} {greet(len)}", SeedSet::new())
            .unwrap();
        assert_eq!(out.body, "hello 5");
    }

    #[test]
    fn unknown_variable_stays_verbatim() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter.process("{missing}", SeedSet::new()).unwrap();
        assert_eq!(out.body, "{missing}");
    }
}
