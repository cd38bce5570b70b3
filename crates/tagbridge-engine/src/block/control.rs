//! Conditionals and flow control: if/any/all, break, stop.

use super::{evaluate_condition, split_then_else, Block};
use crate::error::EngineError;
use crate::interpreter::{Context, Control};
use crate::tag::Tag;

/// `{if(cond):then|else}`
pub struct IfBlock;

impl Block for IfBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["if"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Some(verdict) = tag.parameter.and_then(evaluate_condition) else {
            return Ok(None);
        };
        let (then, otherwise) = split_then_else(tag.payload);
        Ok(Some(if verdict { then } else { otherwise }))
    }
}

/// `{any(c1|c2|...):then|else}` — true when any condition holds.
pub struct AnyBlock;

impl Block for AnyBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["any", "or"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        process_multi(tag, |verdicts| verdicts.iter().any(|v| *v))
    }
}

/// `{all(c1|c2|...):then|else}` — true when every condition holds.
pub struct AllBlock;

impl Block for AllBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["all", "and"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        process_multi(tag, |verdicts| verdicts.iter().all(|v| *v))
    }
}

fn process_multi(
    tag: &Tag<'_>,
    combine: impl Fn(&[bool]) -> bool,
) -> Result<Option<String>, EngineError> {
    let Some(parameter) = tag.parameter else {
        return Ok(None);
    };
    let verdicts: Option<Vec<bool>> = parameter.split('|').map(evaluate_condition).collect();
    let Some(verdicts) = verdicts else {
        return Ok(None);
    };
    let (then, otherwise) = split_then_else(tag.payload);
    Ok(Some(if combine(&verdicts) { then } else { otherwise }))
}

/// `{break(cond):message}` — when the condition holds, the final body becomes
/// the payload (empty if none) and interpretation halts.
pub struct BreakBlock;

impl Block for BreakBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["break", "short", "shortcircuit"])
    }

    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        halt_if(tag, ctx)
    }
}

/// `{stop(cond):message}` — same halt semantics as break; kept as a separate
/// declaration for script compatibility.
pub struct StopBlock;

impl Block for StopBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["stop", "halt", "error"])
    }

    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
        halt_if(tag, ctx)
    }
}

fn halt_if(tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError> {
    let Some(verdict) = tag.parameter.and_then(evaluate_condition) else {
        return Ok(None);
    };
    if verdict {
        ctx.control = Some(Control::Halt(tag.payload.unwrap_or("").to_string()));
    }
    Ok(Some(String::new()))
}
