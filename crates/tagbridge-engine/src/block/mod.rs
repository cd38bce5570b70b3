//! Stock block implementations and the [`Block`] trait.

mod actions;
mod control;
mod debug;
mod embed;
mod math;
mod random;
mod strf;
mod strings;
mod variables;

pub use actions::{CommandBlock, CooldownBlock, OverrideBlock, RedirectBlock, RequireBlock};
pub use control::{AllBlock, AnyBlock, BreakBlock, IfBlock, StopBlock};
pub use debug::DebugBlock;
pub use embed::EmbedBlock;
pub use math::MathBlock;
pub use random::{RandomBlock, RangeBlock};
pub use strf::StrfBlock;
pub use strings::{CommentBlock, CountBlock, LengthBlock, OrdinalBlock, ReplaceBlock};
pub use variables::{LooseVariableGetterBlock, VarBlock};

use crate::error::EngineError;
use crate::interpreter::Context;
use crate::tag::Tag;

/// One named operation in the template language.
///
/// `process` returns `Ok(Some(replacement))` to consume the tag,
/// `Ok(None)` to reject it (the tag stays verbatim in the output), or an
/// error to abort the whole execution.
pub trait Block: Send + Sync {
    fn will_accept(&self, tag: &Tag<'_>) -> bool;
    fn process(&self, tag: &Tag<'_>, ctx: &mut Context) -> Result<Option<String>, EngineError>;
}

/// The stock block set, in dispatch order. The loose variable getter accepts
/// every declaration and must therefore come last.
pub fn default_blocks() -> Vec<Box<dyn Block>> {
    vec![
        Box::new(CommentBlock),
        Box::new(MathBlock),
        Box::new(RandomBlock),
        Box::new(RangeBlock),
        Box::new(AnyBlock),
        Box::new(IfBlock),
        Box::new(AllBlock),
        Box::new(BreakBlock),
        Box::new(StrfBlock),
        Box::new(StopBlock),
        Box::new(VarBlock),
        Box::new(EmbedBlock),
        Box::new(ReplaceBlock),
        Box::new(RequireBlock),
        Box::new(CommandBlock),
        Box::new(OverrideBlock),
        Box::new(RedirectBlock),
        Box::new(CooldownBlock),
        Box::new(LengthBlock),
        Box::new(CountBlock),
        Box::new(OrdinalBlock),
        Box::new(DebugBlock),
        Box::new(LooseVariableGetterBlock),
    ]
}

/// Evaluates a comparison such as `1==1` or `left>=right`. Both sides are
/// compared numerically when they parse as numbers, as strings otherwise.
/// Returns `None` when no comparison operator is present.
pub(crate) fn evaluate_condition(expr: &str) -> Option<bool> {
    for op in ["==", "!=", ">=", "<=", ">", "<"] {
        if let Some(pos) = expr.find(op) {
            let left = expr[..pos].trim();
            let right = expr[pos + op.len()..].trim();
            return Some(compare(left, right, op));
        }
    }
    None
}

fn compare(left: &str, right: &str, op: &str) -> bool {
    if let (Ok(l), Ok(r)) = (left.parse::<f64>(), right.parse::<f64>()) {
        return match op {
            "==" => l == r,
            "!=" => l != r,
            ">=" => l >= r,
            "<=" => l <= r,
            ">" => l > r,
            "<" => l < r,
            _ => false,
        };
    }
    match op {
        "==" => left == right,
        "!=" => left != right,
        ">=" => left >= right,
        "<=" => left <= right,
        ">" => left > right,
        "<" => left < right,
        _ => false,
    }
}

/// Splits an `if`-style payload into its then/else halves on the first `|`.
pub(crate) fn split_then_else(payload: Option<&str>) -> (String, String) {
    let payload = payload.unwrap_or("");
    match payload.split_once('|') {
        Some((then, otherwise)) => (then.to_string(), otherwise.to_string()),
        None => (payload.to_string(), String::new()),
    }
}
