//! The interpreter: immutable block set, per-call mutable [`Context`].
//!
//! Blocks resolve inside-out: the content between a pair of braces is fully
//! interpreted before the enclosing tag is parsed and dispatched. A block that
//! rejects a tag leaves it verbatim in the output, braces included.

use crate::adapter::SeedSet;
use crate::block::{self, Block};
use crate::error::EngineError;
use crate::response::Response;
use crate::tag::Tag;
use std::time::Instant;

const DEFAULT_DEPTH_LIMIT: usize = 32;
const DEFAULT_WORK_BUDGET: usize = 64 * 1024;

/// Bounds on one execution call.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionLimits {
    /// Maximum block nesting depth.
    pub depth: usize,
    /// Total bytes of text the interpreter may walk, across all nesting.
    pub work_budget: usize,
    /// Hard wall-clock cutoff; expiry surfaces as `DeadlineExceeded`.
    pub deadline: Option<Instant>,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH_LIMIT,
            work_budget: DEFAULT_WORK_BUDGET,
            deadline: None,
        }
    }
}

/// Body override requested by a control block (stop/break).
pub(crate) enum Control {
    Halt(String),
}

/// Per-call mutable state handed to blocks.
pub struct Context {
    /// Variable bindings; the var block inserts new ones mid-script.
    pub seeds: SeedSet,
    /// Accumulates actions and extras. The body is set after interpretation.
    pub response: Response,
    pub(crate) control: Option<Control>,
    limits: ExecutionLimits,
    work_done: usize,
}

impl Context {
    fn new(seeds: SeedSet, limits: ExecutionLimits) -> Self {
        Self {
            seeds,
            response: Response::default(),
            control: None,
            limits,
            work_done: 0,
        }
    }

    pub(crate) fn check_deadline(&self) -> Result<(), EngineError> {
        match self.limits.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(EngineError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    fn charge(&mut self, bytes: usize) -> Result<(), EngineError> {
        self.work_done = self.work_done.saturating_add(bytes);
        if self.work_done > self.limits.work_budget {
            return Err(EngineError::WorkBudgetExceeded {
                budget: self.limits.work_budget,
            });
        }
        Ok(())
    }
}

/// Stateless template engine. Construct once per process and share by
/// reference; `process` never mutates the interpreter itself.
pub struct Interpreter {
    blocks: Vec<Box<dyn Block>>,
}

impl Interpreter {
    pub fn new(blocks: Vec<Box<dyn Block>>) -> Self {
        Self { blocks }
    }

    /// Interpreter with the full stock block set registered.
    pub fn with_default_blocks() -> Self {
        Self::new(block::default_blocks())
    }

    pub fn process(&self, script: &str, seeds: SeedSet) -> Result<Response, EngineError> {
        self.process_with_limits(script, seeds, ExecutionLimits::default())
    }

    pub fn process_with_limits(
        &self,
        script: &str,
        seeds: SeedSet,
        limits: ExecutionLimits,
    ) -> Result<Response, EngineError> {
        let mut ctx = Context::new(seeds, limits);
        let body = self.interpret_segment(script, &mut ctx, 0)?;
        let mut response = ctx.response;
        response.body = match ctx.control {
            Some(Control::Halt(message)) => message,
            None => body,
        };
        Ok(response)
    }

    fn interpret_segment(
        &self,
        input: &str,
        ctx: &mut Context,
        depth: usize,
    ) -> Result<String, EngineError> {
        if depth > ctx.limits.depth {
            return Err(EngineError::DepthExceeded {
                limit: ctx.limits.depth,
            });
        }
        ctx.charge(input.len())?;
        ctx.check_deadline()?;

        let mut out = String::with_capacity(input.len());
        let mut chars = input.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.peek().copied() {
                    Some((_, escaped @ ('{' | '}' | '\\'))) => {
                        chars.next();
                        out.push(escaped);
                    }
                    _ => out.push('\\'),
                },
                '{' => {
                    let close = find_matching_brace(input, i)?;
                    let inner = self.interpret_segment(&input[i + 1..close], ctx, depth + 1)?;
                    if ctx.control.is_some() {
                        return Ok(out);
                    }
                    out.push_str(&self.dispatch(&inner, ctx)?);
                    if ctx.control.is_some() {
                        return Ok(out);
                    }
                    while let Some(&(j, _)) = chars.peek() {
                        if j <= close {
                            chars.next();
                        } else {
                            break;
                        }
                    }
                }
                _ => out.push(c),
            }
        }
        Ok(out)
    }

    /// Parses resolved block content and hands it to the first accepting
    /// block. Unclaimed tags are emitted verbatim.
    fn dispatch(&self, content: &str, ctx: &mut Context) -> Result<String, EngineError> {
        ctx.check_deadline()?;
        let tag = Tag::parse(content);
        for block in &self.blocks {
            if !block.will_accept(&tag) {
                continue;
            }
            if let Some(replacement) = block.process(&tag, ctx)? {
                return Ok(replacement);
            }
        }
        Ok(format!("{{{content}}}"))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::with_default_blocks()
    }
}

/// Finds the `}` matching the `{` at byte `open`, honouring nesting and
/// backslash escapes.
fn find_matching_brace(input: &str, open: usize) -> Result<usize, EngineError> {
    let bytes = input.as_bytes();
    let mut depth = 1usize;
    let mut j = open + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 1,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(j);
                }
            }
            _ => {}
        }
        j += 1;
    }
    Err(EngineError::UnclosedBlock { position: open })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{SeedSet, StringAdapter};
    use std::sync::Arc;

    fn seeds_with(name: &str, value: &str) -> SeedSet {
        let mut seeds = SeedSet::new();
        seeds.insert(name.to_string(), Arc::new(StringAdapter::new(value)));
        seeds
    }

    #[test]
    fn plain_text_passes_through() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter.process("hello world", SeedSet::new()).unwrap();
        assert_eq!(out.body, "hello world");
        assert!(out.actions.is_empty());
    }

    #[test]
    fn unknown_block_stays_verbatim() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter.process("{nosuch:thing}", SeedSet::new()).unwrap();
        assert_eq!(out.body, "{nosuch:thing}");
    }

    #[test]
    fn nested_blocks_resolve_inside_out() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter
            .process("{m:{m:1+1}*3}", SeedSet::new())
            .unwrap();
        assert_eq!(out.body, "6");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter
            .process(r"\{m:1+1\}", SeedSet::new())
            .unwrap();
        assert_eq!(out.body, "{m:1+1}");
    }

    #[test]
    fn unclosed_block_is_an_error() {
        let interpreter = Interpreter::with_default_blocks();
        let err = interpreter.process("before {m:1+1", SeedSet::new()).unwrap_err();
        assert!(matches!(err, EngineError::UnclosedBlock { position: 7 }));
    }

    #[test]
    fn unmatched_close_brace_is_literal() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter.process("a } b", SeedSet::new()).unwrap();
        assert_eq!(out.body, "a } b");
    }

    #[test]
    fn seed_lookup_resolves() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter
            .process("hi {who}", seeds_with("who", "there"))
            .unwrap();
        assert_eq!(out.body, "hi there");
    }

    #[test]
    fn depth_limit_enforced() {
        let interpreter = Interpreter::with_default_blocks();
        let mut script = String::new();
        for _ in 0..40 {
            script.push('{');
        }
        script.push_str("m:1");
        for _ in 0..40 {
            script.push('}');
        }
        let err = interpreter.process(&script, SeedSet::new()).unwrap_err();
        assert!(matches!(err, EngineError::DepthExceeded { .. }));
    }

    #[test]
    fn expired_deadline_fails_fast() {
        let interpreter = Interpreter::with_default_blocks();
        let limits = ExecutionLimits {
            deadline: Some(Instant::now() - std::time::Duration::from_secs(1)),
            ..ExecutionLimits::default()
        };
        let err = interpreter
            .process_with_limits("{m:1+1}", SeedSet::new(), limits)
            .unwrap_err();
        assert!(matches!(err, EngineError::DeadlineExceeded));
    }
}
