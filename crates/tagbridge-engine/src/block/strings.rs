//! Small text utilities: replace, length, count, ordinal, comment.

use super::Block;
use crate::error::EngineError;
use crate::interpreter::Context;
use crate::tag::Tag;

/// `{replace(old,new):text}`
pub struct ReplaceBlock;

impl Block for ReplaceBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["replace"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Some((old, new)) = tag.parameter.and_then(|p| p.split_once(',')) else {
            return Ok(None);
        };
        if old.is_empty() {
            return Ok(None);
        }
        Ok(Some(tag.payload.unwrap_or("").replace(old, new)))
    }
}

/// `{length:text}` — character count.
pub struct LengthBlock;

impl Block for LengthBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["length", "len"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        Ok(Some(
            tag.payload.unwrap_or("").chars().count().to_string(),
        ))
    }
}

/// `{count:text}` counts words; `{count(needle):text}` counts occurrences.
pub struct CountBlock;

impl Block for CountBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["count"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let payload = tag.payload.unwrap_or("");
        let count = match tag.parameter.filter(|needle| !needle.is_empty()) {
            Some(needle) => payload.matches(needle).count(),
            None => payload.split_whitespace().count(),
        };
        Ok(Some(count.to_string()))
    }
}

/// `{ord:1234}` -> `1,234th`
pub struct OrdinalBlock;

impl Block for OrdinalBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["ord", "ordinal"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let Ok(n) = tag.payload.unwrap_or("").trim().parse::<i64>() else {
            return Ok(None);
        };
        Ok(Some(format!("{}{}", group_thousands(n), ordinal_suffix(n))))
    }
}

fn ordinal_suffix(n: i64) -> &'static str {
    match n.abs() % 100 {
        11..=13 => "th",
        _ => match n.abs() % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `{comment:anything}` renders to nothing.
pub struct CommentBlock;

impl Block for CommentBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["comment", "//"])
    }

    fn process(&self, _tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        Ok(Some(String::new()))
    }
}
