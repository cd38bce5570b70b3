//! Time formatting: `{strf:%Y-%m-%d}` and `{unix}`.

use super::Block;
use crate::error::EngineError;
use crate::interpreter::Context;
use crate::tag::Tag;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

/// Formats a timestamp with a strftime payload. The parameter selects the
/// instant: absent means now, all-digits is Unix seconds, otherwise RFC 3339.
/// The bare `{unix}` declaration renders the current Unix time.
pub struct StrfBlock;

impl Block for StrfBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["strf", "unix"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        if tag.declaration.eq_ignore_ascii_case("unix") {
            return Ok(Some(Utc::now().timestamp().to_string()));
        }
        let Some(format) = tag.payload else {
            return Ok(None);
        };
        let Some(instant) = resolve_instant(tag.parameter) else {
            return Ok(None);
        };
        let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Ok(None);
        }
        Ok(Some(
            instant.format_with_items(items.into_iter()).to_string(),
        ))
    }
}

fn resolve_instant(parameter: Option<&str>) -> Option<DateTime<Utc>> {
    let Some(parameter) = parameter.map(str::trim).filter(|p| !p.is_empty()) else {
        return Some(Utc::now());
    };
    if parameter.bytes().all(|b| b.is_ascii_digit()) {
        return parameter
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0));
    }
    DateTime::parse_from_rfc3339(parameter)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::SeedSet;
    use crate::interpreter::Interpreter;

    #[test]
    fn formats_explicit_timestamp() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter
            .process("{strf(1700000000):%Y-%m-%d}", SeedSet::new())
            .unwrap();
        assert_eq!(out.body, "2023-11-14");
    }

    #[test]
    fn invalid_format_is_left_verbatim() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter
            .process("{strf(1700000000):%Q}", SeedSet::new())
            .unwrap();
        assert_eq!(out.body, "{strf(1700000000):%Q}");
    }

    #[test]
    fn unix_renders_digits() {
        let interpreter = Interpreter::with_default_blocks();
        let out = interpreter.process("{unix}", SeedSet::new()).unwrap();
        assert!(out.body.bytes().all(|b| b.is_ascii_digit()));
    }
}
