//! Variable adapters: the seam between the interpreter and caller entities.

use std::collections::HashMap;
use std::sync::Arc;

/// Named variable bindings for one execution call.
pub type SeedSet = HashMap<String, Arc<dyn Adapter>>;

/// Resolves a seed reference such as `{user}` or `{user(name)}`.
///
/// `param` carries the parenthesised attribute, if any. Returning `None`
/// rejects the lookup and leaves the block verbatim in the output.
pub trait Adapter: Send + Sync {
    fn get_value(&self, param: Option<&str>) -> Option<String>;
}

/// Plain string variable. Supports 1-based word indexing and a length
/// attribute: `{args(2)}`, `{args(len)}`.
pub struct StringAdapter {
    value: String,
}

impl StringAdapter {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Adapter for StringAdapter {
    fn get_value(&self, param: Option<&str>) -> Option<String> {
        let Some(param) = param else {
            return Some(self.value.clone());
        };
        let param = param.trim();
        if let Ok(index) = param.parse::<usize>() {
            return self
                .value
                .split_whitespace()
                .nth(index.saturating_sub(1))
                .map(str::to_string);
        }
        if param.eq_ignore_ascii_case("len") || param.eq_ignore_ascii_case("length") {
            return Some(self.value.chars().count().to_string());
        }
        Some(self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_adapter_word_indexing() {
        let adapter = StringAdapter::new("alpha beta gamma");
        assert_eq!(adapter.get_value(None).as_deref(), Some("alpha beta gamma"));
        assert_eq!(adapter.get_value(Some("1")).as_deref(), Some("alpha"));
        assert_eq!(adapter.get_value(Some("3")).as_deref(), Some("gamma"));
        assert_eq!(adapter.get_value(Some("9")), None);
        assert_eq!(adapter.get_value(Some("len")).as_deref(), Some("16"));
    }
}
