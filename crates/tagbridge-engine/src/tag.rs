//! Tag parsing: splits resolved block content into declaration, parameter and
//! payload. `{if(1==1):yes|no}` -> declaration `if`, parameter `1==1`,
//! payload `yes|no`.

#[derive(Debug, Clone, Copy)]
pub struct Tag<'a> {
    pub declaration: &'a str,
    pub parameter: Option<&'a str>,
    pub payload: Option<&'a str>,
}

impl<'a> Tag<'a> {
    /// Parses the text between a block's braces. Parameters honour balanced
    /// nested parentheses; the payload starts after the first `:` following
    /// the declaration (or the closing parenthesis).
    pub fn parse(content: &'a str) -> Self {
        let bytes = content.as_bytes();
        let mut declaration = content;
        let mut parameter = None;
        let mut payload = None;

        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'(' => {
                    declaration = &content[..i];
                    let mut depth = 1usize;
                    let mut j = i + 1;
                    while j < bytes.len() {
                        match bytes[j] {
                            b'(' => depth += 1,
                            b')' => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            _ => {}
                        }
                        j += 1;
                    }
                    if j < bytes.len() {
                        parameter = Some(&content[i + 1..j]);
                        if j + 1 < bytes.len() && bytes[j + 1] == b':' {
                            payload = Some(&content[j + 2..]);
                        }
                    } else {
                        // Unbalanced parens: the whole content is the declaration.
                        declaration = content;
                    }
                    break;
                }
                b':' => {
                    declaration = &content[..i];
                    payload = Some(&content[i + 1..]);
                    break;
                }
                _ => i += 1,
            }
        }

        Tag {
            declaration: declaration.trim(),
            parameter,
            payload,
        }
    }

    /// True when the declaration matches one of `names`, case-insensitively.
    pub fn declares_any(&self, names: &[&str]) -> bool {
        names
            .iter()
            .any(|n| self.declaration.eq_ignore_ascii_case(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_declaration() {
        let tag = Tag::parse("debug");
        assert_eq!(tag.declaration, "debug");
        assert_eq!(tag.parameter, None);
        assert_eq!(tag.payload, None);
    }

    #[test]
    fn full_tag() {
        let tag = Tag::parse("if(1==1):yes|no");
        assert_eq!(tag.declaration, "if");
        assert_eq!(tag.parameter, Some("1==1"));
        assert_eq!(tag.payload, Some("yes|no"));
    }

    #[test]
    fn payload_without_parameter() {
        let tag = Tag::parse("m:1+1");
        assert_eq!(tag.declaration, "m");
        assert_eq!(tag.parameter, None);
        assert_eq!(tag.payload, Some("1+1"));
    }

    #[test]
    fn nested_parens_stay_in_parameter() {
        let tag = Tag::parse("if((1)==(1)):ok");
        assert_eq!(tag.parameter, Some("(1)==(1)"));
        assert_eq!(tag.payload, Some("ok"));
    }

    #[test]
    fn payload_may_contain_colons() {
        let tag = Tag::parse("var(greet):hello:world");
        assert_eq!(tag.parameter, Some("greet"));
        assert_eq!(tag.payload, Some("hello:world"));
    }

    #[test]
    fn unbalanced_parens_fold_into_declaration() {
        let tag = Tag::parse("odd(stuff");
        assert_eq!(tag.declaration, "odd(stuff");
        assert_eq!(tag.parameter, None);
    }
}
