//! `{field_name}` placeholder substitution.
//!
//! Syntax:
//! - `{name}` is replaced by the value of `name`; `name` must be an
//!   identifier (`[A-Za-z_][A-Za-z0-9_]*`).
//! - `{{` and `}}` produce a literal `{` and `}`. Substitutable files keep
//!   their own braces (Python f-strings, dict literals) this way.
//! - A lone `}` or a `{` without its closing brace is malformed.
//!
//! An unknown name is an error rather than being passed through: leaving
//! `{typo}` in a generated build file produces a project that fails later,
//! far from the cause.

use crate::domain::error::DomainError;

enum Piece<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

/// Walk `content`, yielding literal runs and placeholder names in order.
fn parse<'a>(
    content: &'a str,
    mut visit: impl FnMut(Piece<'a>) -> Result<(), DomainError>,
) -> Result<(), DomainError> {
    let bytes = content.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                visit(Piece::Text(&content[start..=i]))?;
                i += 2;
                start = i;
            }
            b'{' => {
                visit(Piece::Text(&content[start..i]))?;
                let close = content[i + 1..].find('}').map(|p| i + 1 + p).ok_or(
                    DomainError::MalformedPlaceholder {
                        offset: i,
                        reason: "unterminated '{'",
                    },
                )?;
                let name = &content[i + 1..close];
                if !is_identifier(name) {
                    return Err(DomainError::MalformedPlaceholder {
                        offset: i,
                        reason: "placeholder name must be an identifier",
                    });
                }
                visit(Piece::Placeholder(name))?;
                i = close + 1;
                start = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                visit(Piece::Text(&content[start..=i]))?;
                i += 2;
                start = i;
            }
            b'}' => {
                return Err(DomainError::MalformedPlaceholder {
                    offset: i,
                    reason: "single '}' must be escaped as '}}'",
                });
            }
            _ => i += 1,
        }
    }

    visit(Piece::Text(&content[start..]))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Substitute every placeholder in `content` using `lookup`.
pub fn render_placeholders<'v>(
    content: &str,
    lookup: impl Fn(&str) -> Option<&'v str>,
) -> Result<String, DomainError> {
    let mut out = String::with_capacity(content.len());
    parse(content, |piece| {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Placeholder(name) => {
                let value = lookup(name).ok_or_else(|| DomainError::UnknownPlaceholder {
                    name: name.to_string(),
                })?;
                out.push_str(value);
            }
        }
        Ok(())
    })?;
    Ok(out)
}

/// Placeholder names referenced by `content`, in first-use order.
pub fn placeholder_names(content: &str) -> Result<Vec<String>, DomainError> {
    let mut names: Vec<String> = Vec::new();
    parse(content, |piece| {
        if let Piece::Placeholder(name) = piece {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        Ok(())
    })?;
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<&'static str> {
        match name {
            "test_proc" => Some("test_adder"),
            "waves" => Some("1"),
            _ => None,
        }
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = render_placeholders("{test_proc} and {test_proc}, waves={waves}", lookup);
        assert_eq!(out.unwrap(), "test_adder and test_adder, waves=1");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let src = r#"dut._log.info(f"DUT: {{dut._name}}") # {test_proc}"#;
        let out = render_placeholders(src, lookup).unwrap();
        assert_eq!(out, r#"dut._log.info(f"DUT: {dut._name}") # test_adder"#);
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        assert_eq!(
            render_placeholders("x {clock} y", lookup),
            Err(DomainError::UnknownPlaceholder {
                name: "clock".into()
            })
        );
    }

    #[test]
    fn malformed_braces_are_errors() {
        assert!(matches!(
            render_placeholders("open { never closed", lookup),
            Err(DomainError::MalformedPlaceholder { offset: 5, .. })
        ));
        assert!(matches!(
            render_placeholders("stray } brace", lookup),
            Err(DomainError::MalformedPlaceholder { offset: 6, .. })
        ));
        assert!(matches!(
            render_placeholders("{dut.a}", lookup),
            Err(DomainError::MalformedPlaceholder { .. })
        ));
    }

    #[test]
    fn text_without_braces_is_unchanged() {
        let src = "SIM ?= icarus\näöü\n";
        assert_eq!(render_placeholders(src, lookup).unwrap(), src);
    }

    #[test]
    fn names_are_listed_once_in_order() {
        let names = placeholder_names("{b}{{a}}{a}{b}").unwrap();
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
    }
}
