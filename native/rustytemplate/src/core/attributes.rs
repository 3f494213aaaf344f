//! Attribute Parsing
//!
//! Parses attributes from tag content. Accepts the HTML forms:
//! double-quoted, single-quoted, unquoted and valueless (boolean).

use super::entities::decode_text;
use super::scanner::is_whitespace;
use std::borrow::Cow;

/// A parsed attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name as written
    pub name: Cow<'a, str>,
    /// Attribute value (references decoded)
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    /// Create a new attribute
    pub fn new(name: &'a str, value: Cow<'a, str>) -> Self {
        Attribute {
            name: Cow::Borrowed(name),
            value,
        }
    }
}

/// Parse attributes from raw tag content (after the element name)
///
/// Input should be the content between element name and '>' or '/>'.
/// Lenient: stray characters are skipped.
pub fn parse_attributes(input: &str) -> Vec<Attribute<'_>> {
    parse_attributes_with_validation(input, false).0
}

/// Parse attributes, rejecting unterminated quoted values and duplicate names
pub fn parse_attributes_strict(input: &str) -> Result<Vec<Attribute<'_>>, &'static str> {
    let (attrs, error) = parse_attributes_with_validation(input, true);
    match error {
        Some(msg) => Err(msg),
        None => Ok(attrs),
    }
}

fn parse_attributes_with_validation(
    input: &str,
    strict: bool,
) -> (Vec<Attribute<'_>>, Option<&'static str>) {
    let bytes = input.as_bytes();
    let mut attrs: Vec<Attribute<'_>> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        if pos >= bytes.len() {
            break;
        }

        if bytes[pos] == b'/' {
            pos += 1;
            continue;
        }

        let name_start = pos;
        while pos < bytes.len() && is_attr_name_char(bytes[pos]) {
            pos += 1;
        }

        if pos == name_start {
            if strict {
                return (attrs, Some("Invalid character in attribute name"));
            }
            pos += 1;
            continue;
        }

        let name = &input[name_start..pos];

        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        let value = if pos < bytes.len() && bytes[pos] == b'=' {
            pos += 1;
            while pos < bytes.len() && is_whitespace(bytes[pos]) {
                pos += 1;
            }

            match bytes.get(pos) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let value_start = pos + 1;
                    match memchr::memchr(quote, &bytes[value_start..]) {
                        Some(len) => {
                            pos = value_start + len + 1;
                            decode_text(&input[value_start..value_start + len])
                        }
                        None => {
                            if strict {
                                return (attrs, Some("Unterminated attribute value"));
                            }
                            pos = bytes.len();
                            decode_text(&input[value_start..])
                        }
                    }
                }
                _ => {
                    let value_start = pos;
                    while pos < bytes.len() && !is_whitespace(bytes[pos]) {
                        pos += 1;
                    }
                    decode_text(&input[value_start..pos])
                }
            }
        } else {
            // Valueless attribute (HTML boolean attribute)
            Cow::Borrowed("")
        };

        if attrs.iter().any(|a| a.name == name) {
            if strict {
                return (attrs, Some("Duplicate attribute"));
            }
            // First occurrence wins
            continue;
        }

        attrs.push(Attribute::new(name, value));
    }

    (attrs, None)
}

#[inline]
fn is_attr_name_char(b: u8) -> bool {
    !is_whitespace(b) && !matches!(b, b'=' | b'/' | b'>' | b'"' | b'\'' | b'<')
}
