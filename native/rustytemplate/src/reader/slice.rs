//! Zero-Copy Slice Reader
//!
//! Reads markup from a string slice with zero-copy semantics.
//! Input references are maintained directly in the output.

use super::events::{MarkupEvent, StartElement};
use crate::core::attributes::{parse_attributes, parse_attributes_strict, Attribute};
use crate::core::tokenizer::{ParseError, Token, TokenKind, Tokenizer};
use std::borrow::Cow;

/// Zero-copy markup reader from a string slice
pub struct SliceReader<'a> {
    tokenizer: Tokenizer<'a>,
    strict: bool,
    attr_error: Option<ParseError>,
}

impl<'a> SliceReader<'a> {
    /// Create a new slice reader (lenient mode)
    pub fn new(input: &'a str) -> Self {
        SliceReader {
            tokenizer: Tokenizer::new(input),
            strict: false,
            attr_error: None,
        }
    }

    /// Create a new slice reader in strict mode
    pub fn new_strict(input: &'a str) -> Self {
        SliceReader {
            tokenizer: Tokenizer::new_strict(input),
            strict: true,
            attr_error: None,
        }
    }

    /// Get the first parse error (strict mode only)
    pub fn error(&self) -> Option<&ParseError> {
        match (&self.attr_error, self.tokenizer.error()) {
            (Some(a), Some(t)) if t.position < a.position => Some(t),
            (Some(a), _) => Some(a),
            (None, t) => t,
        }
    }

    /// Current byte offset into the input
    pub fn position(&self) -> usize {
        self.tokenizer.position()
    }

    /// Get the next markup event, or None at end of input
    pub fn next_event(&mut self) -> Option<MarkupEvent<'a>> {
        loop {
            let token = self.tokenizer.next_token()?;

            match token.kind {
                TokenKind::Eof => return None,

                TokenKind::StartTag => {
                    let attrs = self.parse_tag_attributes(&token);
                    let name = token.name?;
                    return Some(MarkupEvent::StartElement(StartElement::new(name, attrs)));
                }

                TokenKind::EmptyTag => {
                    let attrs = self.parse_tag_attributes(&token);
                    let name = token.name?;
                    return Some(MarkupEvent::EmptyElement(StartElement::new(name, attrs)));
                }

                TokenKind::EndTag => {
                    let name = token.name?;
                    return Some(MarkupEvent::EndElement(name));
                }

                TokenKind::Text => {
                    if let Some(content) = token.content {
                        // Whitespace-only text is content too
                        if !content.is_empty() {
                            return Some(MarkupEvent::Text(content));
                        }
                    }
                }

                TokenKind::Comment => {
                    return Some(MarkupEvent::Comment(
                        token.content.unwrap_or(Cow::Borrowed("")),
                    ));
                }

                TokenKind::DocType => {
                    if let Some(content) = token.content {
                        return Some(MarkupEvent::DocType(content));
                    }
                }
            }
        }
    }

    /// Parse attributes from a tag token
    fn parse_tag_attributes(&mut self, token: &Token<'a>) -> Vec<Attribute<'a>> {
        let Some(raw) = token.attributes else {
            return Vec::new();
        };

        if self.strict {
            match parse_attributes_strict(raw) {
                Ok(attrs) => attrs,
                Err(msg) => {
                    if self.attr_error.is_none() {
                        self.attr_error = Some(ParseError::new(msg, token.span.0));
                    }
                    Vec::new()
                }
            }
        } else {
            parse_attributes(raw)
        }
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = MarkupEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

/// Read markup from a string slice and return all events
pub fn parse_events(input: &str) -> Vec<MarkupEvent<'_>> {
    SliceReader::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_element() {
        let events = parse_events("<p>hello</p>");
        assert_eq!(events.len(), 3);

        assert!(matches!(&events[0], MarkupEvent::StartElement(e) if e.name == "p"));
        assert!(matches!(&events[1], MarkupEvent::Text(t) if t == "hello"));
        assert!(matches!(&events[2], MarkupEvent::EndElement("p")));
    }

    #[test]
    fn test_empty_element() {
        let events = parse_events("<br/>");
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], MarkupEvent::EmptyElement(e) if e.name == "br"));
    }

    #[test]
    fn test_attributes() {
        let events = parse_events("<div id=\"main\" class=\"container\"></div>");
        let e = events[0].as_start_element().expect("start element");
        assert_eq!(e.get_attribute_value("id"), Some("main"));
        assert_eq!(e.get_attribute_value("class"), Some("container"));
    }

    #[test]
    fn test_comment() {
        let events = parse_events("<ul><!-- items --></ul>");
        assert!(events
            .iter()
            .any(|e| matches!(e, MarkupEvent::Comment(c) if c == " items ")));
    }

    #[test]
    fn test_strict_attribute_error() {
        let mut reader = SliceReader::new_strict("<a x=\"1\" x=\"2\"></a>");
        while reader.next_event().is_some() {}
        let err = reader.error().expect("duplicate attribute error");
        assert_eq!(err.position, 0);
    }
}
