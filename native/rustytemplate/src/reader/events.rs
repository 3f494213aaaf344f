//! Markup Event Types
//!
//! Event types for pull-parser style markup processing.

use crate::core::attributes::Attribute;
use std::borrow::Cow;

/// Markup parsing event
#[derive(Debug, Clone)]
pub enum MarkupEvent<'a> {
    /// Start of an element: <name attrs...>
    StartElement(StartElement<'a>),
    /// End of an element: </name>
    EndElement(&'a str),
    /// Self-closing element: <name attrs.../>
    EmptyElement(StartElement<'a>),
    /// Text content between tags
    Text(Cow<'a, str>),
    /// Comment content
    Comment(Cow<'a, str>),
    /// Doctype or other declaration, kept verbatim
    DocType(Cow<'a, str>),
}

/// Start element event data
#[derive(Debug, Clone)]
pub struct StartElement<'a> {
    /// Element name as written
    pub name: &'a str,
    /// Element attributes, in source order
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> StartElement<'a> {
    pub fn new(name: &'a str, attributes: Vec<Attribute<'a>>) -> Self {
        StartElement { name, attributes }
    }

    /// Get an attribute value by name
    pub fn get_attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_ref())
    }
}

impl<'a> MarkupEvent<'a> {
    /// Check if this is a start element event
    pub fn is_start_element(&self) -> bool {
        matches!(self, MarkupEvent::StartElement(_) | MarkupEvent::EmptyElement(_))
    }

    /// Get as start element if applicable
    pub fn as_start_element(&self) -> Option<&StartElement<'a>> {
        match self {
            MarkupEvent::StartElement(e) | MarkupEvent::EmptyElement(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if applicable
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MarkupEvent::Text(t) => Some(t.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_element_attribute_lookup() {
        let elem = StartElement::new(
            "div",
            vec![Attribute::new("id", Cow::Borrowed("main"))],
        );
        assert_eq!(elem.get_attribute_value("id"), Some("main"));
        assert_eq!(elem.get_attribute_value("class"), None);
    }

    #[test]
    fn test_event_accessors() {
        let event = MarkupEvent::EmptyElement(StartElement::new("br", vec![]));
        assert!(event.is_start_element());
        assert_eq!(event.as_start_element().map(|e| e.name), Some("br"));
        assert_eq!(MarkupEvent::Text(Cow::Borrowed("hi")).as_text(), Some("hi"));
    }
}
