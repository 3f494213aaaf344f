//! Markup Tokenizer - State machine for token extraction
//!
//! Implements a pull-parser style tokenizer for HTML-like markup:
//! - Element start/end/empty tags
//! - Text content (references decoded)
//! - Comments and doctype declarations
//! - Raw text elements (`script`, `style`, `textarea`, `title`)

use super::entities::decode_text;
use super::scanner::Scanner;
use std::borrow::Cow;

/// Current parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Between tokens
    Content,
    /// Inside the body of a raw text element
    RawText,
    /// End of input reached
    Done,
}

/// Type of markup token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: <element>
    StartTag,
    /// Element end tag: </element>
    EndTag,
    /// Self-closing element: <element/>
    EmptyTag,
    /// Text content
    Text,
    /// Comment: <!--...-->
    Comment,
    /// Doctype or other `<!...>` declaration
    DocType,
    /// End of input
    Eof,
}

/// A parsed markup token
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw span in input (start, end)
    pub span: (usize, usize),
    /// For tags: the element name
    pub name: Option<&'a str>,
    /// For tags: raw attribute text between the name and the closing `>` or `/>`
    pub attributes: Option<&'a str>,
    /// For text/comments: the content (owned only if references were decoded)
    pub content: Option<Cow<'a, str>>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            name: None,
            attributes: None,
            content: None,
        }
    }

    fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    fn with_attributes(mut self, attributes: &'a str) -> Self {
        self.attributes = Some(attributes);
        self
    }

    fn with_content(mut self, content: Cow<'a, str>) -> Self {
        self.content = Some(content);
        self
    }
}

/// Error type for strict mode failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
        }
    }
}

/// Elements whose content is not markup
const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "title"];

/// Markup tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    input: &'a str,
    scanner: Scanner<'a>,
    state: ParseState,
    strict: bool,
    error: Option<ParseError>,
    /// Name of the raw text element whose body comes next
    raw_element: Option<&'a str>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input (lenient mode)
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            scanner: Scanner::new(input.as_bytes()),
            state: ParseState::Content,
            strict: false,
            error: None,
            raw_element: None,
        }
    }

    /// Create a new tokenizer in strict mode
    pub fn new_strict(input: &'a str) -> Self {
        Tokenizer {
            strict: true,
            ..Tokenizer::new(input)
        }
    }

    /// Get any parse error (strict mode only)
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Set an error if in strict mode
    fn set_error(&mut self, message: impl Into<String>, position: usize) {
        if self.strict && self.error.is_none() {
            self.error = Some(ParseError::new(message, position));
        }
    }

    /// Get the current parse state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Get the current position in the input
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Get the next token, or None once Eof has been returned
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        loop {
            match self.state {
                ParseState::Done => return None,
                ParseState::RawText => {
                    self.state = ParseState::Content;
                    if let Some(token) = self.parse_raw_text() {
                        return Some(token);
                    }
                }
                ParseState::Content => {
                    if self.scanner.is_eof() {
                        self.state = ParseState::Done;
                        let end = self.input.len();
                        return Some(Token::new(TokenKind::Eof, (end, end)));
                    }
                    let token = if self.scanner.peek() == Some(b'<') {
                        self.parse_markup()
                    } else {
                        self.parse_text(self.scanner.position())
                    };
                    if let Some(token) = token {
                        return Some(token);
                    }
                }
            }
        }
    }

    /// Parse a construct starting at '<'
    fn parse_markup(&mut self) -> Option<Token<'a>> {
        let start = self.scanner.position();

        if self.scanner.starts_with(b"<!--") {
            return Some(self.parse_comment(start));
        }

        match self.scanner.peek_at(1) {
            Some(b'!') | Some(b'?') => Some(self.parse_declaration(start)),
            Some(b'/') => self.parse_end_tag(start),
            _ => self.parse_start_tag(start),
        }
    }

    fn parse_comment(&mut self, start: usize) -> Token<'a> {
        self.scanner.advance(4);
        let content_start = self.scanner.position();
        let (content_end, end) = match self.scanner.find_seq(b"-->") {
            Some(pos) => (pos, pos + 3),
            None => {
                self.set_error("Unterminated comment", start);
                (self.input.len(), self.input.len())
            }
        };
        self.scanner.set_position(end);
        Token::new(TokenKind::Comment, (start, end))
            .with_content(Cow::Borrowed(&self.input[content_start..content_end]))
    }

    /// `<!DOCTYPE ...>`, `<![CDATA[...]]>` and `<?...>` are all kept opaque
    fn parse_declaration(&mut self, start: usize) -> Token<'a> {
        let end = match self.scanner.find_tag_end_quoted() {
            Some(pos) => pos + 1,
            None => {
                self.set_error("Unterminated declaration", start);
                self.input.len()
            }
        };
        self.scanner.set_position(end);
        Token::new(TokenKind::DocType, (start, end))
            .with_content(Cow::Borrowed(&self.input[start..end]))
    }

    fn parse_start_tag(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1);
        let name_start = self.scanner.position();
        if self.scanner.read_name().is_none() {
            // A lone '<' is ordinary text
            self.set_error("Invalid tag name", start);
            return self.parse_text(start);
        }
        let name = &self.input[name_start..self.scanner.position()];

        let Some(gt) = self.scanner.find_tag_end_quoted() else {
            self.set_error("Unterminated start tag", start);
            self.scanner.set_position(self.input.len());
            return None;
        };

        let attr_start = self.scanner.position();
        let self_closing = gt > attr_start && self.input.as_bytes()[gt - 1] == b'/';
        let attr_end = if self_closing { gt - 1 } else { gt };
        self.scanner.set_position(gt + 1);

        let kind = if self_closing {
            TokenKind::EmptyTag
        } else {
            if RAW_TEXT_ELEMENTS.iter().any(|raw| raw.eq_ignore_ascii_case(name)) {
                self.raw_element = Some(name);
                self.state = ParseState::RawText;
            }
            TokenKind::StartTag
        };

        Some(
            Token::new(kind, (start, gt + 1))
                .with_name(name)
                .with_attributes(&self.input[attr_start..attr_end]),
        )
    }

    fn parse_end_tag(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(2);
        let name_start = self.scanner.position();
        let name = self
            .scanner
            .read_name()
            .map(|_| &self.input[name_start..self.scanner.position()]);

        let end = match self.scanner.find_tag_end_quoted() {
            Some(pos) => pos + 1,
            None => {
                self.set_error("Unterminated end tag", start);
                self.input.len()
            }
        };
        self.scanner.set_position(end);

        match name {
            Some(name) => Some(Token::new(TokenKind::EndTag, (start, end)).with_name(name)),
            None => {
                // `</>` or `</ 3>` carry no element; drop them
                self.set_error("Invalid end tag", start);
                None
            }
        }
    }

    /// Text from `start` up to the next '<' that opens markup
    ///
    /// A lone '<' stays inside the text run instead of starting a new one.
    fn parse_text(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.set_position(start + 1);
        let mut end = self.input.len();
        while let Some(lt) = self.scanner.find_tag_start() {
            if self.scanner.opens_markup(lt) {
                end = lt;
                break;
            }
            self.set_error("Invalid tag name", lt);
            self.scanner.set_position(lt + 1);
        }
        self.scanner.set_position(end);
        Some(
            Token::new(TokenKind::Text, (start, end))
                .with_content(decode_text(&self.input[start..end])),
        )
    }

    fn parse_raw_text(&mut self) -> Option<Token<'a>> {
        let name = self.raw_element.take()?;
        let start = self.scanner.position();
        let end = match self.scanner.find_closing_tag(name.as_bytes()) {
            Some(pos) => pos,
            None => {
                self.set_error(format!("Unclosed <{name}> element"), start);
                self.input.len()
            }
        };
        self.scanner.set_position(end);
        if end == start {
            return None;
        }

        let raw = &self.input[start..end];
        let content = if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")
        {
            Cow::Borrowed(raw)
        } else {
            decode_text(raw)
        };
        Some(Token::new(TokenKind::Text, (start, end)).with_content(content))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().filter(|t| t.kind != TokenKind::Eof)
    }
}
