//! SIMD-accelerated markup scanning using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)

use memchr::memchr;
use memchr::memmem;

/// Scanner for markup delimiter detection
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get a slice from start to end positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Find next '<' (tag start) using SIMD
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Check whether the '<' at `pos` opens a tag, comment or declaration
    ///
    /// A '<' followed by anything else (space, digit, end of input) is text.
    #[inline]
    pub fn opens_markup(&self, pos: usize) -> bool {
        match self.input.get(pos + 1) {
            Some(b'!' | b'?' | b'/') => true,
            Some(&b) => is_name_start_char(b),
            None => false,
        }
    }

    /// Find tag end while handling quotes properly
    /// Returns the position of '>' that is not inside quotes
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut pos = self.pos;
        let mut in_single_quote = false;
        let mut in_double_quote = false;

        while pos < self.input.len() {
            match self.input[pos] {
                b'"' if !in_single_quote => in_double_quote = !in_double_quote,
                b'\'' if !in_double_quote => in_single_quote = !in_single_quote,
                b'>' if !in_single_quote && !in_double_quote => return Some(pos),
                _ => {}
            }
            pos += 1;
        }
        None
    }

    /// Find the next occurrence of a byte sequence
    #[inline]
    pub fn find_seq(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.input[self.pos..], needle).map(|i| self.pos + i)
    }

    /// Find a closing tag for a raw-text element, ignoring ASCII case
    ///
    /// Returns the position of the `<` that starts `</name`.
    pub fn find_closing_tag(&self, name: &[u8]) -> Option<usize> {
        let mut pos = self.pos;
        while let Some(offset) = memmem::find(&self.input[pos..], b"</") {
            let start = pos + offset;
            let name_start = start + 2;
            let name_end = name_start + name.len();
            if name_end <= self.input.len()
                && self.input[name_start..name_end].eq_ignore_ascii_case(name)
                && self
                    .input
                    .get(name_end)
                    .map_or(true, |&b| is_whitespace(b) || b == b'>' || b == b'/')
            {
                return Some(start);
            }
            pos = start + 2;
        }
        None
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Read a tag name (starts with a letter, continues until whitespace, '/' or '>')
    pub fn read_name(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;

        if !self.input.get(start).copied().is_some_and(is_name_start_char) {
            return None;
        }

        self.pos += 1;

        while self.pos < self.input.len() && is_name_char(self.input[self.pos]) {
            self.pos += 1;
        }

        Some(&self.input[start..self.pos])
    }
}

/// Find every occurrence of `marker` in `haystack`, in order
pub fn marker_positions(haystack: &str, marker: &str) -> Vec<usize> {
    if marker.is_empty() {
        return Vec::new();
    }
    memmem::find_iter(haystack.as_bytes(), marker.as_bytes()).collect()
}

#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}

/// Check if byte may start a tag name
/// Allows ASCII letters, underscore, colon, and non-ASCII (UTF-8 Unicode)
#[inline]
fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

/// Check if byte may continue a tag name
#[inline]
fn is_name_char(b: u8) -> bool {
    !is_whitespace(b) && b != b'/' && b != b'>' && b != b'<'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tag_start() {
        let scanner = Scanner::new(b"hello <world>");
        assert_eq!(scanner.find_tag_start(), Some(6));
    }

    #[test]
    fn test_find_tag_end_quoted() {
        let scanner = Scanner::new(b"<a attr=\">test\">content");
        assert_eq!(scanner.find_tag_end_quoted(), Some(15));
    }

    #[test]
    fn test_read_name() {
        let mut scanner = Scanner::new(b"my-element>");
        assert_eq!(scanner.read_name(), Some(b"my-element" as &[u8]));
        assert_eq!(scanner.position(), 10);
    }

    #[test]
    fn test_opens_markup() {
        let scanner = Scanner::new(b"a < b <i></i><!-- --> 1<2 <");
        assert!(!scanner.opens_markup(2));
        assert!(scanner.opens_markup(6));
        assert!(scanner.opens_markup(9));
        assert!(scanner.opens_markup(13));
        assert!(!scanner.opens_markup(23));
        assert!(!scanner.opens_markup(26));
    }

    #[test]
    fn test_read_name_rejects_digit() {
        let mut scanner = Scanner::new(b"1abc");
        assert_eq!(scanner.read_name(), None);
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_find_closing_tag_case_insensitive() {
        let scanner = Scanner::new(b"if (a</b) {}</SCRIPT>");
        assert_eq!(scanner.find_closing_tag(b"script"), Some(12));
    }

    #[test]
    fn test_marker_positions() {
        assert_eq!(marker_positions("a@@b@@", "@@"), vec![1, 4]);
        assert!(marker_positions("plain", "@@").is_empty());
        assert!(marker_positions("plain", "").is_empty());
    }
}
