//! Allow-listed property paths.
//!
//! A [`PropertyPath`] is the only thing a [`BindingContext`](crate::BindingContext)
//! will evaluate. It can only be obtained by parsing a string against the
//! property-access grammar accepted by the host framework's parameter binding:
//!
//! ```text
//! path    := word suffix*
//! suffix  := '.' word
//!          | '[' digits ']'      | '(' digits ')'
//!          | "['" key "']"       | "('" key "')"
//! word    := [A-Za-z0-9_]+
//! digits  := [0-9]+
//! key     := (keychar '-'?)+
//! keychar := [A-Za-z0-9_] | U+4E00..=U+9FA5
//! ```
//!
//! Anything outside the grammar (whitespace, operators, method calls, quotes
//! that do not form a key index) is rejected before evaluation.

use std::fmt;
use std::str::FromStr;

use crate::error::TagError;

/// Bracket style of an index or key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `[...]`
    Bracket,
    /// `(...)`
    Paren,
}

impl Delimiter {
    fn close(self) -> char {
        match self {
            Self::Bracket => ']',
            Self::Paren => ')',
        }
    }
}

/// One suffix of a property path, after the head identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `.name`
    Property(String),
    /// `[0]` or `(0)`; the digits are kept verbatim.
    Index {
        /// The decimal digits between the delimiters.
        digits: String,
        /// Which delimiters enclosed the index.
        delimiter: Delimiter,
    },
    /// `['key']` or `('key')`
    Key {
        /// The key between the quotes.
        key: String,
        /// Which delimiters enclosed the key.
        delimiter: Delimiter,
    },
}

/// A property path that has passed the allow-list grammar.
///
/// There is no way to build a `PropertyPath` other than [`PropertyPath::parse`]
/// (or the equivalent `FromStr`/`TryFrom` impls), so holding one proves the
/// string was checked.
///
/// # Examples
///
/// ```
/// use formtags_core::{PropertyPath, Segment, TagErrorKind};
///
/// let path = PropertyPath::parse("user.addresses[0]").expect("valid path");
/// assert_eq!(path.head(), "user");
/// assert_eq!(path.segments()[0], Segment::Property("addresses".to_string()));
///
/// let err = PropertyPath::parse("user; drop").unwrap_err();
/// assert_eq!(err.kind(), TagErrorKind::InvalidPath);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    raw: String,
    head: String,
    segments: Vec<Segment>,
}

impl PropertyPath {
    /// Checks `input` against the grammar and returns the parsed path.
    ///
    /// # Errors
    ///
    /// Returns a [`TagErrorKind::InvalidPath`](crate::TagErrorKind::InvalidPath)
    /// error naming the rejected input.
    pub fn parse(input: &str) -> Result<Self, TagError> {
        Parser::new(input)
            .path()
            .ok_or_else(|| TagError::invalid_path(input))
    }

    /// Returns the path exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the leading identifier.
    pub fn head(&self) -> &str {
        &self.head
    }

    /// Returns the suffixes following the head, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PropertyPath {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PropertyPath {
    type Error = TagError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_key_char(c: char) -> bool {
    is_word_char(c) || ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes the longest run of characters matching `accept`.
    fn take_while(&mut self, accept: fn(char) -> bool) -> Option<&'a str> {
        let start = self.pos;
        let input = self.input;
        while let Some(c) = self.peek().filter(|&c| accept(c)) {
            self.pos += c.len_utf8();
        }
        if self.pos > start {
            Some(&input[start..self.pos])
        } else {
            None
        }
    }

    fn path(mut self) -> Option<PropertyPath> {
        let head = self.take_while(is_word_char)?.to_string();
        let mut segments = Vec::new();

        while let Some(c) = self.peek() {
            let segment = match c {
                '.' => {
                    self.pos += 1;
                    Segment::Property(self.take_while(is_word_char)?.to_string())
                }
                '[' => {
                    self.pos += 1;
                    self.indexer(Delimiter::Bracket)?
                }
                '(' => {
                    self.pos += 1;
                    self.indexer(Delimiter::Paren)?
                }
                _ => return None,
            };
            segments.push(segment);
        }

        Some(PropertyPath {
            raw: self.input.to_string(),
            head,
            segments,
        })
    }

    fn indexer(&mut self, delimiter: Delimiter) -> Option<Segment> {
        let segment = if self.eat('\'') {
            let key = self.key()?;
            if !self.eat('\'') {
                return None;
            }
            Segment::Key { key, delimiter }
        } else {
            let digits = self.take_while(|c| c.is_ascii_digit())?.to_string();
            Segment::Index { digits, delimiter }
        };

        self.eat(delimiter.close()).then_some(segment)
    }

    fn key(&mut self) -> Option<String> {
        let start = self.pos;
        // Each key character may carry one trailing hyphen; two in a row or a
        // leading hyphen end the key.
        while let Some(c) = self.peek().filter(|&c| is_key_char(c)) {
            self.pos += c.len_utf8();
            self.eat('-');
        }
        if self.pos > start {
            Some(self.input[start..self.pos].to_string())
        } else {
            None
        }
    }
}
