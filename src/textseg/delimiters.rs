//! Delimiter Sets
//!
//! A delimiter set is an ordered list of literal strings that play one role in a scan
//! (keyword anchor, leading separator, trailing separator, comment start, end-of-line).
//! Matching is literal, code point by code point; there is no pattern syntax.
//!
//! Two different "empty" situations exist and must not be confused:
//!     - A set with no entries at all means the role is switched off.
//!     - A set whose entries are all empty strings is a malformed call.
//!
//! Empty strings mixed in with real entries are tolerated and never match.
//!
//! Where several entries match at the same earliest position, the one listed first wins.

use crate::textseg::error::{Result, SegmentError};
use serde::Serialize;
use std::fmt;

/// The purpose a delimiter set serves during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelimiterRole {
    Keyword,
    LeadingSeparator,
    TrailingSeparator,
    Comment,
    EndOfLine,
}

impl fmt::Display for DelimiterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DelimiterRole::Keyword => "keyword",
            DelimiterRole::LeadingSeparator => "leading separator",
            DelimiterRole::TrailingSeparator => "trailing separator",
            DelimiterRole::Comment => "comment",
            DelimiterRole::EndOfLine => "end-of-line",
        };
        f.write_str(name)
    }
}

/// A delimiter literal found in the host text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelimiterMatch {
    pub delimiter: String,
    /// Code point index of the first character of the match.
    pub index: usize,
}

impl DelimiterMatch {
    /// Length of the matched literal in code points.
    pub fn char_len(&self) -> usize {
        self.delimiter.chars().count()
    }

    /// Index of the first code point after the match.
    pub fn end(&self) -> usize {
        self.index + self.char_len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Delimiter {
    literal: String,
    chars: Vec<char>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimiterSet {
    entries: Vec<Delimiter>,
}

impl DelimiterSet {
    pub fn new<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = literals
            .into_iter()
            .map(|literal| {
                let literal = literal.into();
                let chars = literal.chars().collect();
                Delimiter { literal, chars }
            })
            .collect();
        Self { entries }
    }

    /// A set with no entries; the role it is used for is inactive.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when at least one entry is a non-empty string.
    pub fn has_usable(&self) -> bool {
        self.entries.iter().any(|d| !d.chars.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.literal.as_str())
    }

    /// Checks the set is fit for `role`.
    ///
    /// Required roles must have at least one usable entry. Optional roles may be empty, but
    /// once any entry is supplied at least one of them has to be usable.
    pub fn validate(&self, role: DelimiterRole, required: bool) -> Result<()> {
        if self.is_empty() {
            if required {
                return Err(SegmentError::MissingDelimiters { role });
            }
            return Ok(());
        }
        if !self.has_usable() {
            return Err(SegmentError::AllEmptyDelimiters { role });
        }
        Ok(())
    }

    /// Returns the first entry, in list order, that matches starting exactly at `index`.
    ///
    /// The returned pair is the literal and its length in code points.
    pub fn match_at(&self, text: &[char], index: usize) -> Option<(&str, usize)> {
        let rest = text.get(index..)?;
        self.entries
            .iter()
            .filter(|d| !d.chars.is_empty())
            .find(|d| rest.starts_with(&d.chars))
            .map(|d| (d.literal.as_str(), d.chars.len()))
    }

    /// Finds the earliest occurrence of any entry at or after `from`.
    pub fn find_earliest(&self, text: &[char], from: usize) -> Option<DelimiterMatch> {
        if !self.has_usable() {
            return None;
        }
        (from..text.len()).find_map(|index| {
            self.match_at(text, index)
                .map(|(literal, _)| DelimiterMatch {
                    delimiter: literal.to_string(),
                    index,
                })
        })
    }
}

impl<S: Into<String>> FromIterator<S> for DelimiterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<String>> for DelimiterSet {
    fn from(literals: Vec<String>) -> Self {
        Self::new(literals)
    }
}

impl From<&[&str]> for DelimiterSet {
    fn from(literals: &[&str]) -> Self {
        Self::new(literals.iter().copied())
    }
}
