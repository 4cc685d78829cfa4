//! Delimiter profiles bundle the five delimiter roles for a parsing session, so a
//! line-oriented reader can assemble them once and reuse them for every line.

use crate::textseg::delimiters::DelimiterSet;
use crate::textseg::error::Result;
use crate::textseg::extraction::{extract_data_field, DataFieldProfile, ExtractedField};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimiterProfile {
    pub keywords: DelimiterSet,
    pub leading: DelimiterSet,
    pub trailing: DelimiterSet,
    pub comments: DelimiterSet,
    pub end_of_line: DelimiterSet,
}

impl DelimiterProfile {
    /// A profile with only the two required separator roles active.
    pub fn new(leading: impl Into<DelimiterSet>, trailing: impl Into<DelimiterSet>) -> Self {
        Self {
            leading: leading.into(),
            trailing: trailing.into(),
            ..Self::default()
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<DelimiterSet>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn with_comments(mut self, comments: impl Into<DelimiterSet>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn with_end_of_line(mut self, end_of_line: impl Into<DelimiterSet>) -> Self {
        self.end_of_line = end_of_line.into();
        self
    }

    /// Runs [`extract_data_field`] with this profile's delimiters.
    pub fn extract(&self, text: &str, start: usize) -> Result<DataFieldProfile> {
        extract_data_field(
            text,
            &self.keywords,
            start,
            &self.leading,
            &self.trailing,
            &self.comments,
            &self.end_of_line,
        )
    }

    /// Iterates over every field of `text`, resuming each call at the previous
    /// `next_index`. An empty `text` yields nothing.
    pub fn fields<'a>(&'a self, text: &'a str) -> Fields<'a> {
        Fields {
            profile: self,
            text,
            next: (!text.is_empty()).then_some(0),
        }
    }
}

/// Iterator returned by [`DelimiterProfile::fields`].
///
/// Stops after the first field without a resume index, the first empty result, or the
/// first error.
#[derive(Debug)]
pub struct Fields<'a> {
    profile: &'a DelimiterProfile,
    text: &'a str,
    next: Option<usize>,
}

impl Iterator for Fields<'_> {
    type Item = Result<ExtractedField>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next.take()?;
        match self.profile.extract(self.text, start) {
            Ok(profile) => {
                let field = profile.field?;
                self.next = field.next_index;
                Some(Ok(field))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
