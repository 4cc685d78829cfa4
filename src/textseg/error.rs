//! Errors reported by field extraction and line wrapping.
//!
//! Every variant describes a malformed call. A scan that simply finds nothing is not an
//! error: it comes back as an `Ok` result with no field.

use crate::textseg::delimiters::DelimiterRole;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SegmentError>;

/// Broad classification of a [`SegmentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad text, index or delimiter configuration.
    InvalidArgument,
    /// Line length below the minimum, or a null break character.
    BoundaryUnderflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("host text is an empty string")]
    EmptyText,

    #[error("start index {start} is out of bounds for text of length {len}")]
    StartIndexOutOfRange { start: usize, len: usize },

    #[error("{role} delimiters are required but none were supplied")]
    MissingDelimiters { role: DelimiterRole },

    #[error("{role} delimiters consist entirely of empty strings")]
    AllEmptyDelimiters { role: DelimiterRole },

    #[error("line length {line_length} is less than the minimum of {minimum}")]
    LineLengthTooShort { line_length: usize, minimum: usize },

    #[error("line break character is the null code point")]
    NullBreakChar,
}

impl SegmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SegmentError::EmptyText
            | SegmentError::StartIndexOutOfRange { .. }
            | SegmentError::MissingDelimiters { .. }
            | SegmentError::AllEmptyDelimiters { .. } => ErrorKind::InvalidArgument,
            SegmentError::LineLengthTooShort { .. } | SegmentError::NullBreakChar => {
                ErrorKind::BoundaryUnderflow
            }
        }
    }
}
