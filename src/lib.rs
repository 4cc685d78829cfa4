//! # textseg
//!
//! Character-level scanning over single lines of text.
//!
//! Two leaf algorithms live here, both pure functions over an immutable input:
//!
//!     - Field extraction: locate one data field inside a line, optionally anchored by a
//!       keyword, bounded by leading/trailing separators and cut short by comments or
//!       end-of-line markers. See [extraction](textseg::extraction).
//!     - Line wrapping: reflow a string into lines of a bounded length, breaking on word
//!       boundaries and hyphenating only words that cannot fit a line on their own.
//!       See [wrapping](textseg::wrapping).
//!
//! All indices are code point offsets, never byte offsets.

pub mod textseg;

pub use textseg::{
    extract_data_field, wrap_at_length, DataFieldProfile, DelimiterProfile, DelimiterSet,
    SegmentError, TrailingDelimiterKind,
};
