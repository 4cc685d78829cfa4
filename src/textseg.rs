//! Main module for textseg library functionality

pub mod config;
pub mod delimiters;
pub mod error;
pub mod extraction;
pub mod profile;
pub mod trailing;
pub mod wrapping;

pub use delimiters::{DelimiterMatch, DelimiterRole, DelimiterSet};
pub use error::{ErrorKind, Result, SegmentError};
pub use extraction::{extract_data_field, DataFieldProfile, ExtractedField};
pub use profile::{DelimiterProfile, Fields};
pub use trailing::TrailingDelimiterKind;
pub use wrapping::{wrap_at_length, MIN_LINE_LENGTH};
