//! Data Field Extraction
//!
//!     Locates one data field inside a line of text. A field is a run of characters that
//!     follows any number of leading separators and stops at the first trailing separator,
//!     comment, end-of-line marker or the end of the text.
//!
//! The Scan Pipeline
//!
//!     The scan is a fixed sequence of stages over a single `last_good` index, the last
//!     code point that may still belong to field data. Each stage may only lower it:
//!
//!         1. End-of-line: the earliest end-of-line delimiter at or after `start` cuts the
//!            line one position before it.
//!         2. Comment: the earliest comment delimiter inside what is left cuts it again.
//!            Comments are looked at after end-of-line, since a comment that starts past
//!            the line terminator belongs to a later line.
//!         3. Keyword: when keywords are configured, the field search starts right after
//!            the earliest keyword. No keyword, or a keyword at or past `last_good`, means
//!            there is nothing to extract.
//!         4. Main scan: leading separators are skipped and discarded until the first
//!            field character; after that, the first trailing separator ends the field.
//!
//!     When any stage leaves no room, the call returns a profile without a field. That is
//!     a normal outcome; only malformed arguments produce an error.

use crate::textseg::delimiters::{DelimiterMatch, DelimiterRole, DelimiterSet};
use crate::textseg::error::{Result, SegmentError};
use crate::textseg::trailing::TrailingDelimiterKind;
use serde::Serialize;

/// The field found by [`extract_data_field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedField {
    pub text: String,
    /// Code point index of the first field character.
    pub index: usize,
    /// Field length in code points.
    pub length: usize,
    /// The literal that ended the field. `None` when the field ran to the end of the text.
    pub trailing_delimiter: Option<String>,
    pub trailing_kind: TrailingDelimiterKind,
    /// Where the caller should resume scanning the same line, if anything is left.
    pub next_index: Option<usize>,
}

/// Everything a single extraction call learned about the host text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataFieldProfile {
    /// Host text length in code points.
    pub target_len: usize,
    /// The start index the caller asked for.
    pub start_index: usize,
    /// Last index eligible for field data, after comment and end-of-line clamping.
    /// `None` when the clamp fell below index zero.
    pub last_good_index: Option<usize>,
    pub keyword: Option<DelimiterMatch>,
    pub field: Option<ExtractedField>,
    pub comment: Option<DelimiterMatch>,
    pub end_of_line: Option<DelimiterMatch>,
}

impl DataFieldProfile {
    pub fn is_found(&self) -> bool {
        self.field.is_some()
    }

    /// The field text, or `""` when nothing was found.
    pub fn field_text(&self) -> &str {
        self.field.as_ref().map_or("", |f| f.text.as_str())
    }

    pub fn next_index(&self) -> Option<usize> {
        self.field.as_ref().and_then(|f| f.next_index)
    }

    pub fn trailing_kind(&self) -> TrailingDelimiterKind {
        self.field
            .as_ref()
            .map_or(TrailingDelimiterKind::Unknown, |f| f.trailing_kind)
    }

    fn not_found(window: ScanWindow, keyword: Option<DelimiterMatch>) -> Self {
        Self {
            target_len: window.target_len,
            start_index: window.requested_start,
            last_good_index: window.last_good,
            keyword,
            field: None,
            comment: window.comment,
            end_of_line: window.end_of_line,
        }
    }
}

/// The shrinking range of the host text that may still hold field data.
#[derive(Debug)]
struct ScanWindow {
    target_len: usize,
    requested_start: usize,
    start: usize,
    last_good: Option<usize>,
    cutoff: Option<(String, TrailingDelimiterKind)>,
    comment: Option<DelimiterMatch>,
    end_of_line: Option<DelimiterMatch>,
}

impl ScanWindow {
    fn new(target_len: usize, start: usize) -> Self {
        Self {
            target_len,
            requested_start: start,
            start,
            last_good: target_len.checked_sub(1),
            cutoff: None,
            comment: None,
            end_of_line: None,
        }
    }

    /// Lowers `last_good` to just before `found`. Never raises it.
    fn clamp_before(&mut self, found: &DelimiterMatch, kind: TrailingDelimiterKind) {
        let candidate = found.index.checked_sub(1);
        if candidate < self.last_good {
            self.last_good = candidate;
            self.cutoff = Some((found.delimiter.clone(), kind));
        }
    }

    fn is_exhausted(&self) -> bool {
        self.last_good.map_or(true, |last| self.start > last)
    }
}

/// Extracts the next data field from `text`, scanning from code point `start`.
///
/// `leading` and `trailing` are required. `keywords`, `comments` and `end_of_line` may be
/// empty sets to switch their stage off.
///
/// # Errors
///
/// Returns [`SegmentError`] when `text` is empty, `start` is out of range, a required
/// delimiter set is missing, or any supplied set holds only empty strings. Finding no
/// field is not an error.
pub fn extract_data_field(
    text: &str,
    keywords: &DelimiterSet,
    start: usize,
    leading: &DelimiterSet,
    trailing: &DelimiterSet,
    comments: &DelimiterSet,
    end_of_line: &DelimiterSet,
) -> Result<DataFieldProfile> {
    let chars: Vec<char> = text.chars().collect();

    if chars.is_empty() {
        return Err(SegmentError::EmptyText);
    }
    if start >= chars.len() {
        return Err(SegmentError::StartIndexOutOfRange {
            start,
            len: chars.len(),
        });
    }
    leading.validate(DelimiterRole::LeadingSeparator, true)?;
    trailing.validate(DelimiterRole::TrailingSeparator, true)?;
    keywords.validate(DelimiterRole::Keyword, false)?;
    comments.validate(DelimiterRole::Comment, false)?;
    end_of_line.validate(DelimiterRole::EndOfLine, false)?;

    let mut window = ScanWindow::new(chars.len(), start);

    if let Some(eol) = end_of_line.find_earliest(&chars, window.start) {
        log::trace!("end-of-line {:?} at {}", eol.delimiter, eol.index);
        window.clamp_before(&eol, TrailingDelimiterKind::EndOfLine);
        window.end_of_line = Some(eol);
        if window.is_exhausted() {
            return Ok(DataFieldProfile::not_found(window, None));
        }
    }

    if let Some(comment) = comments.find_earliest(&chars, window.start) {
        if Some(comment.index) <= window.last_good {
            log::trace!("comment {:?} at {}", comment.delimiter, comment.index);
            window.clamp_before(&comment, TrailingDelimiterKind::Comment);
            window.comment = Some(comment);
            if window.is_exhausted() {
                return Ok(DataFieldProfile::not_found(window, None));
            }
        }
    }

    let mut keyword = None;
    if !keywords.is_empty() {
        let Some(found) = keywords.find_earliest(&chars, window.start) else {
            log::trace!("no keyword anchor present");
            return Ok(DataFieldProfile::not_found(window, None));
        };
        if window.last_good.map_or(true, |last| found.index >= last) {
            log::trace!("keyword {:?} at {} lies past the data range", found.delimiter, found.index);
            return Ok(DataFieldProfile::not_found(window, None));
        }
        window.start = found.end();
        keyword = Some(found);
    }

    let Some(last_good) = window.last_good else {
        return Ok(DataFieldProfile::not_found(window, keyword));
    };

    let mut i = window.start;
    let mut field_start: Option<usize> = None;
    let mut terminator: Option<String> = None;

    while i <= last_good {
        match field_start {
            None => {
                if let Some((_, skip)) = leading.match_at(&chars, i) {
                    i += skip;
                    continue;
                }
                field_start = Some(i);
            }
            Some(_) => {
                if let Some((literal, _)) = trailing.match_at(&chars, i) {
                    terminator = Some(literal.to_string());
                    break;
                }
            }
        }
        i += 1;
    }

    let Some(index) = field_start else {
        log::trace!("no field characters between {} and {}", window.start, last_good);
        return Ok(DataFieldProfile::not_found(window, keyword));
    };

    let (trailing_delimiter, trailing_kind) = match terminator {
        Some(literal) => (Some(literal), TrailingDelimiterKind::EndOfField),
        None => match window.cutoff.take() {
            Some((literal, kind)) => (Some(literal), kind),
            None => (None, TrailingDelimiterKind::EndOfString),
        },
    };

    let length = i - index;
    let next = index + length;
    let field = ExtractedField {
        text: chars[index..i].iter().collect(),
        index,
        length,
        trailing_delimiter,
        trailing_kind,
        next_index: (next <= last_good).then_some(next),
    };
    log::debug!("extracted field {:?} at {}", field.text, field.index);

    Ok(DataFieldProfile {
        target_len: window.target_len,
        start_index: window.requested_start,
        last_good_index: Some(last_good),
        keyword,
        field: Some(field),
        comment: window.comment,
        end_of_line: window.end_of_line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> DelimiterSet {
        DelimiterSet::from(items)
    }

    fn extract_ws(text: &str, start: usize) -> DataFieldProfile {
        extract_data_field(
            text,
            &DelimiterSet::empty(),
            start,
            &set(&[" "]),
            &set(&[" "]),
            &DelimiterSet::empty(),
            &DelimiterSet::empty(),
        )
        .unwrap()
    }

    #[test]
    fn test_keyword_anchored_field() {
        let text = " Zone:\tAmerica/Chicago\tLink:\tUS/Central\t\n";
        let profile = extract_data_field(
            text,
            &set(&["Zone:", "Link:"]),
            0,
            &set(&["\t", " "]),
            &set(&["\t", " "]),
            &DelimiterSet::empty(),
            &set(&["\n"]),
        )
        .unwrap();

        assert_eq!(profile.target_len, 41);
        assert_eq!(profile.last_good_index, Some(39));
        assert_eq!(
            profile.keyword,
            Some(DelimiterMatch {
                delimiter: "Zone:".into(),
                index: 1
            })
        );
        let field = profile.field.as_ref().unwrap();
        assert_eq!(field.text, "America/Chicago");
        assert_eq!(field.index, 7);
        assert_eq!(field.length, 15);
        assert_eq!(field.trailing_delimiter.as_deref(), Some("\t"));
        assert_eq!(field.trailing_kind, TrailingDelimiterKind::EndOfField);
        assert_eq!(field.next_index, Some(22));
        assert_eq!(profile.end_of_line.as_ref().map(|m| m.index), Some(40));
    }

    #[test]
    fn test_resume_after_first_field() {
        let first = extract_ws("abc   def", 0);
        assert_eq!(first.field_text(), "abc");
        assert_eq!(first.next_index(), Some(3));

        let second = extract_ws("abc   def", 3);
        assert_eq!(second.field_text(), "def");
        assert_eq!(second.trailing_kind(), TrailingDelimiterKind::EndOfString);
        assert_eq!(second.next_index(), None);
        assert_eq!(second.field.unwrap().trailing_delimiter, None);
    }

    #[test]
    fn test_only_separators_is_not_found() {
        let profile = extract_ws("    ", 1);
        assert!(!profile.is_found());
        assert_eq!(profile.field_text(), "");
        assert_eq!(profile.trailing_kind(), TrailingDelimiterKind::Unknown);
    }

    #[test]
    fn test_comment_cuts_field() {
        let profile = extract_data_field(
            "abc#def",
            &DelimiterSet::empty(),
            0,
            &set(&[" "]),
            &set(&[" "]),
            &set(&["#"]),
            &DelimiterSet::empty(),
        )
        .unwrap();
        let field = profile.field.as_ref().unwrap();
        assert_eq!(field.text, "abc");
        assert_eq!(field.trailing_kind, TrailingDelimiterKind::Comment);
        assert_eq!(field.trailing_delimiter.as_deref(), Some("#"));
        assert_eq!(field.next_index, None);
        assert_eq!(profile.last_good_index, Some(2));
    }

    #[test]
    fn test_comment_past_end_of_line_is_ignored() {
        let profile = extract_data_field(
            "ab\n#c",
            &DelimiterSet::empty(),
            0,
            &set(&[" "]),
            &set(&[" "]),
            &set(&["#"]),
            &set(&["\n"]),
        )
        .unwrap();
        assert_eq!(profile.comment, None);
        assert_eq!(profile.field_text(), "ab");
        assert_eq!(profile.trailing_kind(), TrailingDelimiterKind::EndOfLine);
    }

    #[test]
    fn test_end_of_line_at_start_is_not_found() {
        let profile = extract_data_field(
            "\nabc",
            &DelimiterSet::empty(),
            0,
            &set(&[" "]),
            &set(&[" "]),
            &DelimiterSet::empty(),
            &set(&["\n"]),
        )
        .unwrap();
        assert!(!profile.is_found());
        assert_eq!(profile.last_good_index, None);
        assert_eq!(profile.end_of_line.unwrap().index, 0);
    }

    #[test]
    fn test_missing_keyword_is_not_found() {
        let profile = extract_data_field(
            "Zone: x",
            &set(&["Link:"]),
            0,
            &set(&[" "]),
            &set(&[" "]),
            &DelimiterSet::empty(),
            &DelimiterSet::empty(),
        )
        .unwrap();
        assert!(!profile.is_found());
        assert_eq!(profile.keyword, None);
    }

    #[test]
    fn test_keyword_inside_comment_is_not_found() {
        let profile = extract_data_field(
            "x # Zone: y",
            &set(&["Zone:"]),
            0,
            &set(&[" "]),
            &set(&[" "]),
            &set(&["#"]),
            &DelimiterSet::empty(),
        )
        .unwrap();
        assert!(!profile.is_found());
        assert_eq!(profile.comment.unwrap().index, 2);
    }

    #[test]
    fn test_multi_char_separators() {
        let leading = set(&["::"]);
        let trailing = set(&["::"]);
        let none = DelimiterSet::empty();
        let first =
            extract_data_field("::ab::cd", &none, 0, &leading, &trailing, &none, &none).unwrap();
        assert_eq!(first.field_text(), "ab");
        assert_eq!(first.field.as_ref().unwrap().index, 2);
        assert_eq!(first.next_index(), Some(4));

        let second =
            extract_data_field("::ab::cd", &none, 4, &leading, &trailing, &none, &none).unwrap();
        assert_eq!(second.field_text(), "cd");
        assert_eq!(second.next_index(), None);
    }

    #[test]
    fn test_code_point_indices() {
        let profile = extract_ws("ñandú café", 0);
        assert_eq!(profile.field_text(), "ñandú");
        assert_eq!(profile.next_index(), Some(5));
        let profile = extract_ws("ñandú café", 5);
        let field = profile.field.unwrap();
        assert_eq!(field.text, "café");
        assert_eq!(field.index, 6);
        assert_eq!(field.length, 4);
    }

    #[test]
    fn test_invalid_arguments() {
        let sp = set(&[" "]);
        let none = DelimiterSet::empty();
        let empty_only = set(&[""]);

        assert_eq!(
            extract_data_field("", &none, 0, &sp, &sp, &none, &none),
            Err(SegmentError::EmptyText)
        );
        assert_eq!(
            extract_data_field("abc", &none, 3, &sp, &sp, &none, &none),
            Err(SegmentError::StartIndexOutOfRange { start: 3, len: 3 })
        );
        assert_eq!(
            extract_data_field("abc", &none, 0, &none, &sp, &none, &none),
            Err(SegmentError::MissingDelimiters {
                role: DelimiterRole::LeadingSeparator
            })
        );
        assert_eq!(
            extract_data_field("abc", &none, 0, &sp, &empty_only, &none, &none),
            Err(SegmentError::AllEmptyDelimiters {
                role: DelimiterRole::TrailingSeparator
            })
        );
        assert_eq!(
            extract_data_field("abc", &empty_only, 0, &sp, &sp, &none, &none),
            Err(SegmentError::AllEmptyDelimiters {
                role: DelimiterRole::Keyword
            })
        );
        assert_eq!(
            extract_data_field("abc", &none, 0, &sp, &sp, &empty_only, &none),
            Err(SegmentError::AllEmptyDelimiters {
                role: DelimiterRole::Comment
            })
        );
        assert_eq!(
            extract_data_field("abc", &none, 0, &sp, &sp, &none, &empty_only),
            Err(SegmentError::AllEmptyDelimiters {
                role: DelimiterRole::EndOfLine
            })
        );
    }

    #[test]
    fn test_empty_entries_never_match() {
        let profile = extract_data_field(
            "  abc",
            &DelimiterSet::empty(),
            0,
            &set(&["", " "]),
            &set(&[" ", ""]),
            &DelimiterSet::empty(),
            &DelimiterSet::empty(),
        )
        .unwrap();
        assert_eq!(profile.field_text(), "abc");
    }
}
