//! Length-Bounded Line Wrapping
//!
//!     Reflows a string into lines of at most `line_length` code points, each terminated
//!     by a caller-chosen break character.
//!
//!     The text is consumed window by window. A window starts at the first non-whitespace
//!     code point (whitespace never starts a line) and spans `line_length` code points, or
//!     less at the end of the input. Each window is classified by its last word:
//!
//!         - all whitespace: skipped, nothing is emitted.
//!         - a single word: emitted whole when the word ends with the window, otherwise
//!           the word is longer than a line and gets hyphenated.
//!         - mixed: emitted up to the last word that ends inside the window. A word cut
//!           by the window edge is pushed to the next line.
//!
//!     Runs of whitespace between lines collapse; whitespace inside a line is kept as is.
//!
//! Hyphenation
//!
//!     A word that cannot fit on a line by itself is written `line_length - 1` code points
//!     at a time followed by `-`, so a hyphenated line is exactly `line_length` long. The
//!     next line starts at the first code point not yet written.

use crate::textseg::error::{Result, SegmentError};

/// Shortest line length [`wrap_at_length`] accepts.
pub const MIN_LINE_LENGTH: usize = 5;

const HYPHEN: char = '-';

/// Shape of the code points in `[start, end]`, as seen from the end of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowShape {
    AllWhitespace,
    /// No whitespace anywhere in the window.
    SingleWord,
    /// The window holds whitespace and at least one word; `word_start..=word_end` is the
    /// last word in it.
    Mixed { word_start: usize, word_end: usize },
}

/// Classifies the inclusive window `[start, end]` of `chars`.
pub(crate) fn last_word_in_window(chars: &[char], start: usize, end: usize) -> WindowShape {
    let window = &chars[start..=end];

    let Some(last_offset) = window.iter().rposition(|c| !c.is_whitespace()) else {
        return WindowShape::AllWhitespace;
    };
    if !window.iter().any(|c| c.is_whitespace()) {
        return WindowShape::SingleWord;
    }

    let first_offset = window[..last_offset]
        .iter()
        .rposition(|c| c.is_whitespace())
        .map_or(0, |ws| ws + 1);

    WindowShape::Mixed {
        word_start: start + first_offset,
        word_end: start + last_offset,
    }
}

/// Wraps `text` into lines of at most `line_length` code points, appending `break_char`
/// after every line.
///
/// Text made only of whitespace produces a single `break_char`.
///
/// # Errors
///
/// [`SegmentError::EmptyText`] for an empty `text`, [`SegmentError::LineLengthTooShort`]
/// when `line_length` is below [`MIN_LINE_LENGTH`], and [`SegmentError::NullBreakChar`]
/// when `break_char` is `'\0'`.
pub fn wrap_at_length(text: &str, line_length: usize, break_char: char) -> Result<String> {
    if text.is_empty() {
        return Err(SegmentError::EmptyText);
    }
    if line_length < MIN_LINE_LENGTH {
        return Err(SegmentError::LineLengthTooShort {
            line_length,
            minimum: MIN_LINE_LENGTH,
        });
    }
    if break_char == '\0' {
        return Err(SegmentError::NullBreakChar);
    }

    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(text.len() + (len / line_length + 1) * 2);
    let mut pos = 0;

    loop {
        let Some(begin) = (pos..len).find(|&i| !chars[i].is_whitespace()) else {
            if out.is_empty() {
                out.push(break_char);
            }
            break;
        };
        pos = begin;

        if pos == len - 1 {
            out.push(chars[pos]);
            out.push(break_char);
            break;
        }

        let last = (pos + line_length - 1).min(len - 1);

        match last_word_in_window(&chars, pos, last) {
            WindowShape::AllWhitespace => {
                pos = last + 1;
                continue;
            }
            WindowShape::SingleWord => {
                if last + 1 >= len {
                    out.extend(&chars[pos..]);
                    out.push(break_char);
                    break;
                }
                if chars[last + 1].is_whitespace() {
                    out.extend(&chars[pos..=last]);
                    pos = last + 1;
                } else {
                    pos = hyphenate(&chars, pos, line_length, &mut out);
                }
            }
            WindowShape::Mixed {
                word_start,
                word_end,
            } => {
                if word_end + 1 >= len {
                    out.extend(&chars[pos..]);
                    out.push(break_char);
                    break;
                }
                if chars[word_end + 1].is_whitespace() {
                    out.extend(&chars[pos..=word_end]);
                    pos = word_end + 1;
                } else {
                    // The window edge cuts the last word; end the line at the word before it.
                    match (pos..word_start).rev().find(|&i| !chars[i].is_whitespace()) {
                        Some(previous_end) => {
                            out.extend(&chars[pos..=previous_end]);
                            pos = previous_end + 1;
                        }
                        None if word_start > pos => {
                            pos = word_start;
                            continue;
                        }
                        None => {
                            pos = hyphenate(&chars, pos, line_length, &mut out);
                        }
                    }
                }
            }
        }

        out.push(break_char);
    }

    Ok(out)
}

/// Writes the first `line_length - 1` code points at `pos` plus a hyphen, returning the
/// position of the first code point left unwritten.
fn hyphenate(chars: &[char], pos: usize, line_length: usize, out: &mut String) -> usize {
    let cut = (pos + line_length - 1).min(chars.len());
    log::trace!("hyphenating word at {} after {} code points", pos, cut - pos);
    out.extend(&chars[pos..cut]);
    out.push(HYPHEN);
    cut
}
