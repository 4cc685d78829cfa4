//! Why a data field scan stopped.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TrailingDelimiterKind {
    #[default]
    Unknown,
    /// A trailing field separator followed the field.
    EndOfField,
    /// A comment delimiter cut the line short.
    Comment,
    /// An end-of-line delimiter cut the line short.
    EndOfLine,
    /// The field ran to the last character of the text.
    EndOfString,
}

impl TrailingDelimiterKind {
    pub const ALL: [TrailingDelimiterKind; 5] = [
        TrailingDelimiterKind::Unknown,
        TrailingDelimiterKind::EndOfField,
        TrailingDelimiterKind::Comment,
        TrailingDelimiterKind::EndOfLine,
        TrailingDelimiterKind::EndOfString,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TrailingDelimiterKind::Unknown => "Unknown",
            TrailingDelimiterKind::EndOfField => "EndOfField",
            TrailingDelimiterKind::Comment => "Comment",
            TrailingDelimiterKind::EndOfLine => "EndOfLine",
            TrailingDelimiterKind::EndOfString => "EndOfString",
        }
    }

    /// Stable integer code, `Unknown` is zero.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }
}

impl fmt::Display for TrailingDelimiterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trailing delimiter kind: {0:?}")]
pub struct ParseTrailingKindError(pub String);

/// Parses a kind name, ignoring case. A trailing `()` is accepted, so `"EndOfLine()"`
/// parses the same as `"endofline"`.
impl FromStr for TrailingDelimiterKind {
    type Err = ParseTrailingKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_suffix("()").unwrap_or(s);
        if name.chars().count() < 3 {
            return Err(ParseTrailingKindError(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseTrailingKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(TrailingDelimiterKind::default(), TrailingDelimiterKind::Unknown);
        assert_eq!(TrailingDelimiterKind::Unknown.code(), 0);
    }

    #[test]
    fn test_codes_round_trip() {
        for kind in TrailingDelimiterKind::ALL {
            assert_eq!(TrailingDelimiterKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(TrailingDelimiterKind::from_code(5), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "endofline".parse::<TrailingDelimiterKind>(),
            Ok(TrailingDelimiterKind::EndOfLine)
        );
        assert_eq!(
            "Comment()".parse::<TrailingDelimiterKind>(),
            Ok(TrailingDelimiterKind::Comment)
        );
    }

    #[test]
    fn test_parse_rejects_short_and_unknown_names() {
        assert!("()".parse::<TrailingDelimiterKind>().is_err());
        assert!("EO".parse::<TrailingDelimiterKind>().is_err());
        assert!("EndOfFile".parse::<TrailingDelimiterKind>().is_err());
    }
}
