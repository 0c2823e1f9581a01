//! Source spans and the compact position encoding.
//!
//! Identifier coordinates have to cross a markup boundary: the HTML writer
//! embeds them in `data-source` / `data-origin` attributes and the resolver
//! later reads them back out of rendered output. The encoding is
//! `"lineStart:columnStart-lineEnd:columnEnd"`, e.g. `"12:3-12:7"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A source span: file plus start/end line and column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    #[serde(default)]
    pub file: String,
    pub line_start: u32,
    pub column_start: u32,
    pub line_end: u32,
    pub column_end: u32,
}

impl Span {
    /// Encode the four coordinates as a position id (`"L:C-L:C"`).
    pub fn pos_id(&self) -> String {
        format!(
            "{}:{}-{}:{}",
            self.line_start, self.column_start, self.line_end, self.column_end
        )
    }
}

/// The four coordinates of a decoded position id, without file identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coords {
    pub line_start: u32,
    pub column_start: u32,
    pub line_end: u32,
    pub column_end: u32,
}

impl Coords {
    /// Decode a position id back into its four coordinates.
    pub fn decode(pos: &str) -> Result<Coords, PosIdError> {
        let malformed = || PosIdError::Malformed(pos.to_string());

        let (from, to) = pos.split_once('-').ok_or_else(malformed)?;
        let (line_start, column_start) = from.split_once(':').ok_or_else(malformed)?;
        let (line_end, column_end) = to.split_once(':').ok_or_else(malformed)?;

        Ok(Coords {
            line_start: line_start.parse().map_err(|_| malformed())?,
            column_start: column_start.parse().map_err(|_| malformed())?,
            line_end: line_end.parse().map_err(|_| malformed())?,
            column_end: column_end.parse().map_err(|_| malformed())?,
        })
    }

    /// Whether all four coordinates match the given span. File identity is
    /// deliberately not part of the comparison.
    pub fn matches(&self, span: &Span) -> bool {
        self.line_start == span.line_start
            && self.column_start == span.column_start
            && self.line_end == span.line_end
            && self.column_end == span.column_end
    }

    pub fn encode(&self) -> String {
        format!(
            "{}:{}-{}:{}",
            self.line_start, self.column_start, self.line_end, self.column_end
        )
    }
}

/// Errors that can occur when decoding a position id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosIdError {
    /// The input does not have the `"L:C-L:C"` shape
    Malformed(String),
}

impl fmt::Display for PosIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PosIdError::Malformed(pos) => write!(f, "Invalid position id: '{}'", pos),
        }
    }
}

impl std::error::Error for PosIdError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn span(line_start: u32, column_start: u32, line_end: u32, column_end: u32) -> Span {
        Span {
            file: "libraries/common/list.effekt".to_string(),
            line_start,
            column_start,
            line_end,
            column_end,
        }
    }

    #[test]
    fn test_pos_id_encoding() {
        assert_eq!(span(12, 3, 12, 7).pos_id(), "12:3-12:7");
    }

    #[test]
    fn test_decode_roundtrip() {
        let s = span(4, 11, 6, 2);
        let coords = Coords::decode(&s.pos_id()).unwrap();
        assert!(coords.matches(&s));
        assert_eq!(coords.encode(), s.pos_id());
    }

    #[rstest]
    #[case("")]
    #[case("12:3")]
    #[case("12:3-12")]
    #[case("a:b-c:d")]
    #[case("12-3:12-7")]
    fn test_decode_malformed(#[case] input: &str) {
        assert_eq!(
            Coords::decode(input),
            Err(PosIdError::Malformed(input.to_string())),
            "expected '{}' to be rejected",
            input
        );
    }

    #[test]
    fn test_matches_requires_all_four_coordinates() {
        let coords = Coords::decode("12:3-12:7").unwrap();
        assert!(coords.matches(&span(12, 3, 12, 7)));

        // perturbing any single coordinate falsifies equality
        assert!(!coords.matches(&span(13, 3, 12, 7)));
        assert!(!coords.matches(&span(12, 4, 12, 7)));
        assert!(!coords.matches(&span(12, 3, 13, 7)));
        assert!(!coords.matches(&span(12, 3, 12, 8)));
    }

    #[test]
    fn test_matches_ignores_file() {
        let coords = Coords::decode("1:0-1:4").unwrap();
        let mut other = span(1, 0, 1, 4);
        other.file = "somewhere/else.effekt".to_string();
        assert!(coords.matches(&other));
    }
}
