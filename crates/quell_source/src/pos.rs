//! Line/column positions and inclusive spans within a document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-indexed line/column position within a document.
///
/// Positions compare lexicographically: line first, then column within the
/// same line. This is the ordering the resolver and the placement policy
/// rely on for containment checks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct LineCol {
    /// The line number (1-indexed).
    pub line: u32,
    /// The column number (1-indexed).
    pub col: u32,
}

impl LineCol {
    /// Creates a new position.
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// An inclusive line/column range within a document.
///
/// Both `start` and `end` are inclusive, matching the location convention of
/// the markup tree. A span always satisfies `start <= end`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The first position covered by the span (inclusive).
    pub start: LineCol,
    /// The last position covered by the span (inclusive).
    pub end: LineCol,
}

impl Span {
    /// Creates a new span from inclusive start and end positions.
    pub fn new(start: LineCol, end: LineCol) -> Self {
        Self { start, end }
    }

    /// Creates a span from raw line/column quadruples.
    pub fn from_parts(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start: LineCol::new(start_line, start_col),
            end: LineCol::new(end_line, end_col),
        }
    }

    /// Returns `true` if `pos` lies within this span (inclusive on both ends).
    pub fn contains(&self, pos: LineCol) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Returns `true` if `line` is strictly between the start and end lines.
    pub fn line_strictly_inside(&self, line: u32) -> bool {
        line > self.start.line && line < self.end.line
    }

    /// Returns `true` if `line` equals the start or end line of this span.
    pub fn on_boundary_line(&self, line: u32) -> bool {
        line == self.start.line || line == self.end.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicographic_ordering() {
        assert!(LineCol::new(1, 99) < LineCol::new(2, 1));
        assert!(LineCol::new(3, 4) < LineCol::new(3, 5));
        assert_eq!(LineCol::new(2, 2), LineCol::new(2, 2));
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", LineCol::new(5, 10)), "5:10");
    }

    #[test]
    fn contains_inclusive_ends() {
        let span = Span::from_parts(2, 3, 4, 7);
        assert!(span.contains(LineCol::new(2, 3)));
        assert!(span.contains(LineCol::new(4, 7)));
        assert!(span.contains(LineCol::new(3, 1)));
        assert!(!span.contains(LineCol::new(2, 2)));
        assert!(!span.contains(LineCol::new(4, 8)));
        assert!(!span.contains(LineCol::new(5, 1)));
    }

    #[test]
    fn single_line_span() {
        let span = Span::from_parts(3, 5, 3, 9);
        assert!(span.contains(LineCol::new(3, 5)));
        assert!(span.contains(LineCol::new(3, 9)));
        assert!(!span.contains(LineCol::new(3, 4)));
        assert!(!span.contains(LineCol::new(3, 10)));
    }

    #[test]
    fn line_classification() {
        let span = Span::from_parts(2, 1, 5, 4);
        assert!(span.line_strictly_inside(3));
        assert!(span.line_strictly_inside(4));
        assert!(!span.line_strictly_inside(2));
        assert!(!span.line_strictly_inside(5));
        assert!(span.on_boundary_line(2));
        assert!(span.on_boundary_line(5));
        assert!(!span.on_boundary_line(3));
    }

    #[test]
    fn serde_roundtrip() {
        let span = Span::from_parts(1, 2, 3, 4);
        let json = serde_json::to_string(&span).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(span, back);
    }
}
