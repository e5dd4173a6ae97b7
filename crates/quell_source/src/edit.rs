//! The unit of mutation applied to a line buffer.

/// A single mutation of a document.
///
/// Edits are derived by the placement policy and consumed by the
/// [`LineBuffer`](crate::LineBuffer); they are never persisted. All line and
/// column coordinates are 1-indexed and refer to the buffer state at the time
/// the edit is applied, which is why edits must be applied in descending
/// line order (and descending column order within a line).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Edit {
    /// Insert a new line immediately above `line`.
    InsertLineBefore {
        /// The 1-indexed line the new line is inserted above.
        line: u32,
        /// The full text of the new line.
        text: String,
    },
    /// Delete `line` entirely.
    DeleteLine {
        /// The 1-indexed line to remove.
        line: u32,
    },
    /// Insert `text` inside `line` at `col`, without changing the line count.
    SpliceInline {
        /// The 1-indexed line to splice into.
        line: u32,
        /// The 1-indexed column (character offset) the text is inserted at.
        col: u32,
        /// The text to insert.
        text: String,
    },
    /// Replace the entire content of `line` with `text`.
    ReplaceLine {
        /// The 1-indexed line to replace.
        line: u32,
        /// The new content of the line.
        text: String,
    },
}

impl Edit {
    /// Returns the 1-indexed line this edit targets.
    pub fn target_line(&self) -> u32 {
        match self {
            Edit::InsertLineBefore { line, .. }
            | Edit::DeleteLine { line }
            | Edit::SpliceInline { line, .. }
            | Edit::ReplaceLine { line, .. } => *line,
        }
    }
}
