//! The line buffer that applies edits in offset-safe order.

use crate::edit::Edit;

/// A document held as an ordered sequence of lines, supporting the three
/// splice operations of the suppression engine.
///
/// All operations take 1-indexed coordinates. The buffer itself does not
/// enforce the descending processing order; that invariant is owned by the
/// caller (the per-file processors), which derive it from the diagnostic
/// grouper. Out-of-range lines are ignored rather than panicking: a
/// diagnostic can legitimately point one past the last line of a file.
///
/// Splitting and joining use `\n` exclusively, preserving a trailing newline
/// as a final empty line.
#[derive(Clone, Debug)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Creates a buffer from full file content.
    pub fn from_content(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(String::from).collect(),
        }
    }

    /// Returns the number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the content of line `n` (1-indexed), or `None` if out of range.
    pub fn line(&self, n: u32) -> Option<&str> {
        if n == 0 {
            return None;
        }
        self.lines.get(n as usize - 1).map(String::as_str)
    }

    /// Returns the leading whitespace of line `n`, or an empty string if the
    /// line does not exist.
    pub fn indent_of(&self, n: u32) -> String {
        self.line(n)
            .map(|l| l.chars().take_while(|c| c.is_whitespace()).collect())
            .unwrap_or_default()
    }

    /// Removes line `n` entirely. Lines after `n` shift up by one.
    pub fn delete_line(&mut self, n: u32) {
        if n >= 1 && (n as usize) <= self.lines.len() {
            self.lines.remove(n as usize - 1);
        }
    }

    /// Inserts a new line immediately above line `n`. Lines from `n` on
    /// shift down by one; lines before `n` are unaffected.
    pub fn insert_line_before(&mut self, n: u32, text: impl Into<String>) {
        if n >= 1 && (n as usize) <= self.lines.len() + 1 {
            self.lines.insert(n as usize - 1, text.into());
        }
    }

    /// Inserts `text` inside line `n` at character column `col` (1-indexed),
    /// without changing the line count.
    ///
    /// A column past the end of the line appends at the end. Safe only when
    /// same-line splices are applied right-to-left.
    pub fn splice_inline(&mut self, n: u32, col: u32, text: &str) {
        if n == 0 {
            return;
        }
        let Some(line) = self.lines.get_mut(n as usize - 1) else {
            return;
        };
        let byte_idx = char_to_byte_index(line, col.saturating_sub(1) as usize);
        line.insert_str(byte_idx, text);
    }

    /// Replaces the entire content of line `n`.
    pub fn replace_line(&mut self, n: u32, text: impl Into<String>) {
        if n >= 1 && (n as usize) <= self.lines.len() {
            self.lines[n as usize - 1] = text.into();
        }
    }

    /// Applies a single [`Edit`] to the buffer.
    pub fn apply(&mut self, edit: &Edit) {
        match edit {
            Edit::InsertLineBefore { line, text } => self.insert_line_before(*line, text.clone()),
            Edit::DeleteLine { line } => self.delete_line(*line),
            Edit::SpliceInline { line, col, text } => self.splice_inline(*line, *col, text),
            Edit::ReplaceLine { line, text } => self.replace_line(*line, text.clone()),
        }
    }

    /// Rejoins the lines into full file content.
    pub fn join(&self) -> String {
        self.lines.join("\n")
    }
}

/// Converts a 0-based character offset into a byte index within `s`,
/// clamping to the end of the string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
