//! Placement policy: deciding the edit for one diagnostic.
//!
//! Each function inspects the current buffer state and either produces the
//! [`Edit`] to apply or `None` when the diagnostic is already satisfied
//! (an equivalent marker is present) or cannot be placed. The policy never
//! mutates the buffer itself.

use crate::markers;
use quell_diagnostics::TsCode;
use quell_source::{Edit, LineBuffer};

/// Decides the edit that removes an unnecessary code-region marker: the
/// diagnostic's own line is deleted (it is the previously inserted marker
/// line).
pub fn remove_code_marker(line: u32) -> Edit {
    Edit::DeleteLine { line }
}

/// Decides the edit that inserts a code-region marker above `line`,
/// reusing that line's indentation.
///
/// Returns `None` when the target line (or the line above it) is already a
/// marker line, so re-running the engine over the same diagnostics adds
/// nothing.
pub fn insert_code_marker(buffer: &LineBuffer, line: u32, code: TsCode) -> Option<Edit> {
    if !insertable(buffer, line) || already_marked(buffer, line, markers::is_code_marker_line) {
        return None;
    }
    let indent = buffer.indent_of(line);
    Some(Edit::InsertLineBefore {
        line,
        text: markers::code_marker_line(&indent, code),
    })
}

/// Decides the edit that inserts a JSX-region marker line above `line`.
pub fn insert_jsx_marker(buffer: &LineBuffer, line: u32, code: TsCode) -> Option<Edit> {
    if !insertable(buffer, line) || already_marked(buffer, line, markers::is_jsx_marker_line) {
        return None;
    }
    let indent = buffer.indent_of(line);
    Some(Edit::InsertLineBefore {
        line,
        text: markers::jsx_marker_line(&indent, code),
    })
}

/// Decides the edit that splices an inline markup marker into `line` at
/// `col` (the resolved node's start).
///
/// Returns `None` when a marker already touches that column, so several
/// diagnostics resolving to one spot produce a single insertion.
pub fn insert_markup_marker(
    buffer: &LineBuffer,
    line: u32,
    col: u32,
    code: TsCode,
) -> Option<Edit> {
    let content = buffer.line(line)?;
    if markers::has_markup_marker_near(content, col) {
        return None;
    }
    Some(Edit::SpliceInline {
        line,
        col,
        text: markers::markup_marker(code),
    })
}

/// Decides the edit that strips markup markers from `line`: the line is
/// replaced with its stripped content, or deleted entirely if nothing but
/// whitespace remains. Returns the edit and the number of markers
/// stripped, or `None` if the line carries no marker.
pub fn remove_markup_markers(buffer: &LineBuffer, line: u32) -> Option<(Edit, usize)> {
    let content = buffer.line(line)?;
    let (stripped, count) = markers::strip_markup_markers(content);
    if count == 0 {
        return None;
    }
    let edit = if stripped.trim().is_empty() {
        Edit::DeleteLine { line }
    } else {
        Edit::ReplaceLine {
            line,
            text: stripped,
        }
    };
    Some((edit, count))
}

/// A line can take an insertion when it exists, or is at most one past the
/// last line. Anything further would be dropped by the buffer, so the
/// counters must not claim it.
fn insertable(buffer: &LineBuffer, line: u32) -> bool {
    line >= 1 && line as usize <= buffer.line_count() + 1
}

fn already_marked(buffer: &LineBuffer, line: u32, is_marker: fn(&str) -> bool) -> bool {
    let on_target = buffer.line(line).is_some_and(is_marker);
    let above = line > 1 && buffer.line(line - 1).is_some_and(is_marker);
    on_target || above
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_insert_reuses_indent() {
        let buffer = LineBuffer::from_content("fn main() {\n    let x: i32 = \"s\";\n}");
        let edit = insert_code_marker(&buffer, 2, TsCode::new(2322)).unwrap();
        assert_eq!(
            edit,
            Edit::InsertLineBefore {
                line: 2,
                text: "    // @ts-expect-error TS2322".to_string()
            }
        );
    }

    #[test]
    fn code_insert_skipped_when_already_marked() {
        let buffer =
            LineBuffer::from_content("  // @ts-expect-error TS2322\n  let x: i32 = \"s\";");
        // Marker above the target line.
        assert!(insert_code_marker(&buffer, 2, TsCode::new(2322)).is_none());
        // The target line is itself the marker (re-run with a stale line).
        assert!(insert_code_marker(&buffer, 1, TsCode::new(2322)).is_none());
    }

    #[test]
    fn insert_far_past_eof_is_refused() {
        let buffer = LineBuffer::from_content("const a = 1;");
        // One past the last line is fine; beyond that the buffer would
        // drop the edit.
        assert!(insert_code_marker(&buffer, 2, TsCode::new(2322)).is_some());
        assert!(insert_code_marker(&buffer, 3, TsCode::new(2322)).is_none());
        assert!(insert_jsx_marker(&buffer, 9, TsCode::new(2339)).is_none());
    }

    #[test]
    fn markup_insert_at_column() {
        let buffer = LineBuffer::from_content("<div>{{ x }}</div>");
        let edit = insert_markup_marker(&buffer, 1, 6, TsCode::new(2304)).unwrap();
        assert_eq!(
            edit,
            Edit::SpliceInline {
                line: 1,
                col: 6,
                text: "<!-- @vue-expect-error TS2304 -->".to_string()
            }
        );
    }

    #[test]
    fn markup_insert_skipped_when_marker_touches_column() {
        let buffer = LineBuffer::from_content("<div><!-- @vue-expect-error TS2304 -->{{ x }}</div>");
        // The existing marker ends exactly where col 39 starts.
        assert!(insert_markup_marker(&buffer, 1, 39, TsCode::new(2304)).is_none());
        // A marker starting at the column also satisfies it.
        assert!(insert_markup_marker(&buffer, 1, 6, TsCode::new(2304)).is_none());
    }

    #[test]
    fn markup_removal_strips_or_deletes() {
        let buffer = LineBuffer::from_content("<p><!-- @vue-expect-error TS2339 -->{{ x }}</p>");
        let (edit, count) = remove_markup_markers(&buffer, 1).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            edit,
            Edit::ReplaceLine {
                line: 1,
                text: "<p>{{ x }}</p>".to_string()
            }
        );

        let blank_after = LineBuffer::from_content("  <!-- @vue-expect-error TS2339 -->");
        let (edit, _) = remove_markup_markers(&blank_after, 1).unwrap();
        assert_eq!(edit, Edit::DeleteLine { line: 1 });
    }

    #[test]
    fn markup_removal_none_without_marker() {
        let buffer = LineBuffer::from_content("<p>clean</p>");
        assert!(remove_markup_markers(&buffer, 1).is_none());
    }

    #[test]
    fn jsx_insert_uses_block_form() {
        let buffer = LineBuffer::from_content("      <p>{bad}</p>");
        let edit = insert_jsx_marker(&buffer, 1, TsCode::new(2339)).unwrap();
        assert_eq!(
            edit,
            Edit::InsertLineBefore {
                line: 1,
                text: "      {/* @ts-expect-error TS2339 */}".to_string()
            }
        );
    }
}
