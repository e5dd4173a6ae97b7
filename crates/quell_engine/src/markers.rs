//! Marker comment syntax: formatting, recognition, and stripping.
//!
//! The three marker forms, per region kind:
//!
//! - code region: `// @ts-expect-error TSxxxx` on its own line
//! - markup region: `<!-- @vue-expect-error TSxxxx -->` spliced inline
//! - JSX region: `{/* @ts-expect-error TSxxxx */}` on its own line
//!
//! Recognition tolerates a missing code token so markers inserted by hand
//! are removed the same way.

use once_cell::sync::Lazy;
use quell_diagnostics::TsCode;
use regex::Regex;

/// The code-region marker directive.
pub const CODE_MARKER: &str = "@ts-expect-error";
/// The markup-region marker directive.
pub const MARKUP_MARKER: &str = "@vue-expect-error";

static MARKUP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--\s*@vue-expect-error(?:\s+TS\d+)?\s*-->").unwrap());

static JSX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{/\*\s*@ts-expect-error(?:\s+TS\d+)?\s*\*/\}").unwrap());

/// Formats a code-region marker line with the given indentation.
pub fn code_marker_line(indent: &str, code: TsCode) -> String {
    format!("{indent}// {CODE_MARKER} {code}")
}

/// Formats a JSX-region marker line with the given indentation.
pub fn jsx_marker_line(indent: &str, code: TsCode) -> String {
    format!("{indent}{{/* {CODE_MARKER} {code} */}}")
}

/// Formats an inline markup marker.
pub fn markup_marker(code: TsCode) -> String {
    format!("<!-- {MARKUP_MARKER} {code} -->")
}

/// Returns `true` if `line` is (only) a code-region marker line.
pub fn is_code_marker_line(line: &str) -> bool {
    line.trim_start().starts_with(&format!("// {CODE_MARKER}"))
}

/// Returns `true` if `line` contains a JSX-region marker.
pub fn has_jsx_marker(line: &str) -> bool {
    JSX_PATTERN.is_match(line)
}

/// Returns `true` if `line` is (only) a JSX-region marker line.
pub fn is_jsx_marker_line(line: &str) -> bool {
    let stripped = JSX_PATTERN.replace_all(line, "");
    stripped.trim().is_empty() && has_jsx_marker(line)
}

/// Strips all markup markers from `line`, returning the stripped line and
/// the number of markers removed.
pub fn strip_markup_markers(line: &str) -> (String, usize) {
    let count = MARKUP_PATTERN.find_iter(line).count();
    (MARKUP_PATTERN.replace_all(line, "").into_owned(), count)
}

/// Strips all JSX markers from `line`, returning the stripped line and the
/// number of markers removed.
pub fn strip_jsx_markers(line: &str) -> (String, usize) {
    let count = JSX_PATTERN.find_iter(line).count();
    (JSX_PATTERN.replace_all(line, "").into_owned(), count)
}

/// Returns `true` if `line` already carries a markup marker touching
/// character column `col` (1-indexed): one ending right where `col` starts
/// or one starting at `col`.
///
/// A substring scan rather than an exact match, so several diagnostics
/// collapsing to one spot are satisfied by a single insertion.
pub fn has_markup_marker_near(line: &str, col: u32) -> bool {
    MARKUP_PATTERN.find_iter(line).any(|m| {
        let start_col = byte_to_char_col(line, m.start());
        let end_col = byte_to_char_col(line, m.end());
        start_col == col || end_col == col
    })
}

/// Converts a byte offset in `s` to a 1-indexed character column.
fn byte_to_char_col(s: &str, byte_offset: usize) -> u32 {
    s[..byte_offset].chars().count() as u32 + 1
}
