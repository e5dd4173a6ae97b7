//! Parsing textual checker reports into structured diagnostics.

use crate::code::TsCode;
use crate::diagnostic::Diagnostic;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

/// Matches one report line: `path(line,col): error TSxxxx: message`.
static REPORT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<file>.+?)\((?P<line>\d+),(?P<col>\d+)\): error (?P<code>TS\d+): (?P<message>.+)$")
        .unwrap()
});

/// Parses a full checker report into diagnostics.
///
/// Lines that do not match the report format (summary lines, wrapped message
/// continuations, blank lines) are dropped silently; the engine only ever
/// sees well-formed records.
pub fn parse_report(output: &str) -> Vec<Diagnostic> {
    output.lines().filter_map(parse_line).collect()
}

/// Parses a single report line, or returns `None` if it is not a diagnostic.
fn parse_line(line: &str) -> Option<Diagnostic> {
    let caps = REPORT_LINE.captures(line.trim_end())?;
    let code: TsCode = caps["code"].parse().ok()?;
    Some(Diagnostic {
        file: PathBuf::from(&caps["file"]),
        line: caps["line"].parse().ok()?,
        column: caps["col"].parse().ok()?,
        code,
        message: caps["message"].to_string(),
    })
}

/// Groups diagnostics by file, preserving report order within each file.
///
/// Files appear in first-seen order so processing output is stable with
/// respect to the checker report.
pub fn group_by_file(diagnostics: Vec<Diagnostic>) -> Vec<(PathBuf, Vec<Diagnostic>)> {
    let mut groups: Vec<(PathBuf, Vec<Diagnostic>)> = Vec::new();
    for diag in diagnostics {
        match groups.iter_mut().find(|(file, _)| *file == diag.file) {
            Some((_, list)) => list.push(diag),
            None => groups.push((diag.file.clone(), vec![diag])),
        }
    }
    groups
}
