//! Grouping diagnostics into the offset-safe processing order.

use quell_diagnostics::Diagnostic;
use std::collections::BTreeMap;

/// Groups diagnostics by line in descending line order; within each line,
/// diagnostics are ordered by descending column.
///
/// Processing bottom-to-top and right-to-left means an edit already applied
/// can only have shifted positions *after* the current one, so no
/// coordinate needs recomputing between edits. The sort is stable: report
/// order is preserved among diagnostics at the same position.
pub fn group_by_line<'a>(diagnostics: &'a [Diagnostic]) -> Vec<(u32, Vec<&'a Diagnostic>)> {
    let mut by_line: BTreeMap<u32, Vec<&Diagnostic>> = BTreeMap::new();
    for diag in diagnostics {
        by_line.entry(diag.line).or_default().push(diag);
    }
    by_line
        .into_iter()
        .rev()
        .map(|(line, mut diags)| {
            diags.sort_by(|a, b| b.column.cmp(&a.column));
            (line, diags)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quell_diagnostics::TsCode;

    fn diag(line: u32, column: u32) -> Diagnostic {
        Diagnostic::new("a.ts", line, column, TsCode::new(2322), "msg")
    }

    #[test]
    fn lines_descending() {
        let diags = vec![diag(3, 1), diag(10, 1), diag(7, 1)];
        let groups = group_by_line(&diags);
        let lines: Vec<u32> = groups.iter().map(|(l, _)| *l).collect();
        assert_eq!(lines, vec![10, 7, 3]);
    }

    #[test]
    fn columns_descending_within_line() {
        let diags = vec![diag(5, 2), diag(5, 9), diag(5, 4)];
        let groups = group_by_line(&diags);
        assert_eq!(groups.len(), 1);
        let cols: Vec<u32> = groups[0].1.iter().map(|d| d.column).collect();
        assert_eq!(cols, vec![9, 4, 2]);
    }

    #[test]
    fn smallest_column_is_last() {
        let diags = vec![diag(5, 8), diag(5, 3)];
        let groups = group_by_line(&diags);
        // The smallest-column diagnostic comes last; it supplies the code
        // when several diagnostics collapse to one insertion.
        assert_eq!(groups[0].1.last().map(|d| d.column), Some(3));
    }

    #[test]
    fn empty_input() {
        assert!(group_by_line(&[]).is_empty());
    }

    #[test]
    fn stable_for_equal_positions() {
        let mut a = diag(2, 2);
        a.message = "first".to_string();
        let mut b = diag(2, 2);
        b.message = "second".to_string();
        let diags = vec![a, b];
        let groups = group_by_line(&diags);
        assert_eq!(groups[0].1[0].message, "first");
        assert_eq!(groups[0].1[1].message, "second");
    }
}
