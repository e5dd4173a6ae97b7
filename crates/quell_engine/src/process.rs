//! Per-file suppression: routing each diagnostic to a placement decision
//! and splicing the result.

use crate::file_kind::FileKind;
use crate::group::group_by_line;
use crate::markers;
use crate::policy;
use crate::sections::region_kind_at;
use crate::summary::ProcessSummary;
use quell_diagnostics::Diagnostic;
use quell_markup::{jsx, parse_template, resolve, BranchAttributePolicy, ResolveOptions};
use quell_markup::{Node, SfcDocument};
use quell_source::{LineBuffer, LineCol, Region, RegionKind};
use std::collections::HashSet;

/// Options threaded from configuration into the engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineOptions {
    /// Placement for attribute diagnostics on `else`/`else-if` elements.
    pub branch_attribute_policy: BranchAttributePolicy,
}

/// Annotates `content` with suppression markers for `diagnostics` and
/// removes markers the checker flagged as unnecessary.
///
/// Diagnostics are processed bottom-to-top, right-to-left within a line,
/// so every coordinate refers to the original content. Returns the new
/// content and the per-file counters; content equal to the input means no
/// edit was produced and the file need not be rewritten.
pub fn suppress(
    content: &str,
    kind: FileKind,
    diagnostics: &[Diagnostic],
    options: &EngineOptions,
) -> (String, ProcessSummary) {
    let mut buffer = LineBuffer::from_content(content);
    let mut summary = ProcessSummary::default();

    match kind {
        FileKind::Code => {
            process_code(&mut buffer, diagnostics, &mut summary, MarkerForm::Line);
        }
        FileKind::Jsx => {
            let jsx_regions = jsx::jsx_line_ranges(content);
            process_jsx(&mut buffer, diagnostics, &jsx_regions, &mut summary);
        }
        FileKind::Composite => {
            process_composite(&mut buffer, content, diagnostics, options, &mut summary);
        }
    }

    (buffer.join(), summary)
}

/// Which marker an insertion in a code region takes.
#[derive(Clone, Copy, PartialEq, Eq)]
enum MarkerForm {
    /// `// @ts-expect-error TSxxxx` on its own line.
    Line,
    /// `{/* @ts-expect-error TSxxxx */}` on its own line.
    JsxBlock,
}

fn process_code(
    buffer: &mut LineBuffer,
    diagnostics: &[Diagnostic],
    summary: &mut ProcessSummary,
    form: MarkerForm,
) {
    for (line, group) in group_by_line(diagnostics) {
        apply_code_group(buffer, line, &group, summary, form);
    }
}

fn process_jsx(
    buffer: &mut LineBuffer,
    diagnostics: &[Diagnostic],
    jsx_regions: &[Region],
    summary: &mut ProcessSummary,
) {
    for (line, group) in group_by_line(diagnostics) {
        let form = if jsx_regions.iter().any(|r| r.contains_line(line)) {
            MarkerForm::JsxBlock
        } else {
            MarkerForm::Line
        };
        apply_code_group(buffer, line, &group, summary, form);
    }
}

/// Applies one line's worth of code-region diagnostics: at most one edit
/// per line, with the remaining diagnostics counted as skipped.
fn apply_code_group(
    buffer: &mut LineBuffer,
    line: u32,
    group: &[&Diagnostic],
    summary: &mut ProcessSummary,
    form: MarkerForm,
) {
    if group.iter().any(|d| d.code.is_unnecessary_suppression()) {
        // The diagnostic points at the marker line itself; anything else
        // on that line is stale and skipped.
        let is_marker = buffer
            .line(line)
            .is_some_and(|l| markers::is_code_marker_line(l) || markers::is_jsx_marker_line(l));
        if is_marker {
            buffer.apply(&policy::remove_code_marker(line));
            summary.removed += 1;
            summary.skipped += group.len() - 1;
        } else {
            summary.skipped += group.len();
        }
        return;
    }

    // The smallest-column diagnostic is last in the group and supplies the
    // marker code when several diagnostics collapse onto one line.
    let Some(primary) = group.last() else {
        return;
    };
    let edit = match form {
        MarkerForm::Line => policy::insert_code_marker(buffer, line, primary.code),
        MarkerForm::JsxBlock => policy::insert_jsx_marker(buffer, line, primary.code),
    };
    match edit {
        Some(edit) => {
            buffer.apply(&edit);
            summary.inserted += 1;
            summary.skipped += group.len() - 1;
        }
        None => summary.skipped += group.len(),
    }
}

fn process_composite(
    buffer: &mut LineBuffer,
    content: &str,
    diagnostics: &[Diagnostic],
    options: &EngineOptions,
    summary: &mut ProcessSummary,
) {
    let document = SfcDocument::parse(content);
    let regions = document.regions();
    let template_tree = document
        .template
        .as_ref()
        .map(|t| parse_template(&t.content));
    let resolve_options = ResolveOptions {
        branch_attribute_policy: options.branch_attribute_policy,
    };
    // Resolved positions already annotated in this run, keyed by absolute
    // (line, col); several diagnostics often collapse onto one node.
    let mut placed: HashSet<(u32, u32)> = HashSet::new();

    for (line, group) in group_by_line(diagnostics) {
        match region_kind_at(&regions, line) {
            Some(RegionKind::Code) => {
                apply_code_group(buffer, line, &group, summary, MarkerForm::Line);
            }
            Some(RegionKind::Markup) => {
                // An unnecessary-suppression diagnostic owns its whole
                // line: markers are stripped once and the line's other
                // diagnostics are stale, never placed alongside.
                if group.iter().any(|d| d.code.is_unnecessary_suppression()) {
                    match policy::remove_markup_markers(buffer, line) {
                        Some((edit, count)) => {
                            buffer.apply(&edit);
                            summary.removed += count;
                            summary.skipped += group.len() - 1;
                        }
                        None => summary.skipped += group.len(),
                    }
                    continue;
                }
                for diag in &group {
                    apply_markup_diagnostic(
                        buffer,
                        diag,
                        &document,
                        template_tree.as_ref(),
                        &resolve_options,
                        &mut placed,
                        summary,
                    );
                }
            }
            None => summary.skipped += group.len(),
        }
    }
}

fn apply_markup_diagnostic(
    buffer: &mut LineBuffer,
    diag: &Diagnostic,
    document: &SfcDocument,
    template_tree: Option<&Node>,
    resolve_options: &ResolveOptions,
    placed: &mut HashSet<(u32, u32)>,
    summary: &mut ProcessSummary,
) {
    let (Some(template), Some(tree)) = (document.template.as_ref(), template_tree) else {
        summary.skipped += 1;
        return;
    };
    let rel = LineCol::new(template.relative_line(diag.line), diag.column);
    let Some(node) = resolve(tree, rel, resolve_options) else {
        summary.skipped += 1;
        return;
    };
    let start = node.span().start;
    let target_line = template.absolute_line(start.line);
    let target_col = start.col;
    if !placed.insert((target_line, target_col)) {
        summary.skipped += 1;
        return;
    }
    match policy::insert_markup_marker(buffer, target_line, target_col, diag.code) {
        Some(edit) => {
            buffer.apply(&edit);
            summary.inserted += 1;
        }
        None => summary.skipped += 1,
    }
}
