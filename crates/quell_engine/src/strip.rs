//! Wholesale marker removal, independent of any checker report.

use crate::file_kind::FileKind;
use crate::markers;
use crate::sections::region_kind_at;
use quell_markup::SfcDocument;
use quell_source::RegionKind;

/// Removes every suppression marker from `content` and returns the new
/// content with the number of markers removed.
///
/// Marker-only lines disappear entirely; a line that carried other content
/// next to an inline marker keeps that content.
pub fn strip_markers(content: &str, kind: FileKind) -> (String, usize) {
    match kind {
        FileKind::Code => strip_code(content),
        FileKind::Jsx => strip_jsx(content),
        FileKind::Composite => strip_composite(content),
    }
}

fn strip_code(content: &str) -> (String, usize) {
    let mut removed = 0;
    let lines: Vec<&str> = content
        .split('\n')
        .filter(|line| {
            if markers::is_code_marker_line(line) {
                removed += 1;
                false
            } else {
                true
            }
        })
        .collect();
    (lines.join("\n"), removed)
}

fn strip_jsx(content: &str) -> (String, usize) {
    let mut removed = 0;
    let mut lines = Vec::new();
    for line in content.split('\n') {
        if markers::is_code_marker_line(line) || markers::is_jsx_marker_line(line) {
            removed += 1;
            continue;
        }
        let (stripped, count) = markers::strip_jsx_markers(line);
        if count > 0 {
            removed += count;
            if stripped.trim().is_empty() {
                continue;
            }
            lines.push(stripped);
        } else {
            lines.push(line.to_string());
        }
    }
    (lines.join("\n"), removed)
}

fn strip_composite(content: &str) -> (String, usize) {
    let regions = SfcDocument::parse(content).regions();
    let mut removed = 0;
    let mut lines = Vec::new();
    for (idx, line) in content.split('\n').enumerate() {
        let number = idx as u32 + 1;
        match region_kind_at(&regions, number) {
            Some(RegionKind::Code) => {
                if markers::is_code_marker_line(line) {
                    removed += 1;
                } else {
                    lines.push(line.to_string());
                }
            }
            Some(RegionKind::Markup) => {
                let (stripped, count) = markers::strip_markup_markers(line);
                if count > 0 {
                    removed += count;
                    if stripped.trim().is_empty() {
                        continue;
                    }
                    lines.push(stripped);
                } else {
                    lines.push(line.to_string());
                }
            }
            None => lines.push(line.to_string()),
        }
    }
    (lines.join("\n"), removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_marker_lines_disappear() {
        let content = "\
// @ts-expect-error TS2322
const a: number = \"one\";
const b = 2;
  // @ts-expect-error TS2345
  call(b);";
        let (out, removed) = strip_markers(content, FileKind::Code);
        assert_eq!(out, "const a: number = \"one\";\nconst b = 2;\n  call(b);");
        assert_eq!(removed, 2);
    }

    #[test]
    fn plain_comments_survive() {
        let content = "// a real comment\nconst a = 1;";
        let (out, removed) = strip_markers(content, FileKind::Code);
        assert_eq!(out, content);
        assert_eq!(removed, 0);
    }

    #[test]
    fn jsx_brace_and_line_forms_both_stripped() {
        let content = "\
// @ts-expect-error TS2322
const view = (
  <div>
    {/* @ts-expect-error TS2304 */}
    <p>{bad}</p>
  </div>
);";
        let (out, removed) = strip_markers(content, FileKind::Jsx);
        assert_eq!(
            out,
            "const view = (\n  <div>\n    <p>{bad}</p>\n  </div>\n);"
        );
        assert_eq!(removed, 2);
    }

    #[test]
    fn composite_strips_per_region() {
        let content = "\
<template>
  <div>
    <p><!-- @vue-expect-error TS2551 -->{{ user.nam }}</p>
    <!-- @vue-expect-error TS2304 -->
    <span>{{ x }}</span>
  </div>
</template>

<script setup lang=\"ts\">
// @ts-expect-error TS2322
const n: number = \"s\";
</script>";
        let (out, removed) = strip_markers(content, FileKind::Composite);
        assert_eq!(
            out,
            "\
<template>
  <div>
    <p>{{ user.nam }}</p>
    <span>{{ x }}</span>
  </div>
</template>

<script setup lang=\"ts\">
const n: number = \"s\";
</script>"
        );
        assert_eq!(removed, 3);
    }

    #[test]
    fn composite_plain_html_comment_survives() {
        let content = "\
<template>
  <!-- layout wrapper -->
  <div />
</template>";
        let (out, removed) = strip_markers(content, FileKind::Composite);
        assert_eq!(out, content);
        assert_eq!(removed, 0);
    }

    #[test]
    fn idempotent_on_clean_input() {
        let content = "const a = 1;\nconst b = 2;";
        let (out, removed) = strip_markers(content, FileKind::Code);
        assert_eq!(out, content);
        assert_eq!(removed, 0);
    }
}
