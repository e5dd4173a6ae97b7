//! Single-file-component section splitting.
//!
//! Splits a composite document into its top-level `<template>` and
//! `<script>` / `<script setup>` blocks, yielding the [`Region`]s the
//! section router dispatches on and the template content the markup parser
//! consumes.

use quell_source::{Region, RegionKind};

/// A composite document split into its top-level blocks.
#[derive(Clone, Debug, Default)]
pub struct SfcDocument {
    /// The `<template>` block, if present.
    pub template: Option<TemplateBlock>,
    /// The `<script>` and `<script setup>` blocks, in source order.
    pub scripts: Vec<ScriptBlock>,
}

/// The `<template>` block of a composite document.
#[derive(Clone, Debug)]
pub struct TemplateBlock {
    /// The raw content between the open and close tags. Content begins
    /// immediately after the open tag, so its first line is the remainder
    /// of the open-tag line (usually empty).
    pub content: String,
    /// The line of the opening tag (1-indexed). Relative content line 1
    /// maps to this absolute line.
    pub start_line: u32,
    /// The line of the closing tag (1-indexed).
    pub end_line: u32,
}

impl TemplateBlock {
    /// Converts an absolute document line to a content-relative line.
    pub fn relative_line(&self, absolute_line: u32) -> u32 {
        absolute_line - self.start_line + 1
    }

    /// Converts a content-relative line back to an absolute document line.
    pub fn absolute_line(&self, relative_line: u32) -> u32 {
        self.start_line + relative_line - 1
    }
}

/// A `<script>` or `<script setup>` block.
#[derive(Clone, Debug)]
pub struct ScriptBlock {
    /// The line of the opening tag (1-indexed).
    pub start_line: u32,
    /// The line of the closing tag (1-indexed).
    pub end_line: u32,
    /// `true` for `<script setup>`.
    pub setup: bool,
}

impl SfcDocument {
    /// Splits a composite document into its blocks.
    ///
    /// Tolerant of missing blocks: a document with no `<template>` or no
    /// `<script>` simply yields fewer regions. An unclosed block extends to
    /// the end of the document.
    pub fn parse(source: &str) -> Self {
        let line_starts = compute_line_starts(source);
        let line_of = |byte: usize| -> u32 {
            match line_starts.binary_search(&byte) {
                Ok(idx) => idx as u32 + 1,
                Err(idx) => idx as u32,
            }
        };

        let mut doc = SfcDocument::default();
        let bytes = source.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() {
            let Some(offset) = source[pos..].find('<') else {
                break;
            };
            let tag_start = pos + offset;

            if let Some(open_len) = block_open_len(&source[tag_start..], "template") {
                let content_start = tag_start + open_len;
                let (content_end, close_start) =
                    find_block_end(source, content_start, "template");
                doc.template = Some(TemplateBlock {
                    content: source[content_start..content_end].to_string(),
                    start_line: line_of(tag_start),
                    end_line: line_of(close_start),
                });
                pos = close_start + "</template>".len().min(source.len() - close_start);
            } else if let Some(open_len) = block_open_len(&source[tag_start..], "script") {
                let open_tag = &source[tag_start..tag_start + open_len];
                let content_start = tag_start + open_len;
                let (_, close_start) = find_block_end(source, content_start, "script");
                doc.scripts.push(ScriptBlock {
                    start_line: line_of(tag_start),
                    end_line: line_of(close_start),
                    setup: open_tag.contains("setup"),
                });
                pos = close_start + "</script>".len().min(source.len() - close_start);
            } else {
                pos = tag_start + 1;
            }
        }

        doc
    }

    /// Returns the line regions of this document: one `Code` region per
    /// script block and at most one `Markup` region for the template.
    pub fn regions(&self) -> Vec<Region> {
        let mut regions = Vec::new();
        for script in &self.scripts {
            regions.push(Region::new(RegionKind::Code, script.start_line, script.end_line));
        }
        if let Some(template) = &self.template {
            regions.push(Region::new(
                RegionKind::Markup,
                template.start_line,
                template.end_line,
            ));
        }
        regions
    }
}

/// If `text` starts with an opening tag for `name` (`<name ...>` or
/// `<name>`), returns the byte length of that opening tag.
fn block_open_len(text: &str, name: &str) -> Option<usize> {
    let rest = text.strip_prefix('<')?.strip_prefix(name)?;
    match rest.chars().next() {
        Some(c) if c == '>' || c.is_whitespace() => {}
        _ => return None,
    }
    let close = rest.find('>')?;
    Some(1 + name.len() + close + 1)
}

/// Finds the end of a block: returns `(content_end, close_tag_start)` byte
/// offsets. Nested same-name blocks (templates inside templates) are
/// balanced. An unclosed block runs to the end of the source.
fn find_block_end(source: &str, content_start: usize, name: &str) -> (usize, usize) {
    let open = format!("<{name}");
    let close = format!("</{name}");
    let mut depth = 1;
    let mut pos = content_start;

    while pos < source.len() {
        let Some(offset) = source[pos..].find('<') else {
            break;
        };
        let at = pos + offset;
        if source[at..].starts_with(&close) {
            depth -= 1;
            if depth == 0 {
                return (at, at);
            }
            pos = at + close.len();
        } else if source[at..].starts_with(&open)
            && source[at + open.len()..]
                .chars()
                .next()
                .is_some_and(|c| c == '>' || c.is_whitespace())
        {
            depth += 1;
            pos = at + open.len();
        } else {
            pos = at + 1;
        }
    }

    (source.len(), source.len())
}

/// Byte offsets of each line start; the first entry is always 0.
fn compute_line_starts(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}
