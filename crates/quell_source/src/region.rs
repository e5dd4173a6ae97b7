//! Line-interval regions of a composite document.

use serde::{Deserialize, Serialize};

/// The kind of content a [`Region`] holds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum RegionKind {
    /// Markup content (a template block). Markers are spliced inline.
    Markup,
    /// Code content (a script block or a plain source file). Markers go on
    /// their own line above the annotated line.
    Code,
}

/// A contiguous 1-indexed, inclusive line interval of a document, tagged with
/// the kind of content it holds.
///
/// A composite document has at most one `Markup` region and any number of
/// disjoint `Code` regions. A plain source file is modeled as a single `Code`
/// region spanning the whole file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Region {
    /// The kind of content in this region.
    pub kind: RegionKind,
    /// The first line of the region (1-indexed, inclusive).
    pub start: u32,
    /// The last line of the region (1-indexed, inclusive).
    pub end: u32,
}

impl Region {
    /// Creates a new region over the given inclusive line interval.
    pub fn new(kind: RegionKind, start: u32, end: u32) -> Self {
        Self { kind, start, end }
    }

    /// Returns `true` if `line` falls within this region.
    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }
}
