//! File kind detection from a path.

use std::path::Path;

/// How a file's content is processed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FileKind {
    /// A plain code file (`.ts`, `.js`, ...): one implicit code region.
    Code,
    /// A `.tsx` file: code with JSX line ranges.
    Jsx,
    /// A `.vue` single-file component: markup plus script regions.
    Composite,
}

impl FileKind {
    /// Detects the kind from a path, or `None` for files that are never
    /// processed (declaration files).
    pub fn detect(path: &Path) -> Option<FileKind> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".d.ts") {
            return None;
        }
        if name.ends_with(".vue") {
            return Some(FileKind::Composite);
        }
        if name.ends_with(".tsx") {
            return Some(FileKind::Jsx);
        }
        Some(FileKind::Code)
    }
}
