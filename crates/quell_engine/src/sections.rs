//! Routing a line to the region it belongs to.

use quell_source::{Region, RegionKind};

/// Returns the kind of region `line` falls in, or `None` if it falls in no
/// region.
///
/// Code regions are checked before concluding markup. A line matching both
/// a code and a markup region is a configuration error in the supplied
/// regions; it routes to `None` so the diagnostic is skipped rather than
/// applied twice.
pub fn region_kind_at(regions: &[Region], line: u32) -> Option<RegionKind> {
    let in_code = regions
        .iter()
        .any(|r| r.kind == RegionKind::Code && r.contains_line(line));
    let in_markup = regions
        .iter()
        .any(|r| r.kind == RegionKind::Markup && r.contains_line(line));
    match (in_code, in_markup) {
        (true, true) => None,
        (true, false) => Some(RegionKind::Code),
        (false, true) => Some(RegionKind::Markup),
        (false, false) => None,
    }
}

/// Returns `true` if `line` falls in any of the given regions.
pub fn in_any_region(regions: &[Region], line: u32) -> bool {
    regions.iter().any(|r| r.contains_line(line))
}
