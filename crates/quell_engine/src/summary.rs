//! Per-file processing counters.

use serde::Serialize;
use std::ops::AddAssign;

/// Counts of what suppression did to one file (or, when accumulated, to a
/// whole run).
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize)]
pub struct ProcessSummary {
    /// Markers inserted.
    pub inserted: usize,
    /// Markers removed (unnecessary-suppression diagnostics).
    pub removed: usize,
    /// Diagnostics that produced no edit: duplicates of an already placed
    /// marker, positions outside any known region, or markup positions the
    /// resolver declined.
    pub skipped: usize,
}

impl ProcessSummary {
    /// True when no edit was produced at all.
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.removed == 0
    }

    /// Total diagnostics accounted for.
    pub fn total(&self) -> usize {
        self.inserted + self.removed + self.skipped
    }
}

impl AddAssign for ProcessSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.inserted += rhs.inserted;
        self.removed += rhs.removed;
        self.skipped += rhs.skipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulation() {
        let mut total = ProcessSummary::default();
        total += ProcessSummary {
            inserted: 2,
            removed: 1,
            skipped: 0,
        };
        total += ProcessSummary {
            inserted: 0,
            removed: 0,
            skipped: 3,
        };
        assert_eq!(total.inserted, 2);
        assert_eq!(total.removed, 1);
        assert_eq!(total.skipped, 3);
        assert_eq!(total.total(), 6);
        assert!(!total.is_noop());
        assert!(ProcessSummary::default().is_noop());
    }
}
