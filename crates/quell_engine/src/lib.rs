//! The suppression engine: grouping, routing, placement, and splicing.
//!
//! Given one file's content and its diagnostics, the engine computes and
//! applies the edits that annotate each diagnosed location with a
//! suppression marker (or remove a marker the checker reports as
//! unnecessary). Edits are applied bottom-to-top and right-to-left so
//! positions never invalidate each other.

#![warn(missing_docs)]

pub mod file_kind;
pub mod group;
pub mod markers;
pub mod policy;
pub mod process;
pub mod sections;
pub mod strip;
pub mod summary;

pub use file_kind::FileKind;
pub use process::{suppress, EngineOptions};
pub use quell_markup::BranchAttributePolicy;
pub use strip::strip_markers;
pub use summary::ProcessSummary;
