//! Source positions, regions, and the offset-safe line buffer.
//!
//! This crate provides the [`LineCol`] and [`Span`] position types used by the
//! markup resolver, [`Region`] line intervals for composite documents, the
//! [`Edit`] unit of mutation, and the [`LineBuffer`] that applies edits to a
//! file's lines without invalidating positions of edits still to be applied.

#![warn(missing_docs)]

pub mod buffer;
pub mod edit;
pub mod pos;
pub mod region;

pub use buffer::LineBuffer;
pub use edit::Edit;
pub use pos::{LineCol, Span};
pub use region::{Region, RegionKind};
