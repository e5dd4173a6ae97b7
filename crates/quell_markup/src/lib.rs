//! Markup tree, position resolver, and the parsers that feed them.
//!
//! This crate provides the [`Node`] tagged union describing a parsed markup
//! region, the [`resolve`](resolver::resolve) algorithm that finds the
//! smallest node owning a diagnostic position, a hand-written template
//! parser producing that tree, the single-file-component section splitter,
//! and a JSX line-range scanner for `.tsx` sources.

#![warn(missing_docs)]

pub mod jsx;
pub mod node;
pub mod parser;
pub mod resolver;
pub mod sfc;

pub use node::Node;
pub use parser::parse_template;
pub use resolver::{resolve, BranchAttributePolicy, ResolveOptions};
pub use sfc::SfcDocument;
