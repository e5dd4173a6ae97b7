//! Type-checker diagnostics: codes, records, and report parsing.
//!
//! This crate provides the [`TsCode`] diagnostic code type, the
//! [`Diagnostic`] record consumed by the suppression engine, and the parser
//! for textual checker reports of the form
//! `path(line,col): error TSxxxx: message`.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod report;

pub use code::TsCode;
pub use diagnostic::Diagnostic;
pub use report::{group_by_file, parse_report};
