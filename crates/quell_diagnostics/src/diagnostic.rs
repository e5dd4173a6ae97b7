//! The diagnostic record consumed by the suppression engine.

use crate::code::TsCode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One reported type error at a file position.
///
/// Produced by the report parser (or supplied directly as structured data)
/// and consumed once per engine invocation. Line and column are 1-indexed,
/// matching checker output.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The file the diagnostic was reported against, as printed by the
    /// checker (usually relative to the project directory).
    pub file: PathBuf,
    /// The line number (1-indexed).
    pub line: u32,
    /// The column number (1-indexed).
    pub column: u32,
    /// The diagnostic code.
    pub code: TsCode,
    /// The human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic record.
    pub fn new(
        file: impl Into<PathBuf>,
        line: u32,
        column: u32,
        code: TsCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            code,
            message: message.into(),
        }
    }
}
