//! TypeScript-style diagnostic codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A TypeScript-style diagnostic code.
///
/// Displayed (and serialized) as the `TS` prefix followed by the numeric
/// identifier, e.g. `TS2322`. Parsed from the same form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TsCode {
    /// The numeric identifier of the code.
    pub number: u32,
}

impl TsCode {
    /// The reserved "unnecessary suppression" code (`TS2578`), reported by
    /// the checker when a previously inserted marker no longer suppresses
    /// anything. The engine removes the marker instead of inserting one.
    pub const UNNECESSARY_SUPPRESSION: TsCode = TsCode { number: 2578 };

    /// Creates a code from its numeric identifier.
    pub fn new(number: u32) -> Self {
        Self { number }
    }

    /// Returns `true` if this is the reserved "unnecessary suppression" code.
    pub fn is_unnecessary_suppression(self) -> bool {
        self == Self::UNNECESSARY_SUPPRESSION
    }
}

impl fmt::Display for TsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TS{}", self.number)
    }
}

/// Error produced when a string is not a valid `TSxxxx` code.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid diagnostic code '{0}'")]
pub struct ParseCodeError(pub String);

impl FromStr for TsCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("TS")
            .ok_or_else(|| ParseCodeError(s.to_string()))?;
        let number = digits
            .parse::<u32>()
            .map_err(|_| ParseCodeError(s.to_string()))?;
        Ok(Self { number })
    }
}

impl From<TsCode> for String {
    fn from(code: TsCode) -> String {
        code.to_string()
    }
}

impl TryFrom<String> for TsCode {
    type Error = ParseCodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
