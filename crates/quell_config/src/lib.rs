//! Project configuration loaded from an optional `quell.toml`.
//!
//! Everything has a sensible default; a project without a `quell.toml`
//! behaves exactly like one with an empty file.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{BranchAttributeSetting, CheckerConfig, PlacementConfig, ToolConfig};
