//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ToolConfig;
use std::path::Path;

/// Loads and validates a `quell.toml` configuration from a project
/// directory.
///
/// A missing file is not an error: it yields the default configuration.
pub fn load_config(project_dir: &Path) -> Result<ToolConfig, ConfigError> {
    let config_path = project_dir.join("quell.toml");
    if !config_path.exists() {
        return Ok(ToolConfig::default());
    }
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `quell.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates configuration values beyond what deserialization enforces.
fn validate_config(config: &ToolConfig) -> Result<(), ConfigError> {
    if config.checker.command.trim().is_empty() {
        return Err(ConfigError::Validation(
            "checker.command must not be empty".to_string(),
        ));
    }
    Ok(())
}
