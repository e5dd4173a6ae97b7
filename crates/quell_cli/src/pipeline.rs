//! Shared helpers for CLI commands.
//!
//! Config resolution, checker invocation, and the mapping from
//! configuration values to engine options.

use std::path::Path;
use std::process::Command;

use quell_config::{load_config, load_config_from_str, BranchAttributeSetting, ToolConfig};
use quell_engine::{BranchAttributePolicy, EngineOptions};

use crate::GlobalArgs;

/// Loads the tool configuration.
///
/// `--config` points at an explicit `quell.toml`; otherwise the project
/// directory is searched and a missing file yields the defaults.
pub fn load_tool_config(
    global: &GlobalArgs,
    project_dir: &Path,
) -> Result<ToolConfig, Box<dyn std::error::Error>> {
    match &global.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {path}: {e}"))?;
            Ok(load_config_from_str(&content)?)
        }
        None => Ok(load_config(project_dir)?),
    }
}

/// Maps configuration values onto engine options.
pub fn engine_options(config: &ToolConfig) -> EngineOptions {
    let branch_attribute_policy = match config.placement.branch_attributes {
        BranchAttributeSetting::ForwardToGroup => BranchAttributePolicy::ForwardToGroup,
        BranchAttributeSetting::StayOnElement => BranchAttributePolicy::StayOnElement,
    };
    EngineOptions {
        branch_attribute_policy,
    }
}

/// Runs the configured checker via `npx <command> --noEmit` in
/// `project_dir` and returns its combined report text.
///
/// A non-zero exit is expected when the checker found errors; only a
/// failure to launch the process is an error here.
pub fn run_checker(
    command: &str,
    project_dir: &Path,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = Command::new("npx")
        .arg(command)
        .arg("--noEmit")
        .current_dir(project_dir)
        .output()
        .map_err(|e| format!("failed to run npx {command}: {e}"))?;

    let mut report = String::from_utf8_lossy(&output.stdout).into_owned();
    report.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_placement_setting() {
        let mut config = ToolConfig::default();
        assert_eq!(
            engine_options(&config).branch_attribute_policy,
            BranchAttributePolicy::ForwardToGroup
        );
        config.placement.branch_attributes = BranchAttributeSetting::StayOnElement;
        assert_eq!(
            engine_options(&config).branch_attribute_policy,
            BranchAttributePolicy::StayOnElement
        );
    }

    #[test]
    fn explicit_config_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        std::fs::write(&config_path, "[checker]\ncommand = \"vue-tsc\"\n").unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some(config_path.to_string_lossy().into_owned()),
        };
        let config = load_tool_config(&global, Path::new(".")).unwrap();
        assert_eq!(config.checker.command, "vue-tsc");
    }

    #[test]
    fn missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        };
        let config = load_tool_config(&global, dir.path()).unwrap();
        assert_eq!(config.checker.command, "tsc");
    }
}
