//! Configuration data structures for `quell.toml`.

use serde::Deserialize;

/// The full tool configuration.
///
/// All sections are optional; defaults match a project with no `quell.toml`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Checker invocation settings.
    #[serde(default)]
    pub checker: CheckerConfig,
    /// Marker placement settings.
    #[serde(default)]
    pub placement: PlacementConfig,
}

/// Checker invocation settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckerConfig {
    /// The checker command to run via `npx` (e.g. `tsc` or `vue-tsc`).
    #[serde(default = "default_checker_command")]
    pub command: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            command: default_checker_command(),
        }
    }
}

fn default_checker_command() -> String {
    "tsc".to_string()
}

/// Marker placement settings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementConfig {
    /// Where attribute-region diagnostics on `else`/`else-if` elements
    /// place their marker.
    #[serde(default)]
    pub branch_attributes: BranchAttributeSetting,
}

/// Placement choice for attribute diagnostics on `else`/`else-if` elements.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchAttributeSetting {
    /// Annotate the whole if/else construct at its top.
    #[default]
    ForwardToGroup,
    /// Annotate the branch's own element.
    StayOnElement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ToolConfig::default();
        assert_eq!(config.checker.command, "tsc");
        assert_eq!(
            config.placement.branch_attributes,
            BranchAttributeSetting::ForwardToGroup
        );
    }

    #[test]
    fn deserialize_full() {
        let toml = r#"
[checker]
command = "vue-tsc"

[placement]
branch_attributes = "stay-on-element"
"#;
        let config: ToolConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.checker.command, "vue-tsc");
        assert_eq!(
            config.placement.branch_attributes,
            BranchAttributeSetting::StayOnElement
        );
    }

    #[test]
    fn unknown_field_rejected() {
        let toml = "[checker]\ncommand = \"tsc\"\ntypo = 1\n";
        assert!(toml::from_str::<ToolConfig>(toml).is_err());
    }
}
