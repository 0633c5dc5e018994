//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treechain/treechain.toml`
//! 3. Explicit config file: `TREECHAIN_CONFIG` or [`Settings::load_from`]
//! 4. Environment variables: `TREECHAIN_*` prefix, `__` between sections
//!
//! Only presentation is configurable; the sample tree and chain are fixed.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Environment variable naming an extra config file.
pub const CONFIG_PATH_VAR: &str = "TREECHAIN_CONFIG";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// How a composite is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// `Name: [1 2 ] ` on one line
    #[default]
    Inline,
    /// Box-drawing tree, one node per line
    Tree,
}

impl RenderStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderStyle::Inline => "inline",
            RenderStyle::Tree => "tree",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    pub style: RenderStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Colored headers and errors (NO_COLOR still wins)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub render: RenderConfig,
    pub output: OutputConfig,
}

/// Get the XDG config directory for treechain.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treechain").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treechain.toml"))
}

impl Settings {
    /// Load settings, taking the explicit file from `TREECHAIN_CONFIG` if set.
    pub fn load() -> Result<Self, SettingsError> {
        let explicit = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::load_from(explicit.as_deref())
    }

    /// Load settings with layered precedence; `path`, when given, must exist.
    #[instrument(level = "debug")]
    pub fn load_from(path: Option<&Path>) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("render.style", defaults.render.style.as_str())?
            .set_default("output.color", defaults.output.color)?;

        if let Some(global_path) = global_config_path() {
            debug!(path = %global_path.display(), "global config");
            builder = builder.add_source(File::from(global_path).required(false));
        }

        if let Some(path) = path {
            debug!(path = %path.display(), "explicit config");
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("TREECHAIN")
                .prefix_separator("_")
                .separator("__"),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treechain configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/treechain/treechain.toml
#   Explicit: file named by TREECHAIN_CONFIG
#   Env:      TREECHAIN_* variables, e.g. TREECHAIN_RENDER__STYLE=tree

[render]
# "inline" prints `Composite1: [1 2 ... ] `, "tree" prints a box-drawing tree
# style = "inline"

[output]
# color = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_inline_and_colored() {
        let settings = Settings::default();
        assert_eq!(settings.render.style, RenderStyle::Inline);
        assert!(settings.output.color);
    }

    #[test]
    fn given_settings_when_serialized_then_roundtrips_through_toml() {
        let settings = Settings {
            render: RenderConfig {
                style: RenderStyle::Tree,
            },
            output: OutputConfig { color: false },
        };
        let text = settings.to_toml().unwrap();
        assert!(text.contains("style = \"tree\""));
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_then_parses_to_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
