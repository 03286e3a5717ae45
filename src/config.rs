//! Relink configuration.
//!
//! Handles loading, validating, and merging `relink.toml`. The tool works with
//! no config file at all; a `relink.toml` placed in the document root overrides
//! individual stock values.
//!
//! ## Config File Location
//!
//! ```text
//! source/
//! ├── relink.toml              # Optional, overrides stock defaults
//! ├── index.md
//! ├── Setup/
//! │   └── Setup-Quickstart.md
//! └── Components/
//!     └── Component-Overview.md
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! toc_file = "toc.md"       # Generated toc document, relative to the root
//! ignore = []               # File names (with .md) left out of the toc
//!
//! [links]
//! no_remap_prefixes = ["http://", "https://", "github:", "api:",
//!                      "feature-request", "report-bug", "issue", "bug-report"]
//!
//! [links.text_remaps]       # Literal link label -> replacement label
//! "Getting Started" = "Setup Quickstart"
//!
//! [links.url_remaps]        # Literal link target -> replacement target
//! "Getting-Started" = "Setup-Quickstart"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the optional config file looked up in the document root.
pub const CONFIG_FILE: &str = "relink.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `relink.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelinkConfig {
    /// Path of the generated toc document, relative to the document root.
    pub toc_file: String,
    /// File names (including `.md`) kept out of the toc and the duplicate check.
    pub ignore: Vec<String>,
    /// Link remapping rules.
    pub links: LinkRules,
}

impl Default for RelinkConfig {
    fn default() -> Self {
        Self {
            toc_file: "toc.md".to_string(),
            ignore: Vec::new(),
            links: LinkRules::default(),
        }
    }
}

impl RelinkConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let toc = Path::new(&self.toc_file);
        if self.toc_file.is_empty() {
            return Err(ConfigError::Validation("toc_file must not be empty".into()));
        }
        if toc.is_absolute() {
            return Err(ConfigError::Validation(
                "toc_file must be relative to the document root".into(),
            ));
        }
        if toc.extension().and_then(|e| e.to_str()) != Some("md") {
            return Err(ConfigError::Validation(
                "toc_file must be a .md file".into(),
            ));
        }
        if self.links.no_remap_prefixes.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "links.no_remap_prefixes must not contain empty strings".into(),
            ));
        }
        if self.links.text_remaps.keys().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "links.text_remaps keys must not be empty".into(),
            ));
        }
        if self.links.url_remaps.keys().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "links.url_remaps keys must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Reference of the toc document: `toc_file` with forward slashes and no extension.
    pub fn toc_reference(&self) -> String {
        let normalized = self.toc_file.replace('\\', "/");
        crate::naming::strip_extension(&normalized).to_string()
    }
}

/// Hand-maintained overrides applied to every link before path resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkRules {
    /// Targets starting with any of these are never path-resolved.
    pub no_remap_prefixes: Vec<String>,
    /// Literal label → replacement label.
    pub text_remaps: BTreeMap<String, String>,
    /// Literal target → replacement target, checked against the written target.
    pub url_remaps: BTreeMap<String, String>,
}

impl Default for LinkRules {
    fn default() -> Self {
        Self {
            no_remap_prefixes: [
                "http://",
                "https://",
                "github:",
                "api:",
                "feature-request",
                "report-bug",
                "issue",
                "bug-report",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            text_remaps: BTreeMap::new(),
            url_remaps: BTreeMap::new(),
        }
    }
}

impl LinkRules {
    /// Label after the text-remap table.
    pub fn remap_text<'a>(&'a self, label: &'a str) -> &'a str {
        self.text_remaps.get(label).map(String::as_str).unwrap_or(label)
    }

    /// Target after the url-remap table.
    pub fn remap_url<'a>(&'a self, target: &'a str) -> &'a str {
        self.url_remaps.get(target).map(String::as_str).unwrap_or(target)
    }

    pub fn is_no_remap(&self, target: &str) -> bool {
        self.no_remap_prefixes
            .iter()
            .any(|prefix| target.starts_with(prefix.as_str()))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(RelinkConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Lay `overlay` over `base` in place.
///
/// Tables combine key by key and keep whatever `overlay` does not mention.
/// Any other overlay value replaces the base value outright, so a
/// `no_remap_prefixes` list in `relink.toml` replaces the stock list.
pub fn overlay_toml(base: &mut toml::Value, overlay: toml::Value) {
    let toml::Value::Table(layer) = overlay else {
        *base = overlay;
        return;
    };
    let Some(table) = base.as_table_mut() else {
        *base = toml::Value::Table(layer);
        return;
    };
    for (key, value) in layer {
        match table.get_mut(&key) {
            Some(existing) => overlay_toml(existing, value),
            None => {
                table.insert(key, value);
            }
        }
    }
}

/// Parse `relink.toml` in `dir`, or `None` when there is no such file.
pub fn read_overlay(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    match fs::read_to_string(dir.join(CONFIG_FILE)) {
        Ok(content) => Ok(Some(toml::from_str(&content)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Stock defaults with an optional overlay on top, deserialized and validated.
pub fn config_from_overlay(overlay: Option<toml::Value>) -> Result<RelinkConfig, ConfigError> {
    let mut value = stock_defaults_value()?;
    if let Some(layer) = overlay {
        overlay_toml(&mut value, layer);
    }
    let config: RelinkConfig = value.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `relink.toml` in the document root, falling back to defaults.
pub fn load_config(root: &Path) -> Result<RelinkConfig, ConfigError> {
    config_from_overlay(read_overlay(root)?)
}

/// Returns a fully-commented stock `relink.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# toc-relink Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file in the document root.
# Unknown keys will cause an error.

# Generated toc document, relative to the document root.
toc_file = "toc.md"

# File names (including .md) left out of the toc and the duplicate-name check.
# Ignored files are still link targets and still get relinked.
ignore = []

# ---------------------------------------------------------------------------
# Link rewriting
# ---------------------------------------------------------------------------
[links]
# Link targets starting with any of these are passed through untouched.
# Setting this list replaces the defaults entirely.
no_remap_prefixes = [
    "http://",
    "https://",
    "github:",
    "api:",
    "feature-request",
    "report-bug",
    "issue",
    "bug-report",
]

# Literal link label -> replacement label. Only the displayed text changes.
[links.text_remaps]
# "Developer Central" = "Evennia Component overview"
# "Getting Started" = "Setup Quickstart"

# Literal link target -> replacement target, applied before path resolution.
# Use it to point links at documents that were renamed. Keys match the target
# exactly as written, so list each relative spelling separately.
[links.url_remaps]
# "Developer-Central" = "Component/Component-Overview"
# "Tutorials" = "Howto/Howto-Overview"
# "../Howto/Starting/Directory-Overview" = "Gamedir-Overview"
# "Howto/Starting/Directory-Overview" = "Gamedir-Overview"
# "Starting/Directory-Overview" = "Gamedir-Overview"
# "Directory-Overview" = "Gamedir-Overview"
# "../Setup/Getting-Started" = "Setup-Quickstart"
# "Setup/Getting-Started" = "Setup-Quickstart"
# "Getting-Started" = "Setup-Quickstart"
# "First-Steps-Coding" = "Starting-Part1"
# "../Howto/Starting/Adding-Command-Tutorial" = "Adding-Commands"
# "Howto/Starting/Adding-Command-Tutorial" = "Adding-Commands"
# "Starting/Adding-Command-Tutorial" = "Adding-Commands"
# "Adding-Command-Tutorial" = "Adding-Commands"
# "CmdSet" = "Command-Sets"
# "Spawner" = "Spawner-and-Prototypes"
# "issue" = "github:issue"
# "issues" = "github:issue"
# "bug" = "github:issue"
# "bug-report" = "github:issue"
# "Components/Components-Overview" = "Component-Overview"
# "Components-Overview" = "Component-Overview"
# "Concepts/Concepts-Overview" = "Concept-Overview"
# "Concepts-Overview" = "Concept-Overview"
"##
}
