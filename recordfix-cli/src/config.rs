//! Configuration file loading for recordfix.
//!
//! Discovers and loads `recordfix.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use recordfix_types::RuleDeclaration;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "recordfix.toml";

/// Top-level configuration from recordfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecordfixConfig {
    /// Field path to rule chain, in declaration order.
    pub rules: RuleDeclaration,

    /// Output settings.
    pub output: OutputConfig,
}

/// Output section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the JSON artifacts.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Discover the recordfix.toml config file.
///
/// Returns `None` if `dir` holds no config file.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a recordfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<RecordfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<RecordfixConfig> {
    let config: RecordfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<RecordfixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(RecordfixConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub rules: RuleDeclaration,
    pub pretty: bool,
}

/// Merges a loaded config with CLI arguments.
pub struct ConfigMerger {
    config: RecordfixConfig,
}

impl ConfigMerger {
    pub fn new(config: RecordfixConfig) -> Self {
        Self { config }
    }

    /// Merge with fix command CLI arguments.
    ///
    /// A rules file replaces the config's `[rules]` table; `--rule` assignments are then applied
    /// on top, overriding fields already declared and appending new ones.
    pub fn merge_fix_args(
        self,
        rules_file: Option<RuleDeclaration>,
        cli_rules: &[(String, String)],
        compact: bool,
    ) -> MergedConfig {
        let mut rules = rules_file.unwrap_or(self.config.rules);
        for (field, chain) in cli_rules {
            rules.insert(field.clone(), chain.clone());
        }

        MergedConfig {
            rules,
            pretty: self.config.output.pretty && !compact,
        }
    }
}

/// Parse CLI rule assignments from `path=chain` strings.
pub fn parse_rule_assignments(entries: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut parts = entry.splitn(2, '=');
        let field = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("invalid rule '{}': missing field path", entry))?;
        let chain = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("invalid rule '{}': missing rule chain", entry))?;
        out.push((field.to_string(), chain.to_string()));
    }
    Ok(out)
}
