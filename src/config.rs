use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::compiler::DEFAULT_VARIABLE;

pub const DEFAULT_SEPARATOR_WIDTH: usize = 80;
pub const DEFAULT_SUBDIVISIONS: usize = 1000;

/// Settings read from `~/.quadcalc/config.toml`; every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Name of the free variable in formulas.
    pub variable: String,
    /// Digits after the decimal point when printing results.
    pub precision: Option<usize>,
    pub separator_width: usize,
    /// Subdivision count for `integrate` when `-n` is omitted.
    pub default_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variable: DEFAULT_VARIABLE.to_string(),
            precision: None,
            separator_width: DEFAULT_SEPARATOR_WIDTH,
            default_n: DEFAULT_SUBDIVISIONS,
        }
    }
}

impl Config {
    /// Loads `path` if it exists; a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("Parse config {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        let mut chars = self.variable.chars();
        let valid_ident = chars
            .next()
            .is_some_and(|c| c == '_' || unicode_ident::is_xid_start(c))
            && chars.all(|c| c == '_' || unicode_ident::is_xid_continue(c));
        if !valid_ident {
            anyhow::bail!("variable '{}' is not a valid identifier", self.variable);
        }
        if self.default_n == 0 {
            anyhow::bail!("default_n must be positive");
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~/.quadcalc/config.toml (on Windows under the user profile)
    dirs_next::home_dir().map(|h| h.join(".quadcalc").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}
