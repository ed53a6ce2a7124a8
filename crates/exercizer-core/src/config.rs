//! Grading configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::compare::MatchMode;

/// Score (in percent) at or above which an attempt counts as a success.
pub const DEFAULT_PASS_THRESHOLD: u8 = 70;

/// Settings the grading engine receives instead of hard-coding them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Minimum score for `success`, 0–100.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u8,
    /// Language of feedback messages.
    #[serde(default)]
    pub locale: Locale,
    /// How submitted option flags are treated.
    #[serde(default)]
    pub match_mode: MatchMode,
}

fn default_pass_threshold() -> u8 {
    DEFAULT_PASS_THRESHOLD
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            locale: Locale::default(),
            match_mode: MatchMode::default(),
        }
    }
}

impl GradingConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.pass_threshold <= 100,
            "pass_threshold must be between 0 and 100, got {}",
            self.pass_threshold
        );
        Ok(())
    }
}

/// Languages feedback messages are available in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    Es,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Fr => write!(f, "fr"),
            Locale::Es => write!(f, "es"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept full tags like "fr-CA" or "en_US".
        let lang = s
            .trim()
            .split(&['-', '_'][..])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match lang.as_str() {
            "en" | "english" => Ok(Locale::En),
            "fr" | "french" => Ok(Locale::Fr),
            "es" | "spanish" => Ok(Locale::Es),
            _ => Err(format!("unsupported locale: {s}")),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `exercizer.toml` in the current directory
/// 2. `~/.config/exercizer/config.toml`
///
/// Environment variable overrides: `EXERCIZER_PASS_THRESHOLD`, `EXERCIZER_LOCALE`.
pub fn load_config() -> Result<GradingConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradingConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("exercizer.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_file(&path)?
        }
        None => GradingConfig::default(),
    };

    if let Ok(raw) = std::env::var("EXERCIZER_PASS_THRESHOLD") {
        config.pass_threshold = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid EXERCIZER_PASS_THRESHOLD: '{raw}'"))?;
    }
    if let Ok(raw) = std::env::var("EXERCIZER_LOCALE") {
        config.locale = raw.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<GradingConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<GradingConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("exercizer"))
}
