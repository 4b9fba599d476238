use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::models::SENTINEL_COUNTRY;
use crate::rank::{RankOptions, TieBreak};

pub const CONFIG_ENV: &str = "TWEET_VIBES_CONFIG";
pub const CONFIG_DIR_ENV: &str = "TWEET_VIBES_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Report settings. Every field is optional in the YAML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Country value treated as "unknown" and kept out of the ranking.
    pub sentinel_country: String,
    /// How many countries the ranking lists.
    pub top_countries: usize,
    pub tie_break: TieBreak,
    /// Score posts on the rayon pool.
    pub parallel: bool,
    /// Decimal places kept on every average.
    pub decimals: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sentinel_country: SENTINEL_COUNTRY.to_string(),
            top_countries: 5,
            tie_break: TieBreak::Insertion,
            parallel: false,
            decimals: 2,
        }
    }
}

impl ReportConfig {
    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            sentinel: self.sentinel_country.clone(),
            limit: self.top_countries,
            tie_break: self.tie_break,
            decimals: self.decimals,
        }
    }
}

pub fn load_config(path: &Path) -> Result<ReportConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

pub fn parse_config(content: &str, path: &Path) -> Result<ReportConfig, ConfigError> {
    if content.trim().is_empty() {
        return Ok(ReportConfig::default());
    }
    serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Picks the config file: explicit flag, then `TWEET_VIBES_CONFIG`,
/// then `config.yaml` in `TWEET_VIBES_CONFIG_DIR` if it exists.
pub fn resolve_config_path(cli: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = cli {
        debug!("Using config file from --config argument: {}", p.display());
        return Some(p.to_path_buf());
    }
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        debug!("Using config file from {}: {}", CONFIG_ENV, p);
        return Some(PathBuf::from(p));
    }
    let dir = std::env::var(CONFIG_DIR_ENV).ok()?;
    let candidate = Path::new(&dir).join("config.yaml");
    candidate.exists().then_some(candidate)
}
