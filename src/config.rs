use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::PairSpec;
use crate::output::{clamp_width, OutputMode, DEFAULT_COLUMN_WIDTH};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

#[derive(Debug, Clone)]
pub struct MultidiffConfig {
    pub server_url: String,
    pub output: OutputMode,
    pub column_width: usize,
    pub fetch_content: bool,
    pub max_concurrent_fetches: usize,
    pub timeout: Option<Duration>,
    /// Pairs to compare when none are given on the command line.
    pub default_pairs: Vec<PairSpec>,
}

impl Default for MultidiffConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            output: OutputMode::default(),
            column_width: DEFAULT_COLUMN_WIDTH,
            fetch_content: true,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            timeout: None,
            default_pairs: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server_url: Option<String>,
    #[serde(default)]
    output: Option<OutputMode>,
    #[serde(default)]
    column_width: Option<usize>,
    #[serde(default)]
    fetch_content: Option<bool>,
    #[serde(default)]
    max_concurrent_fetches: Option<usize>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    pairs: Vec<PairSpec>,
}

fn config_path() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("multidiff");
    path.push("config.toml");
    path
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load config from `~/.config/multidiff/config.toml`, falling back to defaults.
pub fn load_config() -> MultidiffConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> MultidiffConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return MultidiffConfig::default(),
    };

    let file: ConfigFile = match toml::from_str(&contents) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("ignoring {}: {e}", path.display());
            return MultidiffConfig::default();
        }
    };

    let defaults = MultidiffConfig::default();
    MultidiffConfig {
        server_url: file.server_url.unwrap_or(defaults.server_url),
        output: file.output.unwrap_or(defaults.output),
        column_width: clamp_width(file.column_width.unwrap_or(defaults.column_width)),
        fetch_content: file.fetch_content.unwrap_or(defaults.fetch_content),
        max_concurrent_fetches: file
            .max_concurrent_fetches
            .unwrap_or(defaults.max_concurrent_fetches)
            .max(1),
        timeout: file.timeout_secs.map(Duration::from_secs),
        default_pairs: file.pairs,
    }
}
