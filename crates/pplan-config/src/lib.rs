use pplan_core::StrategyKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Simple configuration for pplan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Worker threads for the parallel strategies, 0 = available parallelism
    #[serde(default)]
    pub threads: usize,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub benchmark: BenchmarkConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Print sort/pack timings after the plan
    #[serde(default)]
    pub timing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_max_items")]
    pub max_items: i64,

    #[serde(default = "default_max_weight")]
    pub max_weight: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            threads: 0,
            output: OutputConfig::default(),
            benchmark: BenchmarkConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            timing: false,
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            seed: default_seed(),
            max_items: default_max_items(),
            max_weight: default_max_weight(),
        }
    }
}

fn default_sizes() -> Vec<usize> {
    vec![100_000, 1_000_000]
}

fn default_seed() -> u64 {
    48
}

fn default_max_items() -> i64 {
    40
}

fn default_max_weight() -> f64 {
    500.0
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    /// Load config from the default location without creating it
    pub fn load_or_default() -> anyhow::Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "pplan", "pplan") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.pplan/config.toml")
        }
    }
}
