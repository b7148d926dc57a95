use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "gate.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserverConfig {
    #[serde(default = "default_body")]
    pub body: String,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub height_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default)]
    pub observer: ObserverConfig,

    #[serde(default)]
    pub star_table: Option<String>,

    /// Text kernels loaded before the prompt
    #[serde(default)]
    pub kernels: Vec<PathBuf>,

    /// Star table name -> CSV file
    #[serde(default)]
    pub star_tables: BTreeMap<String, PathBuf>,

    /// Command files run before positional command files
    #[serde(default)]
    pub startup_scripts: Vec<PathBuf>,

    #[serde(default = "default_tracking_interval_ms")]
    pub tracking_interval_ms: u64,
}

fn default_body() -> String {
    "EARTH".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_tracking_interval_ms() -> u64 {
    1000
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            body: default_body(),
            latitude: None,
            longitude: None,
            height_km: 0.0,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            observer: ObserverConfig::default(),
            star_table: None,
            kernels: Vec::new(),
            star_tables: BTreeMap::new(),
            startup_scripts: Vec::new(),
            tracking_interval_ms: default_tracking_interval_ms(),
        }
    }
}

impl GateConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GateConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Read `path`, or `gate.toml` when none is given.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    pub fn tracking_interval(&self) -> Duration {
        Duration::from_millis(self.tracking_interval_ms)
    }
}

pub static CONFIG: OnceLock<GateConfig> = OnceLock::new();

pub fn read_config(path: Option<&Path>) -> anyhow::Result<&'static GateConfig> {
    let config = GateConfig::load(path)?;
    Ok(CONFIG.get_or_init(|| config))
}
