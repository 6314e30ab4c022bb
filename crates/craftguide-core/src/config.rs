//! Configuration loading and typed config structures for the guide generator.
//!
//! The configuration lives in `craftguide.yaml` next to the binary's working
//! directory. Every field has a default, and a missing file simply yields
//! the defaults, so a bare checkout with the scraped data under `src/data`
//! works without any configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

/// Environment variable overriding `data.dir`.
pub const DATA_DIR_ENV: &str = "CRAFTGUIDE_DATA_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level generator configuration, mirroring `craftguide.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuideConfig {
    /// Where the scraped records live.
    #[serde(default)]
    pub data: DataConfig,

    /// The list of items to generate guides for.
    #[serde(default)]
    pub items: ItemsConfig,

    /// Persistent per-item info cache.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Where the guide is written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Media files referenced by the guide.
    #[serde(default)]
    pub media: MediaConfig,

    /// Items treated as already expanded when the batch starts.
    #[serde(default = "default_pre_expanded")]
    pub pre_expanded: Vec<String>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            items: ItemsConfig::default(),
            cache: CacheConfig::default(),
            output: OutputConfig::default(),
            media: MediaConfig::default(),
            pre_expanded: default_pre_expanded(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GuideConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `CRAFTGUIDE_DATA_DIR` overrides `data.dir`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Like [`GuideConfig::from_file`], but a missing file yields the
    /// defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        info!(path = %path.display(), "Config file not found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data.dir = PathBuf::from(dir);
        }
    }
}

/// Scraped data file locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// Directory holding the record JSON files.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// Static world-object list; `{dir}/objects.json` when unset.
    #[serde(default)]
    pub objects_path: Option<PathBuf>,

    /// Alias tables; `{dir}/misc.json` when unset.
    #[serde(default)]
    pub misc_path: Option<PathBuf>,
}

impl DataConfig {
    /// Path of a record file inside the data directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Resolved static-object list path.
    pub fn objects_file(&self) -> PathBuf {
        self.objects_path
            .clone()
            .unwrap_or_else(|| self.file("objects.json"))
    }

    /// Resolved alias-table path.
    pub fn misc_file(&self) -> PathBuf {
        self.misc_path
            .clone()
            .unwrap_or_else(|| self.file("misc.json"))
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            objects_path: None,
            misc_path: None,
        }
    }
}

/// Requested-items list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemsConfig {
    /// Text file with one item name per line.
    #[serde(default = "default_list_path")]
    pub list_path: PathBuf,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            list_path: default_list_path(),
        }
    }
}

/// Info cache settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Directory of per-item JSON files; in-memory caching when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Path of the generated guide.
    #[serde(default = "default_guide_path")]
    pub guide_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            guide_path: default_guide_path(),
        }
    }
}

/// Media settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaConfig {
    /// Directory the guide's `images/` and `videos/` paths are relative to.
    /// When set, referenced files that do not exist are reported.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("src/data")
}

fn default_list_path() -> PathBuf {
    PathBuf::from("items.txt")
}

fn default_guide_path() -> PathBuf {
    PathBuf::from("guide.json")
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_pre_expanded() -> Vec<String> {
    [
        "Work Bench",
        "Furnace",
        "Iron Anvil",
        "Mythril Anvil",
        "Adamantite Forge",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
