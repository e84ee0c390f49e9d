//! Runtime configuration: where the catalog database lives, how many idle
//! connections to keep around, and how chatty logging should be. Values come
//! from an optional `config.toml` and can be overridden from the environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// File name looked up inside the platform config directory.
const CONFIG_FILE_NAME: &str = "config.toml";
/// SQLite file name stored inside the platform data directory.
const DB_FILE_NAME: &str = "library.sqlite";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Connection descriptor for the backing store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite database file. Missing parent directories are created.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// Upper bound on connections the pool keeps open at once.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// How long a statement waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// How long a caller waits for a free pooled connection.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            pool_size: default_pool_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl DatabaseSettings {
    /// Settings pointing at an explicit file, everything else defaulted.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_pool_size() -> u32 {
    4
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_connect_timeout_ms() -> u64 {
    30_000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Platform data directory, or the working directory when no home exists.
fn default_db_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "library", "library-catalog")
}

impl LibraryConfig {
    /// Load `config.toml` from the platform config directory if it exists,
    /// otherwise start from defaults. Environment overrides apply either way.
    pub fn load() -> Result<Self> {
        let path = project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME));
        let mut config = match path {
            Some(path) if path.exists() => Self::parse_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::parse_file(path.as_ref())?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Environment variables take precedence over file values:
    /// - `LIBRARY_CATALOG_DB`: database.path
    /// - `LIBRARY_CATALOG_POOL_SIZE`: database.pool_size
    /// - `LIBRARY_CATALOG_LOG_LEVEL`: logging.level
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = env::var("LIBRARY_CATALOG_DB") {
            self.database.path = PathBuf::from(path);
        }

        if let Ok(size) = env::var("LIBRARY_CATALOG_POOL_SIZE") {
            self.database.pool_size = size
                .parse()
                .map_err(|_| anyhow!("Invalid LIBRARY_CATALOG_POOL_SIZE value: {size}"))?;
        }

        if let Ok(level) = env::var("LIBRARY_CATALOG_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            bail!("database.path must not be empty");
        }
        if self.database.pool_size == 0 {
            bail!("database.pool_size must be at least 1");
        }
        Ok(())
    }
}
