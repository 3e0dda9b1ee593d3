//! # Configuration management for Workbench Core
//!
//! Settings for the layout engine are read from a TOML file in the user's
//! configuration directory, falling back to defaults. Every section is
//! optional in the file; missing values take their default.
//!
//! ```toml
//! [layout]
//! percent_tolerance = 0.01
//! validate_initial = true
//!
//! [ids]
//! strategy = "sequential"
//! prefix = "tile"
//!
//! [logging]
//! level = "debug"
//! ```

use crate::ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator, DEFAULT_ID_PREFIX};
use crate::size::PERCENT_TOLERANCE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Main configuration structure for the workbench.
///
/// # Example
///
/// ```rust
/// use workbench_core::WorkbenchConfig;
/// use workbench_core::config::IdStrategy;
///
/// let config = WorkbenchConfig::default();
/// assert_eq!(config.ids.strategy, IdStrategy::Uuid);
/// assert_eq!(config.logging.level, "info");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Layout engine settings
    pub layout: LayoutConfig,
    /// Pane id generation
    pub ids: IdConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Layout engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Allowed distance from 100 when validating percentage sums
    pub percent_tolerance: f64,
    /// Whether the context validates the layout it starts with
    pub validate_initial: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            percent_tolerance: PERCENT_TOLERANCE,
            validate_initial: false,
        }
    }
}

/// How new pane ids are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `<prefix>-<uuid v4>`
    Uuid,
    /// `<prefix>-<n>`, counting from 1
    Sequential,
}

/// Pane id generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    pub strategy: IdStrategy,
    pub prefix: String,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            strategy: IdStrategy::Uuid,
            prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of [`LOG_LEVELS`]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl WorkbenchConfig {
    /// Load configuration from the default location, or use defaults.
    ///
    /// A missing or unreadable file is not an error; the defaults are
    /// returned instead.
    pub fn load_or_default() -> Self {
        let loaded = Self::default_config_path().and_then(|path| {
            if path.exists() {
                Self::load_from_file(&path).map(Some)
            } else {
                Ok(None)
            }
        });

        match loaded {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!("No configuration file found, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!("Ignoring configuration file: {}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// loaded values fail [`validate`](Self::validate).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use workbench_core::WorkbenchConfig;
    ///
    /// let config = WorkbenchConfig::load_from_file("workbench.toml")?;
    /// # Ok::<(), workbench_core::Error>(())
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        let config: WorkbenchConfig = toml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the file cannot be written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::config(format!("Failed to create config directory: {}", e)))?;
        }

        std::fs::write(path, content)
            .map_err(|e| Error::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.layout.percent_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 || tolerance >= 100.0 {
            return Err(Error::validation(
                "layout.percent_tolerance",
                "Tolerance must be a finite value between 0 and 100",
            ));
        }

        if self.ids.prefix.trim().is_empty() {
            return Err(Error::validation("ids.prefix", "Prefix must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(Error::validation(
                "logging.level",
                "Log level must be one of: error, warn, info, debug, trace",
            ));
        }

        Ok(())
    }

    /// Get the default configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no configuration directory.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use workbench_core::WorkbenchConfig;
    ///
    /// let path = WorkbenchConfig::default_config_path()?;
    /// assert!(path.ends_with("workbench/config.toml"));
    /// # Ok::<(), workbench_core::Error>(())
    /// ```
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::config("Could not determine config directory"))?
            .join("workbench");

        Ok(config_dir.join("config.toml"))
    }

    /// Build the id generator described by the `ids` section.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workbench_core::WorkbenchConfig;
    /// use workbench_core::config::IdStrategy;
    ///
    /// let mut config = WorkbenchConfig::default();
    /// config.ids.strategy = IdStrategy::Sequential;
    /// config.ids.prefix = "tile".to_string();
    ///
    /// let mut ids = config.id_generator();
    /// assert_eq!(ids.next_id().as_str(), "tile-1");
    /// ```
    pub fn id_generator(&self) -> Box<dyn IdGenerator> {
        match self.ids.strategy {
            IdStrategy::Uuid => Box::new(UuidIdGenerator::with_prefix(self.ids.prefix.as_str())),
            IdStrategy::Sequential => {
                Box::new(SequentialIdGenerator::new(self.ids.prefix.as_str()))
            }
        }
    }
}
