//! CLI configuration.
//!
//! Read from a TOML file; every section is optional:
//!
//! ```toml
//! [database]
//! url = "postgres://localhost/useradm"
//! max_connections = 5
//!
//! [hashing]
//! memory_cost = 19456
//! time_cost = 2
//!
//! [validation]
//! min_secret_length = 12
//!
//! [identifier]
//! normalize = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ua_admin::{AdminConfig, IdentifierPolicy};
use ua_auth::HashPolicy;
use ua_model::ValidationPolicy;
use ua_storage_sql::PoolConfig;

use crate::error::{CliError, CliResult};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Secret hashing work factor.
    pub hashing: HashPolicy,
    /// Secret strength thresholds.
    pub validation: ValidationPolicy,
    /// Identifier case handling.
    pub identifier: IdentifierPolicy,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL.
    pub url: Option<String>,
    /// Maximum pool size.
    pub max_connections: u32,
    /// Seconds to wait for a connection.
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            connect_timeout_secs: 10,
        }
    }
}

impl CliConfig {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// read if present, otherwise defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the file is missing, unreadable or invalid.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the text is not valid configuration or
    /// the `[validation]` thresholds contradict each other.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CliError::Config(format!("failed to parse config: {e}")))?;
        config
            .validation
            .check()
            .map_err(|e| CliError::Config(format!("invalid [validation] section: {e}")))?;
        Ok(config)
    }

    /// Gets the default configuration file path.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the home directory is unknown.
    pub fn config_path() -> CliResult<PathBuf> {
        let home = dirs_next::home_dir()
            .ok_or_else(|| CliError::Config("could not determine home directory".to_string()))?;
        Ok(home.join(".useradm").join("useradm.toml"))
    }

    /// Gets the effective database URL (from args or config).
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if neither provides one.
    pub fn effective_database_url(&self, arg_url: Option<&str>) -> CliResult<String> {
        arg_url
            .map(ToString::to_string)
            .or_else(|| self.database.url.clone())
            .ok_or_else(|| {
                CliError::Config(
                    "no database URL: pass --database-url, set USERADM_DATABASE_URL \
                     or add [database] url"
                        .to_string(),
                )
            })
    }

    /// Builds the pool configuration.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if no database URL is known.
    pub fn pool_config(&self, arg_url: Option<&str>) -> CliResult<PoolConfig> {
        Ok(PoolConfig::new(self.effective_database_url(arg_url)?)
            .max_connections(self.database.max_connections)
            .min_connections(0)
            .connect_timeout(Duration::from_secs(self.database.connect_timeout_secs)))
    }

    /// Builds the administrator configuration.
    #[must_use]
    pub fn admin_config(&self) -> AdminConfig {
        AdminConfig::new()
            .with_hashing(self.hashing.clone())
            .with_validation(self.validation.clone())
            .with_identifier(self.identifier)
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// Quiet (account id only).
    Quiet,
}
