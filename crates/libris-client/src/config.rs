use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Origin of the library backend used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

/// Configuration for libris.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (LIBRIS_* prefix)
/// 3. Config file (~/.config/libris/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Origin of the library backend. API calls go to `<origin>/api/...` and
    /// images are served from `<origin><path>`.
    ///
    /// Can be set via:
    /// - CLI: --api-url http://host:port
    /// - ENV: LIBRIS_API_BASE_URL
    /// - Config: api_base_url = "..."
    /// - Default: http://localhost:3001
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Logger settings for the command-line tool.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The `[logging]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_coloured")]
    pub coloured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            coloured: default_coloured(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/libris/config.toml
    /// Reads environment variables with LIBRIS_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or if
    /// the configured origin is not an http(s) URL.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("libris");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration, then apply the --api-url CLI override.
    pub fn load_with_api_url(api_url: Option<String>) -> Result<Self> {
        let mut config = Self::load()?;
        if let Some(url) = api_url {
            config.api_base_url = url;
            config.validate()?;
        }
        Ok(config)
    }

    /// The backend origin without a trailing slash.
    pub fn origin(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(())
        } else {
            anyhow::bail!(
                "api_base_url must start with http:// or https://, got {:?}",
                self.api_base_url
            )
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_coloured() -> bool {
    true
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/libris/config.toml
/// - macOS: ~/Library/Application Support/libris/config.toml
/// - Windows: %APPDATA%\libris\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("libris")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Libris Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (LIBRIS_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Origin of the library backend
#
# Book, alumni and team data is fetched from <origin>/api/...
# and cover images are served from <origin>/uploads/...
#
# Can also be set via:
# - CLI: libris --api-url http://library.example:3001 books list
# - Environment: LIBRIS_API_BASE_URL=http://library.example:3001
api_base_url = "http://localhost:3001"

[logging]
# trace, debug, info, warn or error
level = "info"
coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
