use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Importer configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ImportConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whether to download the recipe image after a successful import
    #[serde(default = "default_download_image")]
    pub download_image: bool,
    /// Largest HTML body accepted, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Largest image accepted, in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            download_image: default_download_image(),
            max_body_bytes: default_max_body_bytes(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_download_image() -> bool {
    true
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_image_bytes() -> usize {
    5 * 1024 * 1024
}

impl ImportConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_IMPORT__ prefix
/// 2. recipe-import.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_IMPORT__TIMEOUT=10
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-import").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_IMPORT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
