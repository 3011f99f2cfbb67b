use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the catalog service and its terminal browser
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// SQLite connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Address the API server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the API, as seen by the client
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Fallback filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit log lines as JSON
    #[serde(default)]
    pub log_json: bool,

    /// Log destination while the terminal browser owns the screen
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_database_url() -> String {
    "sqlite://projetos.db".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_api_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "catalog-browse.log".to_string()
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Build a configuration from explicit key/value pairs instead of the process environment
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(pairs)?)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            bind_addr: default_bind_addr(),
            api_url: default_api_url(),
            log_level: default_log_level(),
            log_json: false,
            log_file: default_log_file(),
        }
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    dotenv().ok();

    Config::load()
}
