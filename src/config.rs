use anyhow::{Context, Result};
use serde::Deserialize;

/// Name of the optional config file (`fyyur.toml`, `fyyur.yaml`, ...) read
/// from the working directory.
const CONFIG_FILE: &str = "fyyur";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub log_format: LogFormat,
}

impl Config {
    /// Layered load: built-in defaults, then the config file, then
    /// environment variables (`DATABASE_URL`, `SERVER_PORT`, ...).
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("server_host", "0.0.0.0")?
            .set_default("server_port", 5000)?
            .set_default("log_format", "pretty")?
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        let config: Self = settings
            .try_deserialize()
            .context("DATABASE_URL must be set and SERVER_PORT must be a valid port number")?;

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
