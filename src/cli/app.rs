//! Sample configs loaded by the CLI

use anyhow::Result;
use configer::{Config, EnvKey};
use serde::{Deserialize, Serialize};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub log: LogConfig,
    pub environment: String,
    pub ids: Vec<i64>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: String,
}

impl Config for AppConfig {
    const ENV_KEYS: &'static [EnvKey] = &[
        EnvKey::new("NAME", "name"),
        EnvKey::new("LOG_LEVEL", "log.level"),
        EnvKey::new("LOG_FILE", "log.file"),
        EnvKey::new("ENVIRONMENT", "environment"),
        EnvKey::new("IDS", "ids"),
    ];

    fn validate(&self) -> Result<()> {
        let level = self.log.level.to_ascii_lowercase();
        if !level.is_empty() && !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "\"LOG_LEVEL\" must be one of {}; got {:?}",
                LOG_LEVELS.join(", "),
                self.log.level
            );
        }
        Ok(())
    }
}

/// Static file server settings; address and directory are required.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub server: ServerConfig,
    pub directory: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub port: i64,
}

impl Config for FileServerConfig {
    const ENV_KEYS: &'static [EnvKey] = &[
        EnvKey::new("SERVER_ADDR", "server.addr"),
        EnvKey::new("SERVER_PORT", "server.port"),
        EnvKey::new("DIRECTORY", "directory"),
    ];

    fn validate(&self) -> Result<()> {
        if self.server.addr.is_empty() {
            anyhow::bail!("missing required config variable \"SERVER_ADDR\"");
        }
        if self.directory.is_empty() {
            anyhow::bail!("missing required config variable \"DIRECTORY\"");
        }
        if !(1..=65535).contains(&self.server.port) {
            anyhow::bail!("\"SERVER_PORT\" must be between 1 and 65535");
        }
        Ok(())
    }
}
