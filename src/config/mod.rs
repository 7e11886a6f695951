use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub site: SiteConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub visitors: VisitorsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VisitorsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Days of per-day history to keep (0 = keep everything).
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for VisitorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            retention_days: default_retention_days(),
        }
    }
}

fn default_pool_size() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_retention_days() -> u32 {
    365
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!(
                "Could not read config file '{}': {}. Are you in a Signpost site directory?",
                path.display(),
                e
            )
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.pool_size == 0 {
            anyhow::bail!("database.pool_size must be greater than 0");
        }
        if self.database.pool_size > 100 {
            anyhow::bail!("database.pool_size must be 100 or less");
        }
        if self.visitors.retention_days > 3650 {
            anyhow::bail!("visitors.retention_days must be 3650 or less");
        }
        Ok(())
    }
}
