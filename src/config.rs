// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `database.url`
pub const DATABASE_URL_ENV: &str = "CURRENCY_CONVERTER_DATABASE_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    /// Currencies inserted when the table is empty on startup
    pub seed: Vec<SeedCurrency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://currencyconverter.db".to_string(),
            create_if_missing: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedCurrency {
    pub code: String,
    pub rate: f64,
}

impl Config {
    /// Apply the database URL overrides. The command line wins over the environment.
    pub fn with_database_url(mut self, cli_url: Option<String>, env_url: Option<String>) -> Self {
        if let Some(url) = cli_url.or(env_url).filter(|url| !url.trim().is_empty()) {
            self.database.url = url;
        }
        self
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// Load the config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

pub fn save_config(config: &Config, path: &Path) -> anyhow::Result<()> {
    let config_str = toml::to_string_pretty(config)?;
    fs::write(path, config_str)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}
