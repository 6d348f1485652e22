//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Everything has a sensible default except the picks file path.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub dashboard: DashboardConfig,
    pub picks: PicksConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PicksConfig {
    /// Path to the starting-prices CSV.
    pub file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Override the provider base URL (used for local stubs in tests).
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// IANA time zone name for the "last refreshed" timestamp.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

fn default_port() -> u16 {
    8080
}

fn default_title() -> String {
    "Fantasy Draft Order Tracker".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_time_zone() -> String {
    "America/New_York".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            title: default_title(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }
}
