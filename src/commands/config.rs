use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

/// Project configuration, read from ventalytics.yaml
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the sales CSV the commands load by default
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Webhook endpoint for the push command
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Delivery timeout, seconds
    #[serde(default = "default_webhook_timeout_secs")]
    pub webhook_timeout_secs: u64,

    /// Days without a purchase before a customer counts as inactive
    #[serde(default = "default_customer_idle_days")]
    pub dias_clientes_inactivos: i64,

    /// Days without a sale before a product counts as stale
    #[serde(default = "default_product_idle_days")]
    pub dias_productos_sin_venta: i64,
}

fn default_data_path() -> String {
    "data/source.csv".to_string()
}

fn default_webhook_timeout_secs() -> u64 {
    60
}

fn default_customer_idle_days() -> i64 {
    90
}

fn default_product_idle_days() -> i64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            webhook_url: None,
            webhook_timeout_secs: default_webhook_timeout_secs(),
            dias_clientes_inactivos: default_customer_idle_days(),
            dias_productos_sin_venta: default_product_idle_days(),
        }
    }
}

/// Reads the configuration file from the specified path or looks for
/// ventalytics.yaml in the current directory. With no explicit path and no
/// file present, the defaults apply.
pub fn read_config(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let (path, explicit) = match config_path {
        Some(path) => (path, true),
        None => {
            let current_dir = std::env::current_dir().context("Cannot resolve current directory")?;
            (current_dir.join("ventalytics.yaml"), false)
        }
    };

    if !path.exists() {
        if explicit {
            return Err(anyhow!("Configuration file not found at: {}", path.display()));
        }
        return Ok(AppConfig::default());
    }

    let config_str = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read configuration: {}", path.display()))?;
    let config: AppConfig = serde_yaml::from_str(&config_str)
        .with_context(|| format!("Failed to parse configuration: {}", path.display()))?;

    Ok(config)
}
