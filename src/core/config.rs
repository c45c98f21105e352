use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct YahooProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub yahoo: Option<YahooProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            yahoo: Some(YahooProviderConfig {
                base_url: "https://query1.finance.yahoo.com".to_string(),
            }),
        }
    }
}

/// Alert thresholds threaded explicitly into the rule and valuation logic,
/// so those stay pure functions with no ambient settings.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct AlertConfig {
    /// Maintenance ratio (%) below which the margin monitor alerts.
    #[serde(default = "default_maintenance_alert_pct")]
    pub maintenance_alert_pct: f64,
    /// CNN put/call reading at or below this cuts principal.
    #[serde(default = "default_cnn_cutoff")]
    pub cnn_cutoff: f64,
    /// CBOE equity put/call reading at or below this trims exposure.
    #[serde(default = "default_cboe_cutoff")]
    pub cboe_cutoff: f64,
}

fn default_maintenance_alert_pct() -> f64 {
    140.0
}

fn default_cnn_cutoff() -> f64 {
    0.62
}

fn default_cboe_cutoff() -> f64 {
    0.50
}

impl Default for AlertConfig {
    fn default() -> Self {
        AlertConfig {
            maintenance_alert_pct: default_maintenance_alert_pct(),
            cnn_cutoff: default_cnn_cutoff(),
            cboe_cutoff: default_cboe_cutoff(),
        }
    }
}

fn default_vix_symbol() -> String {
    "^VIX".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub currency: String,
    pub data_path: Option<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    /// Outstanding pledge loan balance; `--loan` overrides it per command.
    #[serde(default)]
    pub loan_amount: f64,
    #[serde(default = "default_vix_symbol")]
    pub vix_symbol: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "invctl", "invctl")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("io", "invctl", "invctl")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
