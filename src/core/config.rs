use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::debug;

use super::golden_section::SearchConfig;
use super::optimizer::{DEFAULT_REFERENCE_DEMAND, Method, Optimizer};
use super::product::Product;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OptimizerSettings {
    #[serde(default)]
    pub method: Method,
    #[serde(default = "default_reference_demand")]
    pub reference_demand: f64,
    #[serde(default = "default_max_iters")]
    pub max_iters: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_reference_demand() -> f64 {
    DEFAULT_REFERENCE_DEMAND
}

fn default_max_iters() -> usize {
    SearchConfig::default().max_iters()
}

fn default_tolerance() -> f64 {
    SearchConfig::default().tolerance()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        OptimizerSettings {
            method: Method::default(),
            reference_demand: default_reference_demand(),
            max_iters: default_max_iters(),
            tolerance: default_tolerance(),
        }
    }
}

impl OptimizerSettings {
    /// Builds an [`Optimizer`] after validating the settings.
    pub fn build(&self) -> Result<Optimizer> {
        let search = SearchConfig::new(self.max_iters, self.tolerance)
            .context("Invalid optimizer search settings")?;
        Optimizer::new(self.method, self.reference_demand, search)
            .context("Invalid optimizer settings")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub products: Vec<Product>,
    #[serde(default)]
    pub optimizer: OptimizerSettings,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "profitmax", "profitmax")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!(products = config.products.len(), "Successfully loaded config");
        Ok(config)
    }
}
