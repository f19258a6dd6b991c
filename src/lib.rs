pub mod cli;
pub mod core;

use crate::core::{Method, config::AppConfig};
use anyhow::Result;
use tracing::{debug, info};

/// Commands that run against a loaded configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Optimize {
        json: bool,
        method: Option<Method>,
    },
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("ProfitMax starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Optimize { json, method } => {
            let mut optimizer = config.optimizer.build()?;
            if let Some(method) = method {
                optimizer = optimizer.with_method(method);
            }
            cli::optimize::run(&config.products, &optimizer, &config.currency, json)
        }
    }
}
