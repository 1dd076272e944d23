pub mod cli;
pub mod converter;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::converter::{ConvertRequest, CurrencyConverter, RateRequest};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Currencies,
    Base,
    Convert {
        from: String,
        to: String,
        amount: f64,
        accuracy: Option<u32>,
    },
    Rate {
        from: String,
        to: String,
        accuracy: Option<u32>,
    },
    Metadata {
        currency: Option<String>,
    },
}

/// Per-invocation overrides on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub base_currency: Option<String>,
    pub json: bool,
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    options: &RunOptions,
) -> Result<()> {
    info!("eurofx starting...");

    let mut config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load_or_default()?,
    };
    if let Some(base) = &options.base_currency {
        config.base_currency = base.clone();
    }
    debug!("Loaded config: {config:#?}");

    let converter = CurrencyConverter::from_config(&config);

    match command {
        AppCommand::Currencies => cli::currencies::run(&converter, options.json).await,
        AppCommand::Base => cli::currencies::run_base(&converter, options.json).await,
        AppCommand::Convert {
            from,
            to,
            amount,
            accuracy,
        } => {
            let request = ConvertRequest {
                from_currency: from,
                to_currency: to,
                amount,
                accuracy,
            };
            cli::convert::run(&converter, &request, options.json).await
        }
        AppCommand::Rate { from, to, accuracy } => {
            let request = RateRequest {
                from_currency: from,
                to_currency: to,
                accuracy,
            };
            cli::convert::run_rate(&converter, &request, options.json).await
        }
        AppCommand::Metadata { currency } => {
            cli::metadata::run(&converter, currency.as_deref(), options.json).await
        }
    }
}
