pub mod cli;
pub mod core;
pub mod providers;

use crate::core::cache::RateCache;
use crate::core::config::AppConfig;
use crate::core::currency::Catalog;
use crate::core::resolver::RateResolver;
use crate::core::settings::{Language, Theme};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Convert {
        amount: f64,
        from: String,
        to: String,
    },
    Table {
        from: String,
        to: Vec<String>,
    },
    Currencies,
    ShowSettings,
    SetSettings {
        theme: Option<Theme>,
        language: Option<Language>,
    },
}

/// Builds a resolver with an empty cache and the HTTP providers from `config`.
pub fn build_resolver(config: &AppConfig) -> Result<RateResolver> {
    let client = providers::util::http_client(config.timeout())?;
    let provider_set = providers::default_provider_set(
        config.providers.exchange_rate_url(),
        config.providers.coingecko_url(),
        client,
    );

    Ok(
        RateResolver::new(Arc::new(Catalog::builtin()), RateCache::new(), provider_set)
            .with_timeout(config.timeout()),
    )
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("skyrate starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Convert { amount, from, to } => {
            let resolver = build_resolver(&config)?;
            cli::convert::run(&resolver, amount, &from, &to).await
        }
        AppCommand::Table { from, to } => {
            let resolver = build_resolver(&config)?;
            cli::table::run(&resolver, &from, &to).await
        }
        AppCommand::Currencies => {
            cli::currencies::run(Catalog::builtin().list());
            Ok(())
        }
        AppCommand::ShowSettings => {
            cli::settings::show(&config.settings_path()?);
            Ok(())
        }
        AppCommand::SetSettings { theme, language } => {
            cli::settings::set(&config.settings_path()?, theme, language).map(|_| ())
        }
    }
}
