// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

mod config;
mod console;
mod convert;
mod db;
mod error;
mod log;
mod menu;
mod models;
mod validation;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use db::{CurrencyStore, SqliteStore};
use menu::App;
use std::{env, path::PathBuf};

#[derive(Parser)]
#[command(version, about = "Convert amounts between currencies and manage their exchange rates")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database URL, overrides the config file and CURRENCY_CONVERTER_DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    /// Write a default configuration file and exit
    #[arg(long)]
    init_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    log::init_logging(cli.verbose);

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    if cli.init_config {
        return init_config(&config_path);
    }

    let config = config::load_config(&config_path)?
        .with_database_url(cli.database_url, env::var(config::DATABASE_URL_ENV).ok());

    let store = SqliteStore::connect(&config.database)
        .await
        .context("Could not open the currency database")?;

    let mut app = App::new(store);
    let result = session(&mut app, &config).await;
    app.into_store().close().await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "currency converter failed");
    }
    result
}

/// Everything between opening and closing the store
async fn session(app: &mut App<SqliteStore>, config: &Config) -> Result<()> {
    db::seed_if_empty(app.store(), &config.seed).await?;
    app.reload().await?;
    if app.cache().is_empty() {
        tracing::warn!("currency table is empty, create a currency with [c] first");
    }
    tracing::info!(count = app.cache().len(), "loaded currencies");

    let mut console = console::stdio();
    app.run(&mut console).await?;
    Ok(())
}

fn init_config(path: &std::path::Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    let default_config = Config {
        seed: vec![
            config::SeedCurrency { code: "USD".to_string(), rate: 1.0 },
            config::SeedCurrency { code: "EUR".to_string(), rate: 0.9 },
        ],
        ..Config::default()
    };
    config::save_config(&default_config, path)?;

    println!("Created default configuration at {}", path.display());
    Ok(())
}
