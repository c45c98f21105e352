pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::advisor::SentimentReadings;
use crate::core::cache::Cache;
use crate::core::config::AppConfig;
use crate::core::price::Quote;
use anyhow::Result;
use chrono::NaiveDate;
use providers::yahoo_finance::YahooQuoteProvider;
use std::sync::Arc;
use store::csv::CsvStore;
use tracing::{debug, info};

/// Library-level commands, decoupled from the clap surface in `main`.
pub enum AppCommand {
    Advise { cnn: f64, cboe: f64 },
    Margin { loan: Option<f64> },
    Performance { loan: Option<f64> },
    Positions(PositionsCommand),
    Trades(TradesCommand),
    Capital(CapitalCommand),
    Rules(RulesCommand),
}

pub enum PositionsCommand {
    List,
    Set { symbol: String, quantity: f64 },
    Remove { symbol: String },
}

pub enum TradesCommand {
    List,
    Add {
        date: Option<NaiveDate>,
        symbol: String,
        action: String,
        price: Option<f64>,
        quantity: Option<f64>,
        amount: f64,
        note: Option<String>,
    },
}

pub enum CapitalCommand {
    List,
    Add {
        date: Option<NaiveDate>,
        kind: String,
        amount: f64,
        note: Option<String>,
    },
}

pub enum RulesCommand {
    List,
    Add { threshold: f64, action: String },
    Remove { index: usize },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Invest Command starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = CsvStore::new(config.default_data_path()?);

    let quote_cache = Arc::new(Cache::<String, Quote>::new());
    let base_url = config
        .providers
        .yahoo
        .as_ref()
        .map_or("https://query1.finance.yahoo.com", |p| &p.base_url);
    let provider = YahooQuoteProvider::new(base_url, Arc::clone(&quote_cache));

    match command {
        AppCommand::Advise { cnn, cboe } => {
            cli::advise::run(&config, &store, &provider, SentimentReadings { cnn, cboe }).await
        }
        AppCommand::Margin { loan } => cli::margin::run(&config, &store, &provider, loan).await,
        AppCommand::Performance { loan } => {
            cli::performance::run(&config, &store, &provider, loan).await
        }
        AppCommand::Positions(cmd) => match cmd {
            PositionsCommand::List => cli::positions::list(&store),
            PositionsCommand::Set { symbol, quantity } => {
                cli::positions::set(&store, &symbol, quantity)
            }
            PositionsCommand::Remove { symbol } => cli::positions::remove(&store, &symbol),
        },
        AppCommand::Trades(cmd) => match cmd {
            TradesCommand::List => cli::trades::list(&store),
            TradesCommand::Add {
                date,
                symbol,
                action,
                price,
                quantity,
                amount,
                note,
            } => cli::trades::add(&store, date, &symbol, &action, price, quantity, amount, note),
        },
        AppCommand::Capital(cmd) => match cmd {
            CapitalCommand::List => cli::capital::list(&store),
            CapitalCommand::Add {
                date,
                kind,
                amount,
                note,
            } => cli::capital::add(&store, date, &kind, amount, note),
        },
        AppCommand::Rules(cmd) => match cmd {
            RulesCommand::List => cli::rules::list(&store),
            RulesCommand::Add { threshold, action } => cli::rules::add(&store, threshold, &action),
            RulesCommand::Remove { index } => cli::rules::remove(&store, index),
        },
    }
}
