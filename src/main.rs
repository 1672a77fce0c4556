//! src/main.rs

use anyhow::Result;
use clap::Parser;

mod assistant;
mod cli;
mod commands;
mod config;
mod errors;
mod fallback;
mod format;
mod hotspots;
mod intent;
mod llm;
mod models;
mod payment;
mod prompt;
mod stats;
mod store;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        pretty_env_logger::formatted_builder()
            .parse_filters("homemate=warn")
            .init();
    } else {
        pretty_env_logger::init();
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::handle_init().await?,
        Commands::Add { record } => commands::records::handle_add(record).await?,
        Commands::List { since, json } => commands::records::handle_list(since, json).await?,
        Commands::Update { id, record } => commands::records::handle_update(id, record).await?,
        Commands::Delete { id, yes } => commands::records::handle_delete(id, yes).await?,
        Commands::Import { file } => commands::records::handle_import(&file).await?,
        Commands::Stats { json } => commands::stats::handle_stats(json).await?,
        Commands::Chat { message, stream } => commands::chat::handle_chat(message, stream).await?,
        Commands::Hotspots { timeframe, json } => {
            commands::hotspots::handle_hotspots(timeframe, json).await?
        }
        Commands::Pay { plan } => commands::pay::handle_pay(plan).await?,
        Commands::Notify { body } => commands::pay::handle_notify(body).await?,
    }

    Ok(())
}
