mod app;
mod components;
mod config;
mod data;
mod events;
mod theme;
mod utils;

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::app::App;
use crate::config::Config;
use crate::data::provider::ChainClient;
use crate::data::VaultService;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::parse();

    // Connect to the Ethereum node
    eprintln!("Connecting to {}...", config.rpc_url);
    let client = ChainClient::connect(&config.rpc_url, config.private_key.as_deref()).await?;
    let chain_id = client.chain_id();
    eprintln!("Connected to chain {chain_id}");

    // Create event channel
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // Send initial connected event
    let _ = event_tx.send(events::AppEvent::Connected(chain_id));

    // Create the vault service bound to the configured contract
    let service = Arc::new(VaultService::new(client, config.contract, event_tx));

    // Create app
    let mut app = App::with_service(service, event_rx, config.tick_rate_ms);

    // Initialize terminal
    let terminal = ratatui::init();
    let result = app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    result
}
