mod app;
mod cli;
mod client;
mod config;
mod loader;
mod manifest;
mod state;
mod ui;
mod validation;
mod views;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::ManifestClient;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // The viewer logs freely; CLI output must stay clean on stdout
    let default_filter = if cli.command.is_some() {
        cli.output.default_log_filter()
    } else {
        "poemshelf=debug,info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Some(command) => {
            if let Err(e) = cli::run(command, &cli.output, cli.base_url).await {
                cli::print_error(&format!("{:#}", e));
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_viewer(cli.base_url),
    }
}

fn run_viewer(base_url: Option<String>) -> Result<()> {
    tracing::info!("Starting Poemshelf viewer");

    let config = Config::load_or_default();

    let base_url = base_url.unwrap_or_else(|| config.source.base_url.clone());
    let client = ManifestClient::new(&base_url)?;
    tracing::info!("Reading poems from {}", client.base());

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([720.0, 640.0])
        .with_min_inner_size([420.0, 360.0])
        .with_title("Poemshelf");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Poemshelf",
        native_options,
        Box::new(|cc| Ok(Box::new(app::PoemshelfApp::new(cc, config, client)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
