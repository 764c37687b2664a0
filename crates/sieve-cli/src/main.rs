//! Sieve CLI Application
//!
//! Command-line interface for capturing pages and processing them through a
//! GTD inbox.

mod args;
mod cli;
mod handlers;
mod process;
mod renderer;
mod tab;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::ListItemsArgs;
use handlers::Cli;
use log::info;
use renderer::TerminalRenderer;
use sieve_core::ItemStoreBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let store = ItemStoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize item store")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Sieve started");

    let cli = Cli::new(store, renderer);
    match command {
        Some(Capture(args)) => cli.capture(args).await,
        Some(List(args)) => cli.list(&args.into()).await,
        Some(Show(args)) => cli.show(&args.into()).await,
        Some(Edit(args)) => cli.edit(&args.into()).await,
        Some(Delete(args)) => cli.delete(&args.into()).await,
        Some(Tags) => cli.tags().await,
        Some(Tag { command }) => cli.tag(command).await,
        Some(Counts) => cli.counts().await,
        Some(File(args)) => cli.file(args).await,
        Some(Process(args)) => cli.process(&args).await,
        Some(Announce(args)) => cli.announce(&args).await,
        None => cli.list(&ListItemsArgs::default().into()).await,
    }
}
