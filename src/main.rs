//! CLI entry point for the recognitions tool.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

mod app_config;
mod cli;
mod commands;

use app_config::{VerbositySetting, load_file_config};
use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let loaded_config = load_file_config(args.config.as_deref())?;
    let config = loaded_config.file_config();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => config.verbosity.map_or("info", VerbositySetting::level),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, config_path = ?loaded_config.path, "CLI arguments parsed");
    info!("Recognitions starting");

    match &args.command {
        Command::Generate(generate) => commands::run_generate_command(generate, &config).await,
        Command::Render(render) => commands::run_render_command(render, &config).await,
        Command::Play(play) => commands::run_play_command(play, &config).await,
        Command::Stats(stats) => commands::run_stats_command(stats, &config).await,
        Command::PreviewSheet(sheet) => commands::run_preview_sheet_command(sheet, &config).await,
        Command::PublishSheet(sheet) => commands::run_publish_sheet_command(sheet, &config).await,
        Command::PublishChannel(channel) => {
            commands::run_publish_channel_command(channel, &config).await
        }
    }
}
