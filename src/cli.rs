//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use url::Url;

use crate::app_config::MAX_DEPTH_LIMIT;

/// Render recognitions carousels and build offline screen bundles.
///
/// Reads published pages and sheets from a Franklin content host, renders
/// and plays carousels, crawls pages into an offline asset manifest, and
/// drives the admin API for sheet preview and publishing.
#[derive(Parser, Debug)]
#[command(name = "recognitions")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crawl pages and write an offline bundle and asset manifest
    Generate(GenerateArgs),
    /// Build a page's carousel and print the track markup
    Render(CarouselArgs),
    /// Build a page's carousel and play it, logging each slide
    Play(PlayArgs),
    /// Print statistics for recognitions sheets
    Stats(StatsArgs),
    /// Preview a sheet and its channel page
    PreviewSheet(SheetActionArgs),
    /// Publish a sheet that is already live
    PublishSheet(SheetActionArgs),
    /// Publish a channel page and its sheet
    PublishChannel(ChannelArgs),
}

/// Content host selection shared by subcommands.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct HostArgs {
    /// Content host (overrides config `host`)
    #[arg(long, value_name = "URL")]
    pub host: Option<Url>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    /// Root-relative page paths to crawl
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub host: HostArgs,

    /// Directory for `.html` / `.plain.html` snapshots
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Deepest fragment nesting that is still crawled
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_DEPTH_LIMIT as u64))]
    pub max_depth: Option<u64>,

    /// Host probed for profile photos
    #[arg(long, value_name = "URL")]
    pub image_host: Option<Url>,

    /// Write the combined manifest as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CarouselArgs {
    /// Root-relative path of the page carrying the carousel
    #[arg(value_name = "PATH")]
    pub page: String,

    #[command(flatten)]
    pub host: HostArgs,

    /// Dashboard shown as an iframe when no items are found
    #[arg(long, value_name = "URL")]
    pub fallback_url: Option<Url>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub carousel: CarouselArgs,

    /// Number of playback steps before exiting
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=10_000))]
    pub steps: u64,

    /// Override the slide duration in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub duration: Option<u64>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StatsArgs {
    /// Root-relative sheet paths (e.g. /content/org-a/recognitions.json)
    #[arg(required = true, value_name = "SHEET")]
    pub sheets: Vec<String>,

    #[command(flatten)]
    pub host: HostArgs,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Repository coordinates for admin API calls.
#[derive(ClapArgs, Debug, Clone)]
pub struct AdminRepoArgs {
    /// Repository owner
    #[arg(long)]
    pub owner: String,

    /// Repository name
    #[arg(long)]
    pub repo: String,

    /// Branch
    #[arg(long = "ref", default_value = "main")]
    pub git_ref: String,

    /// Admin API endpoint (overrides config `admin_base`)
    #[arg(long, value_name = "URL")]
    pub admin_base: Option<Url>,

    /// Production host for redirects (overrides config `prod_host`)
    #[arg(long)]
    pub prod_host: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SheetActionArgs {
    /// Editor URL of the sheet
    #[arg(value_name = "EDIT_URL")]
    pub edit_url: String,

    #[command(flatten)]
    pub repo: AdminRepoArgs,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ChannelArgs {
    /// Root-relative path of the channel page
    #[arg(value_name = "PATH")]
    pub web_path: String,

    #[command(flatten)]
    pub repo: AdminRepoArgs,
}
