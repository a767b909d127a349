//! CLI command handlers.

mod admin;
mod carousel;
mod generate;
mod stats;

use anyhow::{Result, bail};
use url::Url;

use crate::app_config::FileConfig;

pub use admin::{run_preview_sheet_command, run_publish_channel_command, run_publish_sheet_command};
pub use carousel::{run_play_command, run_render_command};
pub use generate::run_generate_command;
pub use stats::run_stats_command;

/// The content host: the `--host` flag, else config `host`.
fn content_host(flag: Option<&Url>, config: &FileConfig) -> Result<Url> {
    match flag.or(config.host.as_ref()) {
        Some(host) => Ok(host.clone()),
        None => bail!("No content host configured. Pass --host or set `host` in the config file"),
    }
}
