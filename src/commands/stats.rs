//! Stats command: per-sheet recognitions statistics.

use anyhow::{Result, bail};
use recognitions_core::carousel::{Clock, SystemClock};
use recognitions_core::fetch::HttpClient;
use recognitions_core::stats::collect_stats;

use super::content_host;
use crate::app_config::FileConfig;
use crate::cli::StatsArgs;

pub async fn run_stats_command(args: &StatsArgs, config: &FileConfig) -> Result<()> {
    let host = content_host(args.host.host.as_ref(), config)?;
    let client = HttpClient::new();
    let report = collect_stats(&client, &host, &args.sheets, SystemClock.now()).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_summary());
    }

    if report.sheets.is_empty() {
        bail!("None of the {} sheet(s) could be loaded", args.sheets.len());
    }
    Ok(())
}
