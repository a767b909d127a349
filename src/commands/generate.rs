//! Generate command: crawl pages into an offline bundle.

use std::path::PathBuf;

use anyhow::{Context, Result};
use recognitions_core::crawler::Generator;
use recognitions_core::fetch::HttpClient;
use tracing::{info, warn};

use super::content_host;
use crate::app_config::FileConfig;
use crate::cli::GenerateArgs;

pub async fn run_generate_command(args: &GenerateArgs, config: &FileConfig) -> Result<()> {
    let host = content_host(args.host.host.as_ref(), config)?;
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let max_depth = match args.max_depth {
        Some(depth) => usize::try_from(depth).context("max_depth out of range for usize")?,
        None => config.max_depth_or_default(),
    };

    let mut generator = Generator::new(HttpClient::new(), host, &output_dir).with_max_depth(max_depth);
    if let Some(image_host) = args.image_host.clone().or_else(|| config.image_host.clone()) {
        generator = generator.with_image_host(image_host);
    }

    let manifest = generator.generate_all(&args.paths).await;
    if manifest.is_empty() {
        warn!(pages = args.paths.len(), "No assets collected");
    }

    if let Some(path) = &args.manifest {
        manifest
            .write_json(path)
            .await
            .with_context(|| format!("Failed to write manifest '{}'", path.display()))?;
        info!(path = %path.display(), assets = manifest.len(), "Manifest written");
    }

    for asset in &manifest {
        println!("{asset}");
    }
    Ok(())
}
