//! Admin commands: sheet preview, sheet publish, channel publish.

use anyhow::{Result, bail};
use recognitions_core::admin::{
    AdminClient, AdminTarget, WorkflowReport, preview_sheet, publish_channel, publish_sheet,
};
use recognitions_core::fetch::HttpClient;

use crate::app_config::FileConfig;
use crate::cli::{AdminRepoArgs, ChannelArgs, SheetActionArgs};

pub async fn run_preview_sheet_command(args: &SheetActionArgs, config: &FileConfig) -> Result<()> {
    let (admin, target) = admin_client(&args.repo, config);
    let report = preview_sheet(&admin, &target, &args.edit_url).await?;
    print_report(&report);
    Ok(())
}

pub async fn run_publish_sheet_command(args: &SheetActionArgs, config: &FileConfig) -> Result<()> {
    let (admin, target) = admin_client(&args.repo, config);
    let prod_host = prod_host(&args.repo, config)?;
    let report = publish_sheet(&admin, &target, &args.edit_url, &prod_host).await?;
    print_report(&report);
    Ok(())
}

pub async fn run_publish_channel_command(args: &ChannelArgs, config: &FileConfig) -> Result<()> {
    let (admin, target) = admin_client(&args.repo, config);
    let prod_host = prod_host(&args.repo, config)?;
    let report = publish_channel(&admin, &target, &args.web_path, &prod_host).await?;
    print_report(&report);
    Ok(())
}

fn admin_client(args: &AdminRepoArgs, config: &FileConfig) -> (AdminClient, AdminTarget) {
    let mut admin = AdminClient::new(HttpClient::new());
    if let Some(base) = args.admin_base.clone().or_else(|| config.admin_base.clone()) {
        admin = admin.with_base(base);
    }
    let target = AdminTarget::new(&args.owner, &args.repo, &args.git_ref);
    (admin, target)
}

fn prod_host(args: &AdminRepoArgs, config: &FileConfig) -> Result<String> {
    match args.prod_host.clone().or_else(|| config.prod_host.clone()) {
        Some(host) => Ok(host),
        None => bail!("No production host configured. Pass --prod-host or set `prod_host`"),
    }
}

fn print_report(report: &WorkflowReport) {
    for (action, path) in &report.actions {
        println!("{action} {path}");
    }
    println!("open {}", report.redirect);
}
