use std::collections::HashMap;

use tracing::{error, info};

use crate::app::{AppContext, HarvestError, Result};
use crate::cli::Cli;
use crate::domain::{Category, Channel};
use crate::geo;

/// Scrape, apply the geo bypass and write every artifact.
pub async fn harvest(ctx: &AppContext, cli: &Cli) -> Result<Vec<Channel>> {
    info!("IPTV playlist generator starting");

    if !cli.no_cf_worker {
        info!("Generating geo-bypass helper scripts...");
        geo::write_helper_scripts(&ctx.config.output.root_dir)?;
    }

    info!("Scraping channels...");
    let report = ctx.harvester.run().await;
    if report.channels.is_empty() {
        error!("No channels found! Check the scraper or try again later.");
        return Err(HarvestError::NoChannels);
    }
    info!(
        "Scraped {} channels ({} candidates from {} pages)",
        report.channels.len(),
        report.candidates,
        report.pages_scraped
    );

    info!("Applying geo-bypass configuration...");
    let channels = ctx.geo.apply(report.channels);

    info!("Generating playlists...");
    let artifacts = ctx.renderer.render_all(&channels, !cli.no_split)?;

    print_summary(&channels);
    info!("Main playlist: {}", artifacts.playlist.display());
    for (category, path, count) in &artifacts.category_playlists {
        info!("  {:<30} {:>3} channels  {}", category.label(), count, path.display());
    }
    info!("JSON index: {}", artifacts.index.display());
    info!("README: {}", artifacts.readme.display());

    Ok(channels)
}

/// Channel count per category, largest first; ties by label.
pub fn category_counts(channels: &[Channel]) -> Vec<(Category, usize)> {
    let mut counts: HashMap<Category, usize> = HashMap::new();
    for channel in channels {
        *counts.entry(channel.category).or_default() += 1;
    }

    let mut counts: Vec<(Category, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.label().cmp(b.0.label())));
    counts
}

fn print_summary(channels: &[Channel]) {
    info!("Total channels: {}", channels.len());
    info!("By category:");
    for (category, count) in category_counts(channels) {
        info!("  {:<30} {:>3} channels", category.label(), count);
    }
}
