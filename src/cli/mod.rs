pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "iptv-harvest")]
#[command(about = "Scrape IPTV channel listings into categorized playlists", long_about = None)]
pub struct Cli {
    /// Maximum listing pages to scrape (default from config: 5)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: Option<u32>,

    /// Include offline channels
    #[arg(long)]
    pub all: bool,

    /// Route every fetch through the configured proxy
    #[arg(long)]
    pub proxy: bool,

    /// Don't generate per-category playlists
    #[arg(long)]
    pub no_split: bool,

    /// Skip writing the Cloudflare Worker and Streamlink helper scripts
    #[arg(long)]
    pub no_cf_worker: bool,

    /// Directory for the README, helper scripts and the playlist folder
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Config file (default: ~/.config/iptv-harvest/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Fold flags into a loaded configuration; flags win.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(pages) = self.pages {
            config.scraper.max_pages = pages as usize;
        }
        if self.all {
            config.scraper.only_online = false;
        }
        if let Some(root) = &self.root {
            config.output.root_dir = root.clone();
        }
    }
}
