//! Listing scraper: discovers pages, parses channel rows, resolves missing
//! stream URLs and reduces the result to unique playable channels.
//!
//! # Architecture
//!
//! ```text
//! Listing page → pagination → (page → parser → detail resolver)* → filter → dedupe
//! ```
//!
//! Everything runs sequentially. One page, including all of its detail
//! lookups, is finished before the next page is fetched, and output order is
//! the order channels were first seen.
//!
//! # Usage
//!
//! ```rust,ignore
//! use iptv_harvest::scraper::{Harvester, ScraperConfig};
//!
//! let harvester = Harvester::new(fetcher, ScraperConfig::default())?;
//! let report = harvester.run().await;
//! ```

mod config;
pub mod detail;
pub mod pagination;
pub mod parser;

pub use config::ScraperConfig;
pub use detail::DetailResolver;
pub use parser::ChannelParser;

use std::collections::HashSet;

use tracing::{debug, info};

use crate::app::Result;
use crate::domain::Channel;
use crate::fetcher::RetryingFetcher;

/// Outcome of one harvest run
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Listing pages that were fetched successfully
    pub pages_scraped: usize,
    /// Channel candidates parsed before filtering
    pub candidates: usize,
    /// Unique playable channels, in first-seen order
    pub channels: Vec<Channel>,
}

pub struct Harvester {
    fetcher: RetryingFetcher,
    parser: ChannelParser,
    resolver: DetailResolver,
    config: ScraperConfig,
}

impl Harvester {
    pub fn new(fetcher: RetryingFetcher, config: ScraperConfig) -> Result<Self> {
        let parser = ChannelParser::new(&config.base_url)?;
        let resolver = DetailResolver::new(fetcher.clone());
        Ok(Self {
            fetcher,
            parser,
            resolver,
            config,
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Listing pages to process, capped at `max_pages`. If the listing page
    /// itself cannot be fetched, only the listing URL is returned.
    pub async fn discover_pages(&self) -> Vec<String> {
        let mut pages = match self.fetcher.fetch_page(&self.config.listing_url).await {
            Some(html) => pagination::extract_page_links(
                &html,
                self.parser.base(),
                &self.config.listing_url,
                &self.config.region_token,
            ),
            None => vec![self.config.listing_url.clone()],
        };
        pages.truncate(self.config.max_pages);
        pages
    }

    /// Fetch and parse one listing page, then fill in stream URLs from
    /// detail pages. `None` when the page could not be fetched.
    pub async fn scrape_page(&self, url: &str) -> Option<Vec<Channel>> {
        let html = self.fetcher.fetch_page(url).await?;
        let mut channels = self.parser.parse(&html);
        info!("  Found {} channels on this page", channels.len());

        let mut first_lookup = true;
        for channel in channels.iter_mut().filter(|c| c.stream_url.is_none()) {
            let Some(detail_link) = channel.detail_link.clone() else {
                continue;
            };

            if !first_lookup {
                tokio::time::sleep(self.config.detail_delay()).await;
            }
            first_lookup = false;

            debug!("  Fetching stream for: {}", channel.name);
            channel.stream_url = self.resolver.resolve(&detail_link).await;
        }

        Some(channels)
    }

    pub async fn run(&self) -> HarvestReport {
        info!("Starting scrape of {}", self.config.listing_url);
        let pages = self.discover_pages().await;

        let mut all_channels = Vec::new();
        let mut pages_scraped = 0;

        for (i, page_url) in pages.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.config.page_delay()).await;
            }

            info!("Scraping page {}/{}: {}", i + 1, pages.len(), page_url);
            if let Some(channels) = self.scrape_page(page_url).await {
                pages_scraped += 1;
                all_channels.extend(channels);
            }
        }

        let candidates = all_channels.len();
        let filtered = filter_channels(all_channels, self.config.only_online);
        if self.config.only_online {
            info!("Filtered to {} online channels (from {})", filtered.len(), candidates);
        }

        let channels = dedupe_by_stream(filtered);
        info!("Final unique channels: {}", channels.len());

        HarvestReport {
            pages_scraped,
            candidates,
            channels,
        }
    }
}

/// Keep channels with a stream URL, and when `only_online` is set, only
/// those marked online.
pub fn filter_channels(channels: Vec<Channel>, only_online: bool) -> Vec<Channel> {
    channels
        .into_iter()
        .filter(|c| c.has_stream() && (!only_online || c.is_online))
        .collect()
}

/// Drop channels whose stream URL was already seen. Stable: the first
/// occurrence wins and order is preserved.
pub fn dedupe_by_stream(channels: Vec<Channel>) -> Vec<Channel> {
    let mut seen = HashSet::new();
    channels
        .into_iter()
        .filter(|c| seen.insert(c.stream_url().to_string()))
        .collect()
}
