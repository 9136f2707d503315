//! # iptv-harvest
//!
//! Scrapes a public IPTV channel listing, sorts the channels into
//! categories and writes ready-to-use playlists.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Parser → Detail resolver → Filter/Dedupe → Geo bypass → Renderer
//! ```
//!
//! - [`fetcher`]: HTTP client with retry and exponential backoff
//! - [`scraper`]: listing pagination, row parsing, detail page resolution
//! - [`domain`]: the [`Channel`](domain::Channel) model and its categorizer
//! - [`geo`]: proxy rewriting for geo-restricted streams
//! - [`render`]: M3U, JSON and README output
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape up to 5 pages, online channels only
//! iptv-harvest
//!
//! # Include offline channels, fetch through the configured proxy
//! iptv-harvest --all --proxy --pages 10
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together fetcher,
/// harvester, geo bypass and renderer.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/iptv-harvest/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Channel`](domain::Channel): one playable entry
/// - [`Category`](domain::Category): fixed category set with keyword rules
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for a single GET
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`RetryingFetcher`](fetcher::RetryingFetcher): retry with backoff
pub mod fetcher;

/// Geo-restricted stream handling and helper script generation.
pub mod geo;

/// Playlist, JSON index and README generation.
pub mod render;

/// Listing scraper and pipeline orchestration.
///
/// - [`Harvester`](scraper::Harvester): runs the whole scrape
/// - [`ChannelParser`](scraper::ChannelParser): listing rows to channels
/// - [`DetailResolver`](scraper::DetailResolver): stream URL from a detail page
pub mod scraper;
