use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the listing scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site root used to resolve relative links (default: https://iptvcat.com)
    pub base_url: String,

    /// First listing page (default: https://iptvcat.com/india)
    pub listing_url: String,

    /// Token a pagination link must contain (default: "india")
    pub region_token: String,

    /// Maximum listing pages to process (default: 5)
    pub max_pages: usize,

    /// Keep only channels marked online (default: true)
    pub only_online: bool,

    /// Pause between listing pages in milliseconds (default: 1000)
    pub page_delay_ms: u64,

    /// Pause between detail page lookups in milliseconds (default: 500)
    pub detail_delay_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://iptvcat.com".to_string(),
            listing_url: "https://iptvcat.com/india".to_string(),
            region_token: "india".to_string(),
            max_pages: 5,
            only_online: true,
            page_delay_ms: 1000,
            detail_delay_ms: 500,
        }
    }
}

impl ScraperConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn detail_delay(&self) -> Duration {
        Duration::from_millis(self.detail_delay_ms)
    }

    /// Referer sent with every request: the site root with a trailing slash.
    pub fn referer(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}
