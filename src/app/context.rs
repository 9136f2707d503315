use std::sync::Arc;

use crate::app::{HarvestError, Result};
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher, RetryPolicy, RetryingFetcher};
use crate::geo::GeoBypass;
use crate::render::PlaylistRenderer;
use crate::scraper::Harvester;

pub struct AppContext {
    pub config: Config,
    pub harvester: Harvester,
    pub geo: GeoBypass,
    pub renderer: PlaylistRenderer,
}

impl AppContext {
    /// Wire the HTTP stack from `config`. `use_proxy` routes every fetch
    /// through `fetch.proxy`, which must then be set.
    pub fn new(config: Config, use_proxy: bool) -> Result<Self> {
        let proxy = if use_proxy {
            let proxy = config.fetch.proxy.as_deref().ok_or_else(|| {
                HarvestError::Config(
                    "--proxy requires fetch.proxy in the config file or HARVEST_PROXY".into(),
                )
            })?;
            Some(proxy)
        } else {
            None
        };

        let http = HttpFetcher::new(&config.fetch, &config.scraper.referer(), proxy)?;
        Self::with_fetcher(config, Arc::new(http))
    }

    /// Wire everything around an existing fetcher.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let retrying = RetryingFetcher::new(fetcher, RetryPolicy::from_config(&config.fetch));
        let harvester = Harvester::new(retrying, config.scraper.clone())?;
        let geo = GeoBypass::new(&config.geo);
        let renderer = PlaylistRenderer::new(config.output.clone());

        Ok(Self {
            config,
            harvester,
            geo,
            renderer,
        })
    }
}
