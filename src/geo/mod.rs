//! Routing of geo-restricted streams through a user-supplied proxy.
//!
//! Nothing is rewritten unless an endpoint is configured, either in the
//! `[geo]` config section or through `CLOUDFLARE_WORKER_URL` / `PROXY_URL`.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::Result;
use crate::domain::Channel;

const CLOUDFLARE_WORKER_JS: &str = include_str!("../../assets/cloudflare_worker.js");
const STREAMLINK_SCRIPT: &str = include_str!("../../assets/play_channel.sh");

/// Configuration for geo-restricted streams
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    /// Deployed stream proxy worker, e.g. "https://iptv.you.workers.dev"
    pub worker_url: Option<String>,

    /// HTTP proxy able to forward streams via `/proxy?url=`
    pub proxy_url: Option<String>,

    /// Patterns (regex, matched against the lowercased URL) of hosts that
    /// only serve viewers in-region
    pub blocked_patterns: Vec<String>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            worker_url: None,
            proxy_url: None,
            blocked_patterns: [
                "hotstar",
                "jiocinema",
                "sonyliv",
                "zee5",
                "voot",
                "mxplayer",
                "erosnow",
                "altbalaji",
                r"discovery\+",
                "sunnxt",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyEndpoint {
    /// `<worker>/?url=<stream>`
    Worker(String),
    /// `<proxy>/proxy?url=<stream>`
    HttpProxy(String),
}

impl ProxyEndpoint {
    /// Worker wins over proxy. SOCKS proxies cannot forward a stream URL
    /// and are ignored here.
    pub fn from_config(config: &GeoConfig) -> Option<Self> {
        let non_empty = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from);

        if let Some(worker) = non_empty(&config.worker_url) {
            return Some(Self::Worker(worker));
        }
        non_empty(&config.proxy_url)
            .filter(|proxy| !proxy.contains("socks") && proxy.contains("http"))
            .map(Self::HttpProxy)
    }

    pub fn wrap(&self, url: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
        match self {
            Self::Worker(base) => format!("{}/?url={}", base.trim_end_matches('/'), encoded),
            Self::HttpProxy(base) => format!("{}/proxy?url={}", base.trim_end_matches('/'), encoded),
        }
    }
}

pub struct GeoBypass {
    endpoint: Option<ProxyEndpoint>,
    patterns: Vec<Regex>,
}

impl GeoBypass {
    pub fn new(config: &GeoConfig) -> Self {
        let patterns = config
            .blocked_patterns
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Ignoring invalid geo pattern {:?}: {}", p, e);
                    None
                }
            })
            .collect();

        Self {
            endpoint: ProxyEndpoint::from_config(config),
            patterns,
        }
    }

    pub fn endpoint(&self) -> Option<&ProxyEndpoint> {
        self.endpoint.as_ref()
    }

    pub fn is_geo_blocked(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        self.patterns.iter().any(|re| re.is_match(&lower))
    }

    /// Rewrite geo-blocked stream URLs through the endpoint. Order and
    /// membership of `channels` are unchanged.
    pub fn apply(&self, mut channels: Vec<Channel>) -> Vec<Channel> {
        let Some(endpoint) = &self.endpoint else {
            info!("No proxy configured. Geo-blocked channels will play directly.");
            info!("Set CLOUDFLARE_WORKER_URL or PROXY_URL to enable bypass.");
            return channels;
        };

        let mut modified = 0;
        for channel in &mut channels {
            let Some(url) = channel.stream_url.as_deref() else {
                continue;
            };
            if self.is_geo_blocked(url) {
                channel.stream_url = Some(endpoint.wrap(url));
                modified += 1;
            }
        }

        info!("Applied proxy to {} potentially geo-blocked channels", modified);
        channels
    }
}

/// Write the stream proxy worker and the Streamlink launcher under `root`.
pub fn write_helper_scripts(root: &Path) -> Result<Vec<PathBuf>> {
    let worker_path = root.join("docs").join("cloudflare_worker.js");
    let script_path = root.join("scripts").join("play_channel.sh");

    for (path, content) in [(&worker_path, CLOUDFLARE_WORKER_JS), (&script_path, STREAMLINK_SCRIPT)] {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755))?;
    }

    info!("Cloudflare Worker saved: {}", worker_path.display());
    info!("Streamlink script saved: {}", script_path.display());
    Ok(vec![worker_path, script_path])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_stream(name: &str, url: &str) -> Channel {
        let mut ch = Channel::new(name);
        ch.stream_url = Some(url.to_string());
        ch
    }

    #[test]
    fn test_geo_blocked_patterns() {
        let bypass = GeoBypass::new(&GeoConfig::default());
        assert!(bypass.is_geo_blocked("https://live.HOTSTAR.com/x.m3u8"));
        assert!(bypass.is_geo_blocked("https://cdn.discovery+.example/a"));
        assert!(!bypass.is_geo_blocked("https://cdn.discovery.example/a"));
        assert!(!bypass.is_geo_blocked("https://example.com/live.m3u8"));
    }

    #[test]
    fn test_endpoint_selection() {
        let mut config = GeoConfig::default();
        assert_eq!(ProxyEndpoint::from_config(&config), None);

        config.proxy_url = Some("socks5://me@host:1080".into());
        assert_eq!(ProxyEndpoint::from_config(&config), None);

        config.proxy_url = Some("http://proxy.example:8080".into());
        assert_eq!(
            ProxyEndpoint::from_config(&config),
            Some(ProxyEndpoint::HttpProxy("http://proxy.example:8080".into()))
        );

        config.worker_url = Some("https://w.example.workers.dev/".into());
        assert_eq!(
            ProxyEndpoint::from_config(&config),
            Some(ProxyEndpoint::Worker("https://w.example.workers.dev/".into()))
        );
    }

    #[test]
    fn test_wrap_encodes_target() {
        let worker = ProxyEndpoint::Worker("https://w.example/".into());
        assert_eq!(
            worker.wrap("https://a.example/x.m3u8?t=1&u=2"),
            "https://w.example/?url=https%3A%2F%2Fa.example%2Fx.m3u8%3Ft%3D1%26u%3D2"
        );

        let proxy = ProxyEndpoint::HttpProxy("http://p.example:8080".into());
        assert!(proxy.wrap("https://a.example/x").starts_with("http://p.example:8080/proxy?url="));
    }

    #[test]
    fn test_apply_without_endpoint_is_identity() {
        let channels = vec![with_stream("Star Plus", "https://hotstar.example/sp.m3u8")];
        let out = GeoBypass::new(&GeoConfig::default()).apply(channels.clone());
        assert_eq!(out, channels);
    }

    #[test]
    fn test_apply_rewrites_only_blocked() {
        let config = GeoConfig {
            worker_url: Some("https://w.example".into()),
            ..Default::default()
        };
        let channels = vec![
            with_stream("Star Plus", "https://hotstar.example/sp.m3u8"),
            with_stream("DD News", "https://dd.example/news.m3u8"),
        ];

        let out = GeoBypass::new(&config).apply(channels);
        assert!(out[0].stream_url().starts_with("https://w.example/?url="));
        assert_eq!(out[1].stream_url(), "https://dd.example/news.m3u8");
    }

    #[test]
    fn test_write_helper_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_helper_scripts(dir.path()).unwrap();

        assert_eq!(paths.len(), 2);
        let worker = fs::read_to_string(dir.path().join("docs/cloudflare_worker.js")).unwrap();
        assert!(worker.contains("addEventListener('fetch'"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(dir.path().join("scripts/play_channel.sh"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }
}
