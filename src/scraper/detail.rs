use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::fetcher::RetryingFetcher;
use crate::scraper::parser::resolve_url;

/// Substrings that make an assigned URL look like a stream.
const STREAM_TOKENS: &[&str] = &[".m3u8", "/live", "/stream", ".ts"];

static M3U8_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(https?://[^\s'"]+\.m3u8[^\s'"]*)"#).expect("m3u8 pattern should compile")
});

static ASSIGNED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:source|stream|url|src)["\s]*[:=]["\s]*(https?://[^\s'"]+)"#)
        .expect("assignment pattern should compile")
});

static SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("script selector should parse"));
static SOURCE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("video source, source").expect("source selector should parse")
});
static IFRAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("iframe").expect("iframe selector should parse"));

/// What a single detail page offers: a stream URL found directly, or
/// iframes that may embed one.
#[derive(Debug, Default, PartialEq)]
pub struct DetailScan {
    pub stream_url: Option<String>,
    pub iframes: Vec<String>,
}

/// First literal `.m3u8` URL in `text`, exactly as written.
pub fn find_m3u8(text: &str) -> Option<String> {
    M3U8_URL.captures(text).map(|caps| caps[1].to_string())
}

/// Search one script body: a literal `.m3u8` URL first, then a
/// `source|stream|url|src = "<url>"` binding that looks like a stream.
fn search_script(text: &str) -> Option<String> {
    find_m3u8(text).or_else(|| {
        ASSIGNED_URL
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .find(|url| STREAM_TOKENS.iter().any(|token| url.contains(token)))
    })
}

/// Scan a detail page without following anything.
pub fn scan_detail_page(html: &str, page_url: &str) -> DetailScan {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();
    let resolve = |src: &str| match &base {
        Some(base) => resolve_url(base, src),
        None => Some(src.to_string()),
    };

    let from_scripts = document.select(&SCRIPT).find_map(|script| {
        let text: String = script.text().collect();
        search_script(&text)
    });
    if from_scripts.is_some() {
        return DetailScan {
            stream_url: from_scripts,
            iframes: Vec::new(),
        };
    }

    let from_sources = document
        .select(&SOURCE)
        .filter_map(|tag| tag.value().attr("src"))
        .find(|src| !src.is_empty() && (src.contains("m3u8") || src.contains("stream")))
        .and_then(resolve);
    if from_sources.is_some() {
        return DetailScan {
            stream_url: from_sources,
            iframes: Vec::new(),
        };
    }

    let iframes = document
        .select(&IFRAME)
        .filter_map(|iframe| iframe.value().attr("src"))
        .filter(|src| !src.trim().is_empty())
        .filter_map(resolve)
        .collect();

    DetailScan {
        stream_url: None,
        iframes,
    }
}

/// Looks up the playable URL behind a channel's detail page.
#[derive(Clone)]
pub struct DetailResolver {
    fetcher: RetryingFetcher,
}

impl DetailResolver {
    pub fn new(fetcher: RetryingFetcher) -> Self {
        Self { fetcher }
    }

    /// Follows iframes one level deep; a miss is `None`, never an error.
    pub async fn resolve(&self, detail_url: &str) -> Option<String> {
        let html = self.fetcher.fetch_page(detail_url).await?;
        let scan = scan_detail_page(&html, detail_url);

        if scan.stream_url.is_some() {
            return scan.stream_url;
        }

        for src in scan.iframes {
            debug!("Following iframe {}", src);
            if let Some(body) = self.fetcher.fetch_page(&src).await {
                // iframe bodies are HTML
                if let Some(url) = find_m3u8(&body) {
                    return Some(decode_html_entities(&url).into_owned());
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::app::{HarvestError, Result};
    use crate::fetcher::{Fetcher, RetryPolicy};

    const PAGE: &str = "https://iptvcat.com/india/sun-tv";

    #[test]
    fn test_literal_m3u8_in_script() {
        let html = r#"<script>var player = setup({file: "https://cdn.example.com/sun/playlist.m3u8?token=1&x=2"});</script>"#;
        let scan = scan_detail_page(html, PAGE);
        assert_eq!(
            scan.stream_url.as_deref(),
            Some("https://cdn.example.com/sun/playlist.m3u8?token=1&x=2")
        );
    }

    #[test]
    fn test_script_url_is_not_entity_decoded() {
        let html = r#"<script>var src = "https://cdn.example.com/a.m3u8?t=1&amp;x=2";</script>"#;
        assert_eq!(
            scan_detail_page(html, PAGE).stream_url.as_deref(),
            Some("https://cdn.example.com/a.m3u8?t=1&amp;x=2")
        );
    }

    #[test]
    fn test_assignment_in_script() {
        let html = r#"<script>var stream = "https://edge.example.com/live/sun";</script>"#;
        assert_eq!(
            scan_detail_page(html, PAGE).stream_url.as_deref(),
            Some("https://edge.example.com/live/sun")
        );
    }

    #[test]
    fn test_assignment_without_stream_token_is_ignored() {
        let html = r#"<script>var url = "https://example.com/about";</script>"#;
        assert_eq!(scan_detail_page(html, PAGE), DetailScan::default());
    }

    #[test]
    fn test_video_source_tag() {
        let html = r#"<video><source src="/media/stream/sun.mp4"></video>"#;
        assert_eq!(
            scan_detail_page(html, PAGE).stream_url.as_deref(),
            Some("https://iptvcat.com/media/stream/sun.mp4")
        );
    }

    #[test]
    fn test_scripts_take_priority_over_sources() {
        let html = r#"<video><source src="https://a.example/stream.mp4"></video>
            <script>load("https://b.example/x.m3u8")</script>"#;
        assert_eq!(
            scan_detail_page(html, PAGE).stream_url.as_deref(),
            Some("https://b.example/x.m3u8")
        );
    }

    #[test]
    fn test_collects_iframes_when_nothing_else_matches() {
        let html = r#"<iframe src="/embed/sun"></iframe><iframe src=""></iframe>"#;
        let scan = scan_detail_page(html, PAGE);
        assert_eq!(scan.stream_url, None);
        assert_eq!(scan.iframes, vec!["https://iptvcat.com/embed/sun".to_string()]);
    }

    #[test]
    fn test_find_m3u8_in_raw_body() {
        let body = "#EXTM3U\nhttps://x.example/a/b.m3u8\n";
        assert_eq!(find_m3u8(body).as_deref(), Some("https://x.example/a/b.m3u8"));
        assert_eq!(find_m3u8("nothing here"), None);
    }

    /// Serves fixed bodies and records every requested URL.
    struct PageFetcher {
        pages: HashMap<&'static str, &'static str>,
        requested: Mutex<Vec<String>>,
    }

    impl PageFetcher {
        fn new(pages: &[(&'static str, &'static str)]) -> Arc<Self> {
            Arc::new(Self {
                pages: pages.iter().copied().collect(),
                requested: Mutex::new(Vec::new()),
            })
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for PageFetcher {
        async fn get(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .map(|body| body.to_string())
                .ok_or_else(|| HarvestError::Status {
                    status: 404,
                    url: url.to_string(),
                })
        }
    }

    fn resolver(fetcher: Arc<PageFetcher>) -> DetailResolver {
        DetailResolver::new(RetryingFetcher::new(
            fetcher,
            RetryPolicy {
                max_retries: 1,
                base_delay: Duration::ZERO,
            },
        ))
    }

    #[tokio::test]
    async fn test_follows_one_iframe() {
        let fetcher = PageFetcher::new(&[
            ("https://x.example/d", r#"<iframe src="/e1"></iframe>"#),
            ("https://x.example/e1", r#"<video src="https://s.example/b.m3u8?a=1&amp;b=2"></video>"#),
        ]);

        let url = resolver(fetcher.clone()).resolve("https://x.example/d").await;
        assert_eq!(url.as_deref(), Some("https://s.example/b.m3u8?a=1&b=2"));
        assert_eq!(fetcher.requested(), ["https://x.example/d", "https://x.example/e1"]);
    }

    #[tokio::test]
    async fn test_nested_iframes_are_not_followed() {
        let fetcher = PageFetcher::new(&[
            ("https://x.example/d", r#"<iframe src="/e1"></iframe>"#),
            ("https://x.example/e1", r#"<iframe src="/e2"></iframe>"#),
            ("https://x.example/e2", r#"<script>play("https://s.example/b.m3u8")</script>"#),
        ]);

        let url = resolver(fetcher.clone()).resolve("https://x.example/d").await;
        assert_eq!(url, None);
        assert_eq!(fetcher.requested(), ["https://x.example/d", "https://x.example/e1"]);
    }

    #[tokio::test]
    async fn test_unreachable_detail_page_is_a_miss() {
        let fetcher = PageFetcher::new(&[]);
        assert_eq!(resolver(fetcher).resolve("https://x.example/d").await, None);
    }
}
