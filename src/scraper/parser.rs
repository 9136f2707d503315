//! Listing page parser.
//!
//! The listing has no stable schema, so each step is a cascade of
//! strategies tried in order until one yields something. A row that does
//! not fit is skipped; parsing a page never fails.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::app::Result;
use crate::domain::Channel;

/// Row locators, most specific first.
const ROW_SELECTORS: &[&str] = &["table tbody tr", ".channel-list tr", "tr"];

/// Substrings of an href that mark it as a playable stream.
const STREAM_HREF_TOKENS: &[&str] = &[".m3u8", ".ts", "stream", "live"];

static ROW_STRATEGIES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ROW_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("row selector should parse"))
        .collect()
});

static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("cell selector should parse"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("link selector should parse"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector should parse"));
static DATA_URL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[data-url]").expect("data-url selector should parse"));
static CLASSED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[class]").expect("class selector should parse"));
static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("img selector should parse"));

static STATUS_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)online|offline|status").expect("status pattern should compile")
});

/// Resolve `href` against `base`. Absolute http(s) URLs are kept verbatim so
/// that stream URLs compare equal to what the page published.
pub fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    base.join(href).ok().map(String::from)
}

/// Text of an element with each text fragment trimmed, joined by spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone)]
pub struct ChannelParser {
    base: Url,
}

impl ChannelParser {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: Url::parse(base_url)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Extract every channel candidate from a listing page.
    pub fn parse(&self, html: &str) -> Vec<Channel> {
        let document = Html::parse_document(html);

        let rows: Vec<ElementRef<'_>> = ROW_STRATEGIES
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|rows| !rows.is_empty())
            .unwrap_or_default();

        let channels: Vec<Channel> = rows.into_iter().filter_map(|row| self.parse_row(row)).collect();
        debug!("Parsed {} channel candidates", channels.len());
        channels
    }

    fn parse_row(&self, row: ElementRef<'_>) -> Option<Channel> {
        let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
        if cells.len() < 3 {
            return None;
        }

        let name_el = cells[0].select(&ANCHOR).next().unwrap_or(cells[0]);
        let name = element_text(name_el);

        let stream_url = self.find_stream_url(row, &cells);
        let detail_link = self.find_detail_link(row, &name);

        if name.is_empty() || (stream_url.is_none() && detail_link.is_none()) {
            return None;
        }

        let mut channel = Channel::new(name);
        channel.is_online = detect_online(row);
        if let Some(logo) = self.find_logo(row) {
            channel.logo = logo;
        }
        channel.stream_url = stream_url;
        channel.detail_link = detail_link;
        Some(channel)
    }

    fn find_stream_url(&self, row: ElementRef<'_>, cells: &[ElementRef<'_>]) -> Option<String> {
        let from_links = cells.iter().find_map(|cell| {
            cell.select(&LINK)
                .filter_map(|a| a.value().attr("href"))
                .find(|href| {
                    let href = href.to_lowercase();
                    STREAM_HREF_TOKENS.iter().any(|token| href.contains(token))
                })
                .and_then(|href| resolve_url(&self.base, href))
        });

        from_links.or_else(|| {
            row.select(&DATA_URL)
                .next()
                .and_then(|el| el.value().attr("data-url"))
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(String::from)
        })
    }

    fn find_detail_link(&self, row: ElementRef<'_>, name: &str) -> Option<String> {
        let hyphenated = name.to_lowercase().replace(' ', "-");
        row.select(&LINK)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| {
                let href = href.to_lowercase();
                href.contains("channel") || href.contains(&hyphenated)
            })
            .and_then(|href| resolve_url(&self.base, href))
    }

    fn find_logo(&self, row: ElementRef<'_>) -> Option<String> {
        let img = row.select(&IMAGE).next()?;
        let src = img
            .value()
            .attr("src")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| img.value().attr("data-src"))
            .filter(|s| !s.trim().is_empty())?;
        resolve_url(&self.base, src)
    }
}

/// Online unless a status marker says otherwise. Rows without any marker
/// are reported online.
fn detect_online(row: ElementRef<'_>) -> bool {
    let marker = row
        .select(&CLASSED)
        .find(|el| el.value().classes().any(|class| STATUS_CLASS.is_match(class)));

    match marker {
        Some(el) => {
            el.value().classes().any(|class| class == "online")
                || element_text(el).to_lowercase().contains("online")
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn parser() -> ChannelParser {
        ChannelParser::new("https://iptvcat.com").unwrap()
    }

    fn table(rows: &str) -> String {
        format!("<html><body><table><tbody>{rows}</tbody></table></body></html>")
    }

    #[test]
    fn test_parses_row_with_stream_link() {
        let html = table(
            r#"<tr>
                <td><a href="/india/star_plus">Star Plus</a></td>
                <td><span class="online">Online</span></td>
                <td><a href="https://cdn.example.com/starplus/index.m3u8">play</a></td>
            </tr>"#,
        );

        let channels = parser().parse(&html);
        assert_eq!(channels.len(), 1);
        let ch = &channels[0];
        assert_eq!(ch.name, "Star Plus");
        assert_eq!(ch.stream_url.as_deref(), Some("https://cdn.example.com/starplus/index.m3u8"));
        assert!(ch.is_online);
        assert_eq!(ch.category, Category::Entertainment);
        assert_eq!(ch.tvg_id, "starplus");
    }

    #[test]
    fn test_skips_short_rows_and_empty_names() {
        let html = table(
            r#"<tr><th>Name</th><th>Status</th><th>Link</th></tr>
               <tr><td>Only</td><td>two</td></tr>
               <tr><td></td><td>x</td><td><a href="https://x.example/live.m3u8">play</a></td></tr>"#,
        );
        assert!(parser().parse(&html).is_empty());
    }

    #[test]
    fn test_requires_stream_or_detail_link() {
        let html = table(r#"<tr><td>Mystery</td><td>?</td><td><a href="/about">about</a></td></tr>"#);
        assert!(parser().parse(&html).is_empty());
    }

    #[test]
    fn test_detail_link_is_resolved() {
        let html = table(
            r#"<tr>
                <td><a href="/india/sun-tv">Sun TV</a></td>
                <td>-</td>
                <td>-</td>
            </tr>"#,
        );
        let channels = parser().parse(&html);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].stream_url, None);
        assert_eq!(channels[0].detail_link.as_deref(), Some("https://iptvcat.com/india/sun-tv"));
        assert_eq!(channels[0].category, Category::RegionalTamil);
    }

    #[test]
    fn test_relative_stream_link_is_resolved() {
        let html = table(r#"<tr><td>Aaj Tak</td><td>-</td><td><a href="/stream/aajtak">go</a></td></tr>"#);
        let channels = parser().parse(&html);
        assert_eq!(channels[0].stream_url.as_deref(), Some("https://iptvcat.com/stream/aajtak"));
    }

    #[test]
    fn test_data_url_fallback() {
        let html = table(
            r#"<tr>
                <td>DD News</td>
                <td><button data-url="https://dd.example.com/news.m3u8">copy</button></td>
                <td>-</td>
            </tr>"#,
        );
        let channels = parser().parse(&html);
        assert_eq!(channels[0].stream_url.as_deref(), Some("https://dd.example.com/news.m3u8"));
    }

    #[test]
    fn test_offline_marker() {
        let html = table(
            r#"<tr>
                <td>Zee TV</td>
                <td><span class="status offline">Offline</span></td>
                <td><a href="https://z.example/live/zee.m3u8">play</a></td>
            </tr>"#,
        );
        assert!(!parser().parse(&html)[0].is_online);
    }

    #[test]
    fn test_status_text_marks_online() {
        let html = table(
            r#"<tr>
                <td>Zee TV</td>
                <td><span class="channel-status">ONLINE</span></td>
                <td><a href="https://z.example/live/zee.m3u8">play</a></td>
            </tr>"#,
        );
        assert!(parser().parse(&html)[0].is_online);
    }

    #[test]
    fn test_missing_marker_defaults_online() {
        let html = table(r#"<tr><td>Zee TV</td><td>-</td><td><a href="https://z.example/zee.m3u8">p</a></td></tr>"#);
        assert!(parser().parse(&html)[0].is_online);
    }

    #[test]
    fn test_logo_from_img_or_fallback() {
        let html = table(
            r#"<tr><td><img data-src="/logos/mtv.png">MTV</td><td>-</td><td><a href="https://m.example/mtv.m3u8">p</a></td></tr>
               <tr><td>Pogo</td><td>-</td><td><a href="https://p.example/pogo.m3u8">p</a></td></tr>"#,
        );
        let channels = parser().parse(&html);
        assert_eq!(channels[0].logo, "https://iptvcat.com/logos/mtv.png");
        assert_eq!(channels[1].logo, Channel::fallback_logo("Pogo"));
    }

    #[test]
    fn test_row_fallback_without_table_body() {
        let html = r#"<div class="channel-list"><table>
            <tr><td>Sony Six</td><td>-</td><td><a href="https://s.example/six.m3u8">p</a></td></tr>
        </table></div>"#;
        let channels = parser().parse(html);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Sony Six");
    }

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://iptvcat.com").unwrap();
        assert_eq!(
            resolve_url(&base, "https://other.example/a.m3u8").as_deref(),
            Some("https://other.example/a.m3u8")
        );
        assert_eq!(resolve_url(&base, "/india/2").as_deref(), Some("https://iptvcat.com/india/2"));
    }
}
