use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::scraper::parser::resolve_url;

static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("link selector should parse"));

static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+").expect("numeric segment pattern should compile"));

/// Listing pages linked from `html`, with `listing_url` always first.
///
/// A link counts as a page when its href mentions `region_token` and
/// either "page" or a numeric path segment.
pub fn extract_page_links(html: &str, base: &Url, listing_url: &str, region_token: &str) -> Vec<String> {
    let mut pages = vec![listing_url.to_string()];
    let region_token = region_token.to_lowercase();
    let document = Html::parse_document(html);

    for href in document.select(&LINK).filter_map(|a| a.value().attr("href")) {
        let lower = href.to_lowercase();
        if !lower.contains(&region_token) {
            continue;
        }
        if !(lower.contains("page") || NUMERIC_SEGMENT.is_match(href)) {
            continue;
        }
        if let Some(full) = resolve_url(base, href) {
            if !pages.contains(&full) {
                pages.push(full);
            }
        }
    }

    pages
}
