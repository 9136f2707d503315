use serde::{Deserialize, Serialize};

use crate::domain::category::{categorize, Category};

pub const LOGO_FALLBACK_TEMPLATE: &str =
    "https://raw.githubusercontent.com/uddhavz/iptv-logos/main/logos/{slug}.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub stream_url: Option<String>,
    pub detail_link: Option<String>,
    pub is_online: bool,
    pub category: Category,
    pub logo: String,
    pub tvg_id: String,
}

impl Channel {
    /// Build a channel whose derived fields (category, tvg-id, fallback logo)
    /// come from `name` alone.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            category: categorize(&name),
            logo: Self::fallback_logo(&name),
            tvg_id: Self::make_tvg_id(&name),
            name,
            stream_url: None,
            detail_link: None,
            is_online: true,
        }
    }

    /// ASCII alphanumerics of the name, lowercased.
    pub fn make_tvg_id(name: &str) -> String {
        name.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }

    pub fn slugify(name: &str) -> String {
        let slug: String = name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        slug.trim_matches('-').to_string()
    }

    pub fn fallback_logo(name: &str) -> String {
        LOGO_FALLBACK_TEMPLATE.replace("{slug}", &Self::slugify(name))
    }

    pub fn has_stream(&self) -> bool {
        self.stream_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    pub fn stream_url(&self) -> &str {
        self.stream_url.as_deref().unwrap_or("")
    }
}
