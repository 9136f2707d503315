use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::Channel;
use crate::render::tvg::epg_tvg_id;

#[derive(Debug, Serialize)]
pub struct ChannelIndex<'a> {
    pub generated_at: String,
    pub total_channels: usize,
    pub epg_sources: &'a [String],
    pub categories: BTreeMap<&'static str, CategoryIndex<'a>>,
}

#[derive(Debug, Default, Serialize)]
pub struct CategoryIndex<'a> {
    pub count: usize,
    pub channels: Vec<IndexEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct IndexEntry<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub logo: &'a str,
    pub tvg_id: String,
    pub is_online: bool,
}

/// Group channels by category label; within a category the input order
/// is kept.
pub fn build_index<'a>(
    channels: &'a [Channel],
    epg_sources: &'a [String],
    generated_at: DateTime<Utc>,
) -> ChannelIndex<'a> {
    let mut categories: BTreeMap<&'static str, CategoryIndex<'a>> = BTreeMap::new();

    for channel in channels {
        let entry = categories.entry(channel.category.label()).or_default();
        entry.count += 1;
        entry.channels.push(IndexEntry {
            name: &channel.name,
            url: channel.stream_url(),
            logo: &channel.logo,
            tvg_id: epg_tvg_id(channel),
            is_online: channel.is_online,
        });
    }

    ChannelIndex {
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        total_channels: channels.len(),
        epg_sources,
        categories,
    }
}
