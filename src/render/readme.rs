use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::Channel;

/// Everything the README needs besides the channels themselves.
pub struct ReadmeContext<'a> {
    pub title: &'a str,
    /// Path of the main playlist as linked from the README
    pub main_playlist: &'a str,
    /// Category label → linked playlist path; categories missing here are
    /// listed without a link
    pub category_playlists: &'a BTreeMap<&'static str, String>,
    pub epg_sources: &'a [String],
    pub generated_at: DateTime<Utc>,
}

pub fn render_readme(channels: &[Channel], ctx: &ReadmeContext<'_>) -> String {
    let mut by_category: BTreeMap<&'static str, Vec<&str>> = BTreeMap::new();
    for channel in channels {
        by_category
            .entry(channel.category.label())
            .or_default()
            .push(&channel.name);
    }

    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", ctx.title));
    out.push_str(&format!(
        "**Auto-generated on:** {}\n\n",
        ctx.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("**Total Channels:** {}\n\n---\n\n", channels.len()));

    out.push_str("## Quick Links\n\n");
    out.push_str("| Playlist | Channels | Link |\n");
    out.push_str("|----------|----------|------|\n");
    out.push_str(&format!(
        "| All channels | {} | [{}]({}) |\n",
        channels.len(),
        file_name(ctx.main_playlist),
        ctx.main_playlist
    ));
    for (category, names) in &by_category {
        match ctx.category_playlists.get(category) {
            Some(path) => out.push_str(&format!(
                "| {} | {} | [{}]({}) |\n",
                category,
                names.len(),
                file_name(path),
                path
            )),
            None => out.push_str(&format!("| {} | {} | - |\n", category, names.len())),
        }
    }

    out.push_str("\n---\n\n## EPG (Electronic Programme Guide)\n\n");
    out.push_str("Add these EPG URLs to your player:\n\n");
    for source in ctx.epg_sources {
        out.push_str(&format!("- `{}`\n", source));
    }

    out.push_str("\n---\n\n## How to Use\n\n");
    out.push_str("### VLC Media Player\n");
    out.push_str("1. Open VLC → Media → Open Network Stream\n");
    out.push_str(&format!("2. Paste the raw URL of `{}`\n\n", file_name(ctx.main_playlist)));
    out.push_str("### IPTV Smarters / TiviMate / OTT Navigator\n");
    out.push_str("1. Add new playlist → M3U URL\n");
    out.push_str("2. Paste the raw URL of the playlist\n");
    if let Some(epg) = ctx.epg_sources.first() {
        out.push_str(&format!("3. Add EPG: `{}`\n", epg));
    }
    out.push('\n');
    out.push_str("### Kodi (PVR IPTV Simple Client)\n");
    out.push_str("1. Install the PVR IPTV Simple Client addon\n");
    out.push_str("2. Set the M3U URL and EPG URL in its settings\n\n");

    out.push_str("---\n\n## Geo-Blocked Channels\n\n");
    out.push_str(
        "Some channels may be geo-restricted. Deploy `docs/cloudflare_worker.js` and set \
         `CLOUDFLARE_WORKER_URL` (or `PROXY_URL`) before generating to route them through a proxy.\n\n",
    );

    out.push_str("---\n\n## Channel List\n\n");
    for (category, names) in &mut by_category {
        names.sort_unstable();
        out.push_str(&format!("### {}\n\n", category));
        for name in names.iter() {
            out.push_str(&format!("- {}\n", name));
        }
        out.push('\n');
    }

    out.push_str("---\n\n*This playlist is for personal use only. Refresh every 24 hours.*\n");
    out
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
