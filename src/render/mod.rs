//! Artifact rendering: playlists, JSON index and README.
//!
//! Rendering is pure string building ([`m3u`], [`index`], [`readme`]);
//! [`PlaylistRenderer`] decides where the results land on disk.

pub mod index;
pub mod m3u;
pub mod readme;
pub mod tvg;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::Result;
use crate::domain::{Category, Channel};

pub use index::build_index;
pub use m3u::render_m3u;
pub use readme::{render_readme, ReadmeContext};

/// Public programme-guide feeds for Indian channels.
pub const DEFAULT_EPG_SOURCES: &[&str] = &[
    "https://epgshare01.online/epgshare01/epg_ripper_IN1.xml.gz",
    "https://www.open-epg.com/files/india1.xml",
    "https://raw.githubusercontent.com/iptv-org/epg/gh-pages/guides/in.epg.xml",
    "https://raw.githubusercontent.com/azimjon-95/tvgraber/main/in.xml",
];

/// Configuration for generated artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the README and helper scripts are written to (default: ".")
    pub root_dir: PathBuf,

    /// Playlist directory, relative to `root_dir` (default: "output")
    pub output_dir: String,

    /// Prefix for playlist file names (default: "india")
    pub playlist_prefix: String,

    /// README heading
    pub title: String,

    /// EPG feeds advertised in playlists and docs
    pub epg_sources: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            output_dir: "output".to_string(),
            playlist_prefix: "india".to_string(),
            title: "India IPTV Playlist".to_string(),
            epg_sources: DEFAULT_EPG_SOURCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Paths written by one [`PlaylistRenderer::render_all`] call.
#[derive(Debug, Default)]
pub struct RenderedArtifacts {
    pub playlist: PathBuf,
    pub category_playlists: Vec<(Category, PathBuf, usize)>,
    pub index: PathBuf,
    pub readme: PathBuf,
}

/// Channels ordered by category label, then name.
pub(crate) fn sorted_for_playlist(channels: &[Channel]) -> Vec<&Channel> {
    let mut sorted: Vec<&Channel> = channels.iter().collect();
    sorted.sort_by(|a, b| {
        a.category
            .label()
            .cmp(b.category.label())
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
}

/// File-name-safe form of a category label: word characters, hyphens and
/// spaces kept, spaces turned into underscores, lowercased.
pub fn category_file_stem(category: Category) -> String {
    category
        .label()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == ' ')
        .collect::<String>()
        .trim()
        .replace(' ', "_")
        .to_lowercase()
}

pub struct PlaylistRenderer {
    config: OutputConfig,
}

impl PlaylistRenderer {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn output_path(&self) -> PathBuf {
        self.config.root_dir.join(&self.config.output_dir)
    }

    fn main_playlist_name(&self) -> String {
        format!("{}_iptv.m3u", self.config.playlist_prefix)
    }

    fn category_playlist_name(&self, category: Category) -> String {
        format!("{}_{}.m3u", self.config.playlist_prefix, category_file_stem(category))
    }

    /// Link to a playlist as seen from the README in `root_dir`.
    fn link(&self, file: &str) -> String {
        format!("{}/{}", self.config.output_dir.trim_end_matches('/'), file)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn write_m3u(&self, channels: &[Channel], filename: &str) -> Result<PathBuf> {
        let path = self.output_path().join(filename);
        self.write(&path, &render_m3u(channels, &self.config.epg_sources))?;
        info!("M3U playlist saved: {} ({} channels)", path.display(), channels.len());
        Ok(path)
    }

    /// One playlist per category, in category label order.
    pub fn write_m3u_by_category(&self, channels: &[Channel]) -> Result<Vec<(Category, PathBuf, usize)>> {
        let mut groups: BTreeMap<&'static str, (Category, Vec<Channel>)> = BTreeMap::new();
        for channel in channels {
            groups
                .entry(channel.category.label())
                .or_insert_with(|| (channel.category, Vec::new()))
                .1
                .push(channel.clone());
        }

        let mut files = Vec::new();
        for (category, members) in groups.into_values() {
            let filename = self.category_playlist_name(category);
            let path = self.write_m3u(&members, &filename)?;
            info!("  {}: {} channels → {}", category, members.len(), filename);
            files.push((category, path, members.len()));
        }
        Ok(files)
    }

    pub fn write_json_index(&self, channels: &[Channel], generated_at: DateTime<Utc>) -> Result<PathBuf> {
        let path = self.output_path().join("channels.json");
        let index = build_index(channels, &self.config.epg_sources, generated_at);
        self.write(&path, &serde_json::to_string_pretty(&index)?)?;
        info!("JSON index saved: {}", path.display());
        Ok(path)
    }

    /// README in `root_dir`. Category rows link to their playlist only when
    /// per-category playlists were written.
    pub fn write_readme(
        &self,
        channels: &[Channel],
        with_category_links: bool,
        generated_at: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let category_playlists: BTreeMap<&'static str, String> = if with_category_links {
            channels
                .iter()
                .map(|c| (c.category.label(), self.link(&self.category_playlist_name(c.category))))
                .collect()
        } else {
            BTreeMap::new()
        };

        let main_playlist = self.link(&self.main_playlist_name());
        let content = render_readme(
            channels,
            &ReadmeContext {
                title: &self.config.title,
                main_playlist: &main_playlist,
                category_playlists: &category_playlists,
                epg_sources: &self.config.epg_sources,
                generated_at,
            },
        );

        let path = self.config.root_dir.join("README.md");
        self.write(&path, &content)?;
        info!("README saved: {}", path.display());
        Ok(path)
    }

    /// Write every artifact. Called once the channel set is final.
    pub fn render_all(&self, channels: &[Channel], split_by_category: bool) -> Result<RenderedArtifacts> {
        let generated_at = Utc::now();

        let playlist = self.write_m3u(channels, &self.main_playlist_name())?;
        let category_playlists = if split_by_category {
            self.write_m3u_by_category(channels)?
        } else {
            Vec::new()
        };
        let index = self.write_json_index(channels, generated_at)?;
        let readme = self.write_readme(channels, split_by_category, generated_at)?;

        Ok(RenderedArtifacts {
            playlist,
            category_playlists,
            index,
            readme,
        })
    }
}
