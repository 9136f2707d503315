use crate::domain::Channel;
use crate::render::{sorted_for_playlist, tvg::epg_tvg_id};

/// Render an extended M3U playlist, grouped by category with a separator
/// comment before each group. Channels without a stream URL are skipped.
pub fn render_m3u(channels: &[Channel], epg_sources: &[String]) -> String {
    let mut out = String::from("#EXTM3U");
    if let Some(primary) = epg_sources.first() {
        out.push_str(&format!(" x-tvg-url=\"{}\"", primary));
    }
    if let Some(secondary) = epg_sources.get(1) {
        out.push_str(&format!(" url-tvg=\"{}\"", secondary));
    }
    out.push_str(" refresh=\"3600\"\n");

    let mut current = None;
    for channel in sorted_for_playlist(channels) {
        if !channel.has_stream() {
            continue;
        }

        if current != Some(channel.category) {
            out.push_str(&format!("\n# ═══ {} ═══\n", channel.category));
            current = Some(channel.category);
        }

        out.push_str(&format!(
            "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}\n",
            epg_tvg_id(channel),
            channel.name,
            channel.logo,
            channel.category,
            channel.name
        ));
        out.push_str(channel.stream_url());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(name: &str, url: &str) -> Channel {
        let mut ch = Channel::new(name);
        ch.stream_url = Some(url.to_string());
        ch
    }

    #[test]
    fn test_header_and_entries() {
        let epg = vec!["https://epg.one/a.xml.gz".to_string(), "https://epg.two/b.xml".to_string()];
        let channels = vec![channel("Sun TV", "https://s.example/sun.m3u8"), channel("Aaj Tak", "https://a.example/at.m3u8")];

        let m3u = render_m3u(&channels, &epg);
        let lines: Vec<&str> = m3u.lines().collect();

        assert_eq!(
            lines[0],
            r#"#EXTM3U x-tvg-url="https://epg.one/a.xml.gz" url-tvg="https://epg.two/b.xml" refresh="3600""#
        );
        // News sorts before Regional - Tamil
        assert_eq!(lines[2], "# ═══ News ═══");
        assert!(lines[3].starts_with(r#"#EXTINF:-1 tvg-id="AajTak.in" tvg-name="Aaj Tak""#));
        assert!(lines[3].ends_with(r#"group-title="News",Aaj Tak"#));
        assert_eq!(lines[4], "https://a.example/at.m3u8");
        assert_eq!(lines[6], "# ═══ Regional - Tamil ═══");
        assert_eq!(lines[8], "https://s.example/sun.m3u8");
    }

    #[test]
    fn test_one_separator_per_category() {
        let channels = vec![
            channel("Zee News", "https://z/1.m3u8"),
            channel("Aaj Tak", "https://a/1.m3u8"),
        ];
        let m3u = render_m3u(&channels, &[]);
        assert_eq!(m3u.matches("# ═══ News ═══").count(), 1);
        assert!(m3u.starts_with("#EXTM3U refresh=\"3600\"\n"));
        // sorted by name within the category
        assert!(m3u.find("Aaj Tak").unwrap() < m3u.find("Zee News").unwrap());
    }
}
