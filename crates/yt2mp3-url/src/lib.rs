use regex::Regex;
use url::Url;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// What a YouTube link points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YoutubeLink {
    Video { id: String },
    Playlist { list: String },
    /// A watch link carrying a `list` parameter.
    VideoInPlaylist { id: String, list: String },
}

pub fn classify(input: &str) -> Option<YoutubeLink> {
    let url = Url::parse(input.trim()).ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let list = query_value(&url, "list");

    let id = match host {
        "youtu.be" => url
            .path_segments()?
            .next()
            .filter(|segment| is_video_id(segment))
            .map(str::to_string),
        "youtube.com" | "music.youtube.com" => {
            if url.path() == "/watch" {
                query_value(&url, "v").filter(|id| is_video_id(id))
            } else {
                parse_path_video_id(url.path())
            }
        }
        _ => return None,
    };

    match (id, list) {
        (Some(id), Some(list)) => Some(YoutubeLink::VideoInPlaylist { id, list }),
        (Some(id), None) => Some(YoutubeLink::Video { id }),
        (None, Some(list)) => Some(YoutubeLink::Playlist { list }),
        (None, None) => None,
    }
}

/// Turns what an operator pastes into something yt-dlp takes as a URL: a
/// bare video id becomes a watch link, and a link without a scheme gets
/// `https://`. Anything already carrying a scheme (`ytsearch:` included) is
/// returned trimmed.
pub fn normalize_link(input: &str) -> String {
    let input = input.trim();
    if is_video_id(input) {
        return watch_url(input);
    }
    if Url::parse(input).is_ok() {
        return input.to_string();
    }
    let with_scheme = format!("https://{}", input.trim_start_matches('/'));
    if Url::parse(&with_scheme).is_ok_and(|url| url.host_str().is_some_and(|host| host.contains('.'))) {
        return with_scheme;
    }
    input.to_string()
}

pub fn is_video_id(value: &str) -> bool {
    value.len() == 11
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

pub fn watch_url(id: &str) -> String {
    format!("{WATCH_URL}{id}")
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

fn parse_path_video_id(path: &str) -> Option<String> {
    let regex = Regex::new(r"^/(?:shorts|embed|live|v)/([A-Za-z0-9_-]{11})(?:[/?]|$)").ok()?;
    let captures = regex.captures(path)?;
    captures.get(1).map(|m| m.as_str().to_string())
}
