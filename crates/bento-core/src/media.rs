//! Media reference extraction from user-pasted URLs.
//!
//! Every function here is pure and total. An empty string means "no usable
//! identifier"; callers check for emptiness and show an invalid-URL state
//! instead of treating it as an error.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Length of a YouTube video id.
pub const YOUTUBE_ID_LEN: usize = 11;

fn youtube_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?:youtu\.be/|/embed/|/shorts/|/v/|/u/\w/|[?&]v=)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        )
        .expect("youtube pattern is valid")
    })
}

fn spotify_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:spotify\.com/track/|spotify:track:)([a-zA-Z0-9]+)")
            .expect("spotify pattern is valid")
    })
}

/// Extract the 11-character video id from `watch?v=`, `youtu.be/` and
/// `embed/` style URLs. Returns `""` when nothing matches.
///
/// The id must be exactly [`YOUTUBE_ID_LEN`] characters long and end at a
/// delimiter (`&`, `?`, `#`, `/`) or the end of the input.
#[must_use]
pub fn extract_youtube_id(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    youtube_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Extract the track id after `spotify.com/track/` or `spotify:track:`.
/// Returns `""` when nothing matches.
#[must_use]
pub fn extract_spotify_id(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    spotify_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Embeddable player URL for a YouTube video id.
#[must_use]
pub fn youtube_embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

/// Default thumbnail for a YouTube video id.
#[must_use]
pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}

/// Embeddable player URL for a Spotify track id.
#[must_use]
pub fn spotify_embed_url(track_id: &str) -> String {
    format!("https://open.spotify.com/embed/track/{track_id}")
}

/// Last non-empty path segment of an Instagram profile URL.
#[must_use]
pub fn instagram_username(url: &str) -> String {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .map(|segment| segment.split(['?', '#']).next().unwrap_or(segment))
        .unwrap_or_default()
        .to_string()
}

/// A link destination normalised for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Absolute URL including scheme.
    pub href: String,
    /// Host name shown next to the favicon.
    pub domain: String,
    /// Favicon service URL for the host.
    pub favicon_url: String,
}

/// Parse a pasted address as an `http`/`https` URL with a host. A missing
/// scheme becomes `https://`; any other explicit scheme is rejected.
fn web_url(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        // `example.com:8080/x` parses with `example.com` as its scheme.
        Ok(url) if url.scheme().contains('.') => Url::parse(&format!("https://{raw}")).ok()?,
        Ok(_) => return None,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{raw}")).ok()?
        }
        Err(_) => return None,
    };
    parsed.host_str().filter(|h| !h.is_empty())?;
    Some(parsed)
}

/// Address safe to place in an `href` or embed `src`: only web URLs pass,
/// so `javascript:` and `data:` payloads never become live links.
#[must_use]
pub fn safe_href(raw: &str) -> Option<String> {
    web_url(raw).map(String::from)
}

/// Normalise a pasted link. A missing scheme becomes `https://`.
/// Returns `None` for blank, unparseable or non-web input.
#[must_use]
pub fn link_target(raw: &str) -> Option<LinkTarget> {
    let parsed = web_url(raw)?;
    let domain = parsed.host_str()?.to_string();
    Some(LinkTarget {
        href: parsed.to_string(),
        favicon_url: format!("https://www.google.com/s2/favicons?domain={domain}&sz=128"),
        domain,
    })
}

/// Maps URL for a location: exact coordinates when both are known,
/// otherwise a search for the encoded location text.
#[must_use]
pub fn map_url(location: &str, latitude: Option<f64>, longitude: Option<f64>) -> String {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => format!("https://www.google.com/maps?q={lat},{lon}"),
        _ => format!(
            "https://www.google.com/maps/search/{}",
            urlencoding::encode(location)
        ),
    }
}

/// Placeholder image shown on a map card without its own map image.
#[must_use]
pub fn map_placeholder_image(location: &str) -> String {
    format!(
        "https://placehold.co/600x400/F6F9FF/9da4b0?text=Map+of+{}",
        urlencoding::encode(location)
    )
}
