//! Widget content model.
//!
//! Every widget kind has exactly one content shape. [`WidgetContent`] is the
//! sum of those shapes plus [`WidgetContent::Unknown`], which carries payloads
//! whose discriminant this build does not know (or whose JSON could not be
//! read at all) so they round-trip untouched and render as a placeholder.
//!
//! There are two ways in:
//! - [`validate_content`] is strict and used on the authoring path. Missing
//!   required fields are a [`ContentError`].
//! - [`WidgetContent::coerce`] is lenient and total. It is the single read
//!   path for persisted data, filling absent optional fields and upgrading
//!   legacy field names.

use crate::error::ContentError;
use crate::media;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Discriminant of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// External link with a label.
    Link,
    /// Social network profile.
    Social,
    /// Free text block.
    Text,
    /// One or more images.
    Image,
    /// Location with an optional static map.
    Map,
    /// Spotify track.
    Spotify,
    /// YouTube video.
    Youtube,
    /// Instagram profile.
    Instagram,
    /// Quotation with attribution.
    Quote,
    /// GitHub profile.
    Github,
    /// Booking calendar.
    Calendar,
}

impl WidgetKind {
    /// Every supported kind, in the order offered to authoring forms.
    pub const ALL: [Self; 11] = [
        Self::Link,
        Self::Social,
        Self::Text,
        Self::Image,
        Self::Map,
        Self::Spotify,
        Self::Youtube,
        Self::Instagram,
        Self::Quote,
        Self::Github,
        Self::Calendar,
    ];

    /// The persisted discriminant string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Social => "social",
            Self::Text => "text",
            Self::Image => "image",
            Self::Map => "map",
            Self::Spotify => "spotify",
            Self::Youtube => "youtube",
            Self::Instagram => "instagram",
            Self::Quote => "quote",
            Self::Github => "github",
            Self::Calendar => "calendar",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ContentError::UnsupportedKind(s.to_string()))
    }
}

/// A follower/view/post count that legacy data stores as either a number or
/// a preformatted string ("12.3k").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Count {
    /// Plain number
    Number(u64),
    /// Preformatted text
    Text(String),
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// `link` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkContent {
    /// Destination URL (required)
    pub url: String,
    /// Visible label; falls back to the URL
    pub label: String,
    /// Icon name hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl LinkContent {
    /// Create link content.
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            icon: None,
        }
    }
}

/// `social` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialContent {
    /// Platform name, e.g. "instagram"
    pub platform: String,
    /// Handle without the leading `@`
    pub username: String,
    /// Profile URL; derived from platform and username when blank
    pub url: String,
    /// Short blurb
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Button text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<String>,
    /// Icon name hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl SocialContent {
    /// Create social content; the URL is derived on normalisation.
    pub fn new(platform: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            username: username.into(),
            ..Self::default()
        }
    }
}

/// `text` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextContent {
    /// Body text, may be empty
    pub text: String,
}

impl TextContent {
    /// Create text content.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// `image` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageContent {
    /// Image URLs; the first one is displayed
    pub images: Vec<String>,
    /// Per-image captions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub captions: Vec<String>,
    /// Alt text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ImageContent {
    /// Single-image content.
    pub fn single(src: impl Into<String>) -> Self {
        Self {
            images: vec![src.into()],
            ..Self::default()
        }
    }

    /// The displayed image, if any non-blank URL exists.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        self.images
            .iter()
            .map(String::as_str)
            .find(|src| !src.trim().is_empty())
    }
}

/// `map` content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapContent {
    /// Place name (required)
    pub location: String,
    /// Free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Street address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Latitude in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Static map image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_image_url: Option<String>,
}

/// `spotify` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpotifyContent {
    /// Pasted track URL (required)
    pub url: String,
    /// Track id; empty when the URL is not a track URL
    pub track_id: String,
    /// Embeddable player URL
    pub embed_url: String,
    /// Track title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    /// Artist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    /// Cover art
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_art_url: Option<String>,
}

impl SpotifyContent {
    /// Content for a pasted track URL; ids are derived on normalisation.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// `youtube` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YoutubeContent {
    /// Pasted video URL (required)
    pub url: String,
    /// Video id; empty when the URL is not a video URL
    pub video_id: String,
    /// Thumbnail image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Channel name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    /// View count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<Count>,
}

impl YoutubeContent {
    /// Content for a pasted video URL; the id is derived on normalisation.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// `instagram` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstagramContent {
    /// Profile URL (required)
    pub url: String,
    /// Handle; derived from the URL when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Avatar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,
    /// Number of posts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<Count>,
    /// Number of followers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<Count>,
}

/// `quote` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteContent {
    /// Quotation (required)
    pub text: String,
    /// Attribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// `github` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GithubContent {
    /// Account name (required)
    pub username: String,
    /// Profile URL; derived from the username when blank
    pub url: String,
    /// Public repositories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_count: Option<Count>,
    /// Followers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<Count>,
}

/// `calendar` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarContent {
    /// Booking page (required)
    pub booking_url: String,
    /// Provider name, e.g. "calendly"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_type: Option<String>,
    /// Single-letter weekday markers that are bookable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_days: Option<Vec<String>>,
    /// Offered time slots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slots: Option<Vec<String>>,
    /// IANA timezone label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Event title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
}

/// Content payload of a widget, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetContent {
    /// `link`
    Link(LinkContent),
    /// `social`
    Social(SocialContent),
    /// `text`
    Text(TextContent),
    /// `image`
    Image(ImageContent),
    /// `map`
    Map(MapContent),
    /// `spotify`
    Spotify(SpotifyContent),
    /// `youtube`
    Youtube(YoutubeContent),
    /// `instagram`
    Instagram(InstagramContent),
    /// `quote`
    Quote(QuoteContent),
    /// `github`
    Github(GithubContent),
    /// `calendar`
    Calendar(CalendarContent),
    /// A discriminant this build cannot interpret, kept verbatim.
    Unknown {
        /// Persisted `type` string
        kind: String,
        /// Persisted `content` value
        raw: Value,
    },
}

impl WidgetContent {
    /// The kind, or `None` for [`WidgetContent::Unknown`].
    #[must_use]
    pub const fn kind(&self) -> Option<WidgetKind> {
        Some(match self {
            Self::Link(_) => WidgetKind::Link,
            Self::Social(_) => WidgetKind::Social,
            Self::Text(_) => WidgetKind::Text,
            Self::Image(_) => WidgetKind::Image,
            Self::Map(_) => WidgetKind::Map,
            Self::Spotify(_) => WidgetKind::Spotify,
            Self::Youtube(_) => WidgetKind::Youtube,
            Self::Instagram(_) => WidgetKind::Instagram,
            Self::Quote(_) => WidgetKind::Quote,
            Self::Github(_) => WidgetKind::Github,
            Self::Calendar(_) => WidgetKind::Calendar,
            Self::Unknown { .. } => return None,
        })
    }

    /// The persisted `type` string.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Unknown { kind, .. } => kind,
            other => other.kind().map_or("", WidgetKind::as_str),
        }
    }

    /// Lenient read of persisted content. Never fails: unknown
    /// discriminants and unreadable payloads become [`WidgetContent::Unknown`].
    #[must_use]
    pub fn coerce(type_name: &str, raw: Value) -> Self {
        let Ok(kind) = type_name.parse::<WidgetKind>() else {
            return Self::Unknown {
                kind: type_name.to_string(),
                raw,
            };
        };
        let value = match upgrade_legacy(kind, raw.clone()) {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        match Self::from_value(kind, value) {
            Ok(content) => content.normalized(),
            Err(err) => {
                tracing::warn!(kind = %kind, error = %err, "unreadable widget content kept verbatim");
                Self::Unknown {
                    kind: type_name.to_string(),
                    raw,
                }
            }
        }
    }

    /// Typed read of `value` as the content shape of `kind`.
    pub fn from_value(kind: WidgetKind, value: Value) -> Result<Self, ContentError> {
        fn read<T: DeserializeOwned>(kind: WidgetKind, value: Value) -> Result<T, ContentError> {
            serde_json::from_value(value).map_err(|source| ContentError::Malformed { kind, source })
        }

        Ok(match kind {
            WidgetKind::Link => Self::Link(read(kind, value)?),
            WidgetKind::Social => Self::Social(read(kind, value)?),
            WidgetKind::Text => Self::Text(read(kind, value)?),
            WidgetKind::Image => Self::Image(read(kind, value)?),
            WidgetKind::Map => Self::Map(read(kind, value)?),
            WidgetKind::Spotify => Self::Spotify(read(kind, value)?),
            WidgetKind::Youtube => Self::Youtube(read(kind, value)?),
            WidgetKind::Instagram => Self::Instagram(read(kind, value)?),
            WidgetKind::Quote => Self::Quote(read(kind, value)?),
            WidgetKind::Github => Self::Github(read(kind, value)?),
            WidgetKind::Calendar => Self::Calendar(read(kind, value)?),
        })
    }

    /// Persisted JSON form of the payload.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let value = match self {
            Self::Link(c) => serde_json::to_value(c),
            Self::Social(c) => serde_json::to_value(c),
            Self::Text(c) => serde_json::to_value(c),
            Self::Image(c) => serde_json::to_value(c),
            Self::Map(c) => serde_json::to_value(c),
            Self::Spotify(c) => serde_json::to_value(c),
            Self::Youtube(c) => serde_json::to_value(c),
            Self::Instagram(c) => serde_json::to_value(c),
            Self::Quote(c) => serde_json::to_value(c),
            Self::Github(c) => serde_json::to_value(c),
            Self::Calendar(c) => serde_json::to_value(c),
            Self::Unknown { raw, .. } => return raw.clone(),
        };
        value.unwrap_or_default()
    }

    /// Fill fields that can be derived from others: media ids from pasted
    /// URLs, profile URLs from usernames.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        match &mut self {
            Self::Social(c) => {
                if c.url.trim().is_empty() && !c.platform.is_empty() && !c.username.is_empty() {
                    c.url = format!(
                        "https://{}.com/{}",
                        c.platform.to_lowercase(),
                        c.username.trim_start_matches('@')
                    );
                }
            }
            Self::Spotify(c) => {
                if c.track_id.is_empty() {
                    c.track_id = media::extract_spotify_id(&c.url);
                }
                if c.embed_url.is_empty() && !c.track_id.is_empty() {
                    c.embed_url = media::spotify_embed_url(&c.track_id);
                }
            }
            Self::Youtube(c) => {
                if c.video_id.is_empty() {
                    c.video_id = media::extract_youtube_id(&c.url);
                }
            }
            Self::Instagram(c) => {
                if c.username.is_none() {
                    let derived = media::instagram_username(&c.url);
                    if !derived.is_empty() {
                        c.username = Some(derived);
                    }
                }
            }
            Self::Github(c) => {
                if c.url.trim().is_empty() && !c.username.is_empty() {
                    c.url = format!("https://github.com/{}", c.username);
                }
            }
            Self::Link(_)
            | Self::Text(_)
            | Self::Image(_)
            | Self::Map(_)
            | Self::Quote(_)
            | Self::Calendar(_)
            | Self::Unknown { .. } => {}
        }
        self
    }

    /// Check required fields of typed content.
    pub fn validate(&self) -> Result<(), ContentError> {
        fn require(kind: WidgetKind, field: &'static str, value: &str) -> Result<(), ContentError> {
            if value.trim().is_empty() {
                Err(ContentError::MissingField { kind, field })
            } else {
                Ok(())
            }
        }

        fn in_range(
            kind: WidgetKind,
            field: &'static str,
            value: Option<f64>,
            limit: f64,
        ) -> Result<(), ContentError> {
            match value {
                Some(v) if !(-limit..=limit).contains(&v) => Err(ContentError::InvalidField {
                    kind,
                    field,
                    message: format!("{v} is outside -{limit}..={limit}"),
                }),
                _ => Ok(()),
            }
        }

        match self {
            Self::Link(c) => require(WidgetKind::Link, "url", &c.url),
            Self::Social(c) => {
                require(WidgetKind::Social, "platform", &c.platform)?;
                require(WidgetKind::Social, "username", &c.username)
            }
            Self::Text(_) => Ok(()),
            Self::Image(c) => c.primary().map(|_| ()).ok_or(ContentError::MissingField {
                kind: WidgetKind::Image,
                field: "images",
            }),
            Self::Map(c) => {
                require(WidgetKind::Map, "location", &c.location)?;
                in_range(WidgetKind::Map, "latitude", c.latitude, 90.0)?;
                in_range(WidgetKind::Map, "longitude", c.longitude, 180.0)
            }
            Self::Spotify(c) => require(WidgetKind::Spotify, "url", &c.url),
            Self::Youtube(c) => require(WidgetKind::Youtube, "url", &c.url),
            Self::Instagram(c) => require(WidgetKind::Instagram, "url", &c.url),
            Self::Quote(c) => require(WidgetKind::Quote, "text", &c.text),
            Self::Github(c) => require(WidgetKind::Github, "username", &c.username),
            Self::Calendar(c) => require(WidgetKind::Calendar, "bookingUrl", &c.booking_url),
            Self::Unknown { kind, .. } => Err(ContentError::UnsupportedKind(kind.clone())),
        }
    }
}

impl From<LinkContent> for WidgetContent {
    fn from(c: LinkContent) -> Self {
        Self::Link(c)
    }
}

impl From<TextContent> for WidgetContent {
    fn from(c: TextContent) -> Self {
        Self::Text(c)
    }
}

impl From<SocialContent> for WidgetContent {
    fn from(c: SocialContent) -> Self {
        Self::Social(c)
    }
}

impl From<ImageContent> for WidgetContent {
    fn from(c: ImageContent) -> Self {
        Self::Image(c)
    }
}

/// Strict authoring-path check: read `value` as the content shape of `kind`,
/// derive dependent fields and reject missing required fields.
pub fn validate_content(kind: WidgetKind, value: Value) -> Result<WidgetContent, ContentError> {
    if kind == WidgetKind::Text && value.get("text").is_none() {
        return Err(ContentError::MissingField {
            kind,
            field: "text",
        });
    }
    let content = WidgetContent::from_value(kind, upgrade_legacy(kind, value))?.normalized();
    content.validate()?;
    Ok(content)
}

/// Rewrite superseded field names into the current shape.
fn upgrade_legacy(kind: WidgetKind, mut value: Value) -> Value {
    if let (WidgetKind::Image, Some(obj)) = (kind, value.as_object_mut()) {
        if !obj.contains_key("images") {
            if let Some(src) = obj.remove("src") {
                obj.insert("images".to_string(), Value::Array(vec![src]));
            }
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_round_trip_through_str() {
        for kind in WidgetKind::ALL {
            assert_eq!(kind.as_str().parse::<WidgetKind>().unwrap(), kind);
        }
        assert!(matches!(
            "carousel".parse::<WidgetKind>(),
            Err(ContentError::UnsupportedKind(s)) if s == "carousel"
        ));
    }

    #[test]
    fn test_link_requires_url() {
        let err = validate_content(WidgetKind::Link, json!({"label": "Portfolio"})).unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField {
                kind: WidgetKind::Link,
                field: "url"
            }
        ));

        let ok = validate_content(WidgetKind::Link, json!({"url": "https://a.dev"})).unwrap();
        assert_eq!(ok, WidgetContent::Link(LinkContent::new("https://a.dev", "")));
    }

    #[test]
    fn test_text_requires_key_but_allows_empty() {
        assert!(validate_content(WidgetKind::Text, json!({})).is_err());
        assert!(validate_content(WidgetKind::Text, json!({"text": ""})).is_ok());
    }

    #[test]
    fn test_malformed_payload() {
        let err = validate_content(WidgetKind::Quote, json!({"text": 42})).unwrap_err();
        assert!(matches!(err, ContentError::Malformed { kind: WidgetKind::Quote, .. }));

        let err = validate_content(WidgetKind::Link, Value::Null).unwrap_err();
        assert!(matches!(err, ContentError::Malformed { .. }));
    }

    #[test]
    fn test_social_url_derived() {
        let content = validate_content(
            WidgetKind::Social,
            json!({"platform": "Instagram", "username": "designguru"}),
        )
        .unwrap();
        let WidgetContent::Social(social) = content else {
            panic!("expected social content");
        };
        assert_eq!(social.url, "https://instagram.com/designguru");
    }

    #[test]
    fn test_spotify_ids_derived() {
        let content = validate_content(
            WidgetKind::Spotify,
            json!({"url": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"}),
        )
        .unwrap();
        let WidgetContent::Spotify(spotify) = content else {
            panic!("expected spotify content");
        };
        assert_eq!(spotify.track_id, "4uLU6hMCjMI75M1A2tKUQC");
        assert_eq!(
            spotify.embed_url,
            "https://open.spotify.com/embed/track/4uLU6hMCjMI75M1A2tKUQC"
        );
    }

    #[test]
    fn test_youtube_bad_url_keeps_empty_id() {
        let content =
            validate_content(WidgetKind::Youtube, json!({"url": "https://vimeo.com/1"})).unwrap();
        let WidgetContent::Youtube(video) = content else {
            panic!("expected youtube content");
        };
        assert!(video.video_id.is_empty());
    }

    #[test]
    fn test_image_legacy_src() {
        let content = validate_content(WidgetKind::Image, json!({"src": "https://i/a.png"})).unwrap();
        assert_eq!(content, WidgetContent::Image(ImageContent::single("https://i/a.png")));

        let err = validate_content(WidgetKind::Image, json!({"images": ["  "]})).unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field: "images", .. }));
    }

    #[test]
    fn test_map_coordinates_range() {
        let err = validate_content(
            WidgetKind::Map,
            json!({"location": "Nowhere", "latitude": 123.0, "longitude": 0.0}),
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::InvalidField { field: "latitude", .. }));
    }

    #[test]
    fn test_counts_accept_number_or_string() {
        let content = validate_content(
            WidgetKind::Instagram,
            json!({"url": "https://instagram.com/designguru", "postCount": 12, "followerCount": "1.2k"}),
        )
        .unwrap();
        let WidgetContent::Instagram(insta) = content else {
            panic!("expected instagram content");
        };
        assert_eq!(insta.post_count, Some(Count::Number(12)));
        assert_eq!(insta.follower_count.unwrap().to_string(), "1.2k");
        assert_eq!(insta.username.as_deref(), Some("designguru"));
    }

    #[test]
    fn test_coerce_unknown_kind_is_kept() {
        let raw = json!({"slides": [1, 2, 3]});
        let content = WidgetContent::coerce("carousel", raw.clone());
        assert_eq!(content.kind(), None);
        assert_eq!(content.type_name(), "carousel");
        assert_eq!(content.to_value(), raw);
    }

    #[test]
    fn test_coerce_fills_missing_fields() {
        let content = WidgetContent::coerce("link", Value::Null);
        assert_eq!(content, WidgetContent::Link(LinkContent::default()));
        assert!(content.validate().is_err());
    }

    #[test]
    fn test_coerce_unreadable_payload_falls_back() {
        let raw = json!({"text": ["not", "a", "string"]});
        let content = WidgetContent::coerce("quote", raw.clone());
        assert_eq!(content.type_name(), "quote");
        assert_eq!(content.kind(), None);
        assert_eq!(content.to_value(), raw);
    }

    #[test]
    fn test_to_value_uses_camel_case() {
        let content = WidgetContent::Calendar(CalendarContent {
            booking_url: "https://cal.com/me".to_string(),
            event_name: Some("Intro call".to_string()),
            ..CalendarContent::default()
        });
        assert_eq!(
            content.to_value(),
            json!({"bookingUrl": "https://cal.com/me", "eventName": "Intro call"})
        );
    }

    #[test]
    fn test_unknown_content_fails_validation() {
        let content = WidgetContent::coerce("carousel", json!({}));
        assert!(matches!(
            content.validate(),
            Err(ContentError::UnsupportedKind(_))
        ));
    }
}
