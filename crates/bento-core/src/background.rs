//! Background descriptors and their resolution to style attributes.
//!
//! Values are opaque: a gradient expression or image URL is passed through
//! without parsing. Only the renderer's foreground choice looks inside a
//! solid color token, via [`crate::Color`].

use crate::profile::Theme;
use serde::{Deserialize, Serialize};

/// Kind of background fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    /// Solid color token
    Color,
    /// Gradient expression
    Gradient,
    /// Image URL
    Image,
    /// Any other persisted kind; resolves to no style
    #[serde(other)]
    Unknown,
}

/// A `{type, value}` background descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    /// Fill kind
    #[serde(rename = "type", alias = "kind")]
    pub kind: BackgroundKind,
    /// Color token, gradient expression or image URL
    #[serde(default)]
    pub value: String,
}

impl Background {
    /// Solid color background.
    pub fn color(value: impl Into<String>) -> Self {
        Self {
            kind: BackgroundKind::Color,
            value: value.into(),
        }
    }

    /// Gradient background.
    pub fn gradient(value: impl Into<String>) -> Self {
        Self {
            kind: BackgroundKind::Gradient,
            value: value.into(),
        }
    }

    /// Image background.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: BackgroundKind::Image,
            value: url.into(),
        }
    }

    /// Style attributes for this descriptor.
    #[must_use]
    pub fn style(&self) -> StyleAttributes {
        resolve_background(Some(self))
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::color("#ffffff")
    }
}

/// Renderable background style. Empty means "inherit".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleAttributes {
    /// Solid fill
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Shorthand fill, used for gradients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// `url(...)` image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Image sizing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_size: Option<String>,
    /// Image placement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_position: Option<String>,
}

impl StyleAttributes {
    /// No visual override.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.background_color.is_none()
            && self.background.is_none()
            && self.background_image.is_none()
            && self.background_size.is_none()
            && self.background_position.is_none()
    }

    /// Inline CSS declaration list.
    #[must_use]
    pub fn to_css(&self) -> String {
        [
            ("background-color", &self.background_color),
            ("background", &self.background),
            ("background-image", &self.background_image),
            ("background-size", &self.background_size),
            ("background-position", &self.background_position),
        ]
        .into_iter()
        .filter_map(|(property, value)| value.as_ref().map(|v| format!("{property}: {v};")))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Map a descriptor to style attributes. Absent or unknown kinds give an
/// empty style.
#[must_use]
pub fn resolve_background(descriptor: Option<&Background>) -> StyleAttributes {
    let Some(bg) = descriptor else {
        return StyleAttributes::default();
    };
    match bg.kind {
        BackgroundKind::Color => StyleAttributes {
            background_color: Some(bg.value.clone()),
            ..StyleAttributes::default()
        },
        BackgroundKind::Gradient => StyleAttributes {
            background: Some(bg.value.clone()),
            ..StyleAttributes::default()
        },
        BackgroundKind::Image => StyleAttributes {
            background_image: Some(format!("url(\"{}\")", bg.value.replace('"', "%22"))),
            background_size: Some("cover".to_string()),
            background_position: Some("center".to_string()),
            ..StyleAttributes::default()
        },
        BackgroundKind::Unknown => StyleAttributes::default(),
    }
}

/// Effective background of a widget card: its own override, else the
/// profile theme, else `default`.
#[must_use]
pub fn resolve_effective_background<'a>(
    widget: Option<&'a Background>,
    theme: Option<&'a Theme>,
    default: &'a Background,
) -> &'a Background {
    widget
        .or_else(|| theme.map(|t| &t.background))
        .unwrap_or(default)
}

/// Gradient expressions offered by background pickers. The first one is
/// the default a new widget's gradient field starts with.
pub const GRADIENT_PRESETS: [&str; 9] = [
    "linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%)",
    "linear-gradient(to right, #ffc3a0 0%, #ffafbd 100%)",
    "linear-gradient(to top, #accbee 0%, #e7f0fd 100%)",
    "linear-gradient(90deg, hsla(277, 75%, 84%, 1) 0%, hsla(297, 50%, 51%, 1) 100%)",
    "linear-gradient(90deg, hsla(59, 86%, 68%, 1) 0%, hsla(134, 36%, 53%, 1) 100%)",
    "linear-gradient(60deg, #abecd6 0%, #fbed96 100%)",
    "linear-gradient(to top, #d299c2 0%, #fef9d7 100%)",
    "linear-gradient(90deg, hsla(46, 73%, 75%, 1) 0%, hsla(176, 73%, 88%, 1) 100%)",
    "linear-gradient(90deg, hsla(24, 100%, 83%, 1) 0%, hsla(341, 91%, 68%, 1) 100%)",
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_resolve_color() {
        let style = resolve_background(Some(&Background::color("#F6F9FF")));
        assert_eq!(style.background_color.as_deref(), Some("#F6F9FF"));
        assert_eq!(style.to_css(), "background-color: #F6F9FF;");
    }

    #[test]
    fn test_resolve_gradient_is_opaque() {
        let style = resolve_background(Some(&Background::gradient("not even css")));
        assert_eq!(style.background.as_deref(), Some("not even css"));
    }

    #[test]
    fn test_resolve_image() {
        let style = Background::image("https://img/a.png").style();
        assert_eq!(style.background_image.as_deref(), Some("url(\"https://img/a.png\")"));
        assert_eq!(style.background_size.as_deref(), Some("cover"));
        assert_eq!(style.background_position.as_deref(), Some("center"));
    }

    #[test]
    fn test_absent_and_unknown_are_empty() {
        assert!(resolve_background(None).is_empty());
        let bg: Background = serde_json::from_value(json!({"type": "video", "value": "x"})).unwrap();
        assert_eq!(bg.kind, BackgroundKind::Unknown);
        assert!(bg.style().is_empty());
        assert_eq!(bg.style().to_css(), "");
    }

    #[test]
    fn test_kind_alias() {
        let bg: Background =
            serde_json::from_value(json!({"kind": "gradient", "value": "g"})).unwrap();
        assert_eq!(bg, Background::gradient("g"));
        assert_eq!(
            serde_json::to_value(&bg).unwrap(),
            json!({"type": "gradient", "value": "g"})
        );
    }

    #[test]
    fn test_effective_precedence() {
        let own = Background::color("#111");
        let theme = Theme::new(Background::color("#222"));
        let default = Background::default();

        assert_eq!(resolve_effective_background(Some(&own), Some(&theme), &default), &own);
        assert_eq!(
            resolve_effective_background(None, Some(&theme), &default),
            &theme.background
        );
        assert_eq!(resolve_effective_background(None, None, &default), &default);
    }

    #[test]
    fn test_gradient_presets() {
        assert_eq!(
            GRADIENT_PRESETS[0],
            "linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%)"
        );
        assert!(GRADIENT_PRESETS.iter().all(|g| g.starts_with("linear-gradient(")));
        let style = Background::gradient(GRADIENT_PRESETS[3]).style();
        assert_eq!(style.background.as_deref(), Some(GRADIENT_PRESETS[3]));
    }

    proptest! {
        #[test]
        fn prop_widget_override_never_yields_theme(own in "#[0-9a-f]{6}", themed in "#[0-9a-f]{6}") {
            let own = Background::color(own);
            let theme = Theme::new(Background::gradient(themed));
            let default = Background::default();
            let resolved = resolve_effective_background(Some(&own), Some(&theme), &default);
            prop_assert!(std::ptr::eq(resolved, &own));
            let inherited = resolve_effective_background(None, Some(&theme), &default);
            prop_assert!(std::ptr::eq(inherited, &theme.background));
        }
    }
}
