//! The profile aggregate that owns a page's widgets.

use crate::background::Background;
use crate::content::{LinkContent, SocialContent, TextContent, WidgetContent};
use crate::widget::{Widget, WidgetId};
use serde::{Deserialize, Serialize};

/// Page-level look inherited by widgets without their own background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Default card and page background
    pub background: Background,
    /// Accent color token
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub accent_color: String,
}

impl Theme {
    /// Theme with the given background and no accent.
    #[must_use]
    pub const fn new(background: Background) -> Self {
        Self {
            background,
            accent_color: String::new(),
        }
    }

    /// Set the accent color.
    #[must_use]
    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent_color = accent.into();
        self
    }
}

/// A user's public page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Owner key
    pub id: String,
    /// Unique public handle
    pub username: String,
    /// Name shown in the header
    #[serde(default)]
    pub display_name: String,
    /// Short biography
    #[serde(default)]
    pub bio: String,
    /// Avatar image
    #[serde(default)]
    pub avatar_url: String,
    /// Widgets, exclusively owned by this profile
    #[serde(default)]
    pub widgets: Vec<Widget>,
    /// Page theme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl UserProfile {
    /// Empty profile.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            display_name: display_name.into(),
            bio: String::new(),
            avatar_url: String::new(),
            widgets: Vec::new(),
            theme: None,
        }
    }

    /// First-visit profile: placeholder bio, generated avatar and three
    /// starter widgets.
    pub fn starter(
        id: impl Into<String>,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let mut profile = Self::new(id, username, display_name);
        profile.bio = "Your bio here...".to_string();
        profile.avatar_url = avatar_url(&profile.display_name);

        let mut social = SocialContent::new("instagram", "designguru");
        social.icon = Some("instagram".to_string());
        let mut link = LinkContent::new("https://myportfolio.com", "Check out my work");
        link.icon = Some("external-link".to_string());

        profile.widgets = vec![
            Widget::new(
                WidgetId::generate(),
                TextContent::new(
                    "Hello! I'm a designer passionate about creating beautiful interfaces.",
                ),
            )
            .with_title("About Me"),
            Widget::new(
                WidgetId::generate(),
                WidgetContent::Social(social).normalized(),
            )
            .with_title("Instagram"),
            Widget::new(WidgetId::generate(), link).with_title("My Portfolio"),
        ];
        profile.normalize_positions();
        profile
    }

    /// Look up a widget.
    #[must_use]
    pub fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| &w.id == id)
    }

    /// Widgets in render order.
    #[must_use]
    pub fn display_order(&self) -> Vec<&Widget> {
        display_order(&self.widgets)
    }

    /// Theme background, if a theme is set.
    #[must_use]
    pub fn theme_background(&self) -> Option<&Background> {
        self.theme.as_ref().map(|t| &t.background)
    }

    /// Reorder `widgets` into display order and assign positions `0..N-1`.
    pub fn normalize_positions(&mut self) {
        let order: Vec<WidgetId> = self
            .display_order()
            .into_iter()
            .map(|w| w.id.clone())
            .collect();
        let mut widgets = std::mem::take(&mut self.widgets);
        let mut ordered = Vec::with_capacity(widgets.len());
        for id in &order {
            if let Some(index) = widgets.iter().position(|w| &w.id == id) {
                ordered.push(widgets.swap_remove(index));
            }
        }
        for (position, widget) in ordered.iter_mut().enumerate() {
            widget.position = Some(position as u32);
        }
        self.widgets = ordered;
    }

    /// Whether positions are exactly `0..N-1` in array order.
    #[must_use]
    pub fn positions_are_contiguous(&self) -> bool {
        self.widgets
            .iter()
            .enumerate()
            .all(|(index, w)| w.position == Some(index as u32))
    }
}

/// Sort by `position`. When any widget lacks one, array order is used as-is.
/// Ties and gaps are tolerated; ties keep array order.
#[must_use]
pub fn display_order(widgets: &[Widget]) -> Vec<&Widget> {
    let mut ordered: Vec<&Widget> = widgets.iter().collect();
    if widgets.iter().all(|w| w.position.is_some()) {
        ordered.sort_by_key(|w| w.position);
    }
    ordered
}

/// Generated initials avatar for a display name.
#[must_use]
pub fn avatar_url(display_name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        display_name.trim().replace(' ', "+")
    )
}
