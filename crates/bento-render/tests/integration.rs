//! Integration tests for bento-render.

use bento_core::{Background, EditorConfig, UserProfile, Widget, WidgetContent, WidgetKind};
use bento_render::{render_profile, render_widget, PresentationNode, RenderContext};
use proptest::prelude::*;
use serde_json::json;

fn profile_from_json() -> UserProfile {
    serde_json::from_value(json!({
        "id": "u1",
        "username": "jane",
        "displayName": "Jane",
        "widgets": [
            {"id": "w1", "type": "text", "content": {"text": "hi"}, "position": 0},
            {"id": "w2", "type": "hologram", "title": "Depth", "content": {"z": 1}, "position": 1},
            {"id": "w3", "type": "youtube", "content": {"url": "https://youtu.be/dQw4w9WgXcQ"}, "position": 2}
        ]
    }))
    .expect("valid profile")
}

fn card_ids(node: &PresentationNode) -> Vec<&str> {
    node.find_by_class("bento-card")
        .into_iter()
        .filter_map(|e| e.attribute("data-widget-id"))
        .collect()
}

// =============================================================================
// Public page
// =============================================================================

#[test]
fn test_starter_profile_renders_three_cards() {
    let profile = UserProfile::starter("u1", "jane", "Jane Doe");
    let node = render_profile(&profile, &RenderContext::public());
    assert_eq!(node.find_by_class("bento-card").len(), 3);
    let html = node.to_html();
    assert!(html.contains("About Me"));
    assert!(html.contains("https://instagram.com/designguru"));
    assert!(html.contains("Check out my work"));
}

#[test]
fn test_unknown_kind_does_not_break_page() {
    let node = render_profile(&profile_from_json(), &RenderContext::public());
    assert_eq!(card_ids(&node), vec!["w1", "w2", "w3"]);
    let placeholder = node.first_by_class("unknown").expect("placeholder card");
    assert_eq!(placeholder.attribute("data-widget-type"), Some("hologram"));
    assert!(node.to_html().contains("Type: hologram"));
}

#[test]
fn test_youtube_read_from_storage_is_playable() {
    let node = render_profile(&profile_from_json(), &RenderContext::public());
    assert!(node.first_by_class("invalid-url").is_none());
}

#[test]
fn test_user_text_is_escaped() {
    let mut profile = profile_from_json();
    profile.bio = "<img src=x onerror=alert(1)>".into();
    let html = render_profile(&profile, &RenderContext::public()).to_html();
    assert!(!html.contains("<img src=x"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[test]
fn test_stored_script_url_is_not_linked() {
    let profile: UserProfile = serde_json::from_value(json!({
        "id": "u1",
        "username": "jane",
        "displayName": "Jane",
        "widgets": [{
            "id": "w1",
            "type": "social",
            "content": {"platform": "twitter", "username": "jane", "url": "javascript:alert(1)"},
            "position": 0
        }]
    }))
    .expect("valid profile");
    let node = render_profile(&profile, &RenderContext::public());
    assert!(node.first_by_class("invalid-url").is_some());
    assert!(!node.to_html().contains("javascript:"));
}

// =============================================================================
// Editor affordances
// =============================================================================

#[test]
fn test_affordances_follow_context() {
    let profile = profile_from_json();
    let public = render_profile(&profile, &RenderContext::public());
    assert!(public.find_by_class("resize-handle").is_empty());
    assert!(public.find_by_class("card-actions").is_empty());

    let editor = render_profile(&profile, &RenderContext::editor());
    assert_eq!(editor.find_by_class("resize-handle").len(), 3);
    assert_eq!(editor.find_by_class("card-actions").len(), 3);
}

#[test]
fn test_configured_default_background() {
    let mut config = EditorConfig::default();
    config.default_background = Background::color("#101840");
    let ctx = RenderContext::public().with_config(&config);
    let node = render_profile(&profile_from_json(), &ctx);
    let first = node.first_by_class("bento-card").expect("card");
    assert_eq!(
        first.attribute("style"),
        Some("background-color: #101840; color: #ffffff;")
    );
}

// =============================================================================
// Every kind renders
// =============================================================================

fn minimal_content(kind: WidgetKind) -> serde_json::Value {
    match kind {
        WidgetKind::Link => json!({"url": "https://a.dev", "label": "A"}),
        WidgetKind::Social => json!({"platform": "github", "username": "jane"}),
        WidgetKind::Text => json!({"text": ""}),
        WidgetKind::Image => json!({"images": ["https://img/a.png"]}),
        WidgetKind::Map => json!({"location": "Berlin"}),
        WidgetKind::Spotify => json!({"url": "https://open.spotify.com/track/abc123"}),
        WidgetKind::Youtube => json!({"url": "https://youtu.be/dQw4w9WgXcQ"}),
        WidgetKind::Instagram => json!({"url": "https://instagram.com/jane"}),
        WidgetKind::Quote => json!({"text": "q"}),
        WidgetKind::Github => json!({"username": "jane"}),
        WidgetKind::Calendar => json!({"bookingUrl": "https://cal.example/jane"}),
    }
}

proptest! {
    #[test]
    fn prop_every_kind_renders_a_card(index in 0..WidgetKind::ALL.len(), preview in any::<bool>(), editing in any::<bool>()) {
        let kind = WidgetKind::ALL[index];
        let content = bento_core::validate_content(kind, minimal_content(kind)).expect("valid content");
        let widget = Widget::new("w".into(), content);
        let ctx = RenderContext { preview, editing, ..RenderContext::public() };

        let node = render_widget(&widget, &ctx);
        let root = node.as_element().expect("card element");
        prop_assert!(root.has_class("bento-card"));
        prop_assert!(root.has_class(kind.as_str()));
        prop_assert_eq!(root.has_class("preview"), preview);
        prop_assert_eq!(node.first_by_class("resize-handle").is_some(), editing && !preview);
        prop_assert!(node.first_by_class("invalid-url").is_none());
        let is_unknown = matches!(widget.content, WidgetContent::Unknown { .. });
        prop_assert!(!is_unknown);
    }
}
