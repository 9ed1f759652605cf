//! Integration tests for bento-core.
//!
//! These tests verify the public API works correctly end-to-end.

use bento_core::{
    media, resolve_effective_background, validate_content, Background, ContentError,
    EditorConfig, UserProfile, Widget, WidgetContent, WidgetKind,
};
use serde_json::json;

// =============================================================================
// Persistence shape
// =============================================================================

#[test]
fn test_profile_round_trip_preserves_unknown_widgets() {
    let raw = json!({
        "id": "user-1",
        "username": "jane",
        "displayName": "Jane Doe",
        "bio": "Designer",
        "avatarUrl": "https://ui-avatars.com/api/?name=Jane+Doe&background=random",
        "widgets": [
            {"id": "a", "type": "link", "content": {"url": "https://a.dev", "label": "A"}, "position": 0},
            {"id": "b", "type": "hologram", "content": {"depth": 3}, "position": 1}
        ]
    });

    let profile: UserProfile = serde_json::from_value(raw.clone()).expect("valid profile");
    assert_eq!(profile.widgets[1].kind(), None);

    let back = serde_json::to_value(&profile).expect("serializable");
    assert_eq!(back, raw);
}

#[test]
fn test_legacy_image_widget_reads_as_images() {
    let widget: Widget = serde_json::from_value(json!({
        "id": "img",
        "type": "image",
        "content": {"src": "https://cdn/a.jpg", "alt": "A"}
    }))
    .expect("valid widget");

    let WidgetContent::Image(image) = &widget.content else {
        panic!("expected image content");
    };
    assert_eq!(image.primary(), Some("https://cdn/a.jpg"));
    assert_eq!(image.alt.as_deref(), Some("A"));
}

// =============================================================================
// Authoring path
// =============================================================================

#[test]
fn test_every_kind_rejects_empty_object_except_text() {
    for kind in WidgetKind::ALL {
        let result = validate_content(kind, json!({}));
        if kind == WidgetKind::Text {
            assert!(matches!(result, Err(ContentError::MissingField { field: "text", .. })));
        } else {
            assert!(result.is_err(), "{kind} accepted an empty payload");
        }
    }
}

#[test]
fn test_youtube_authoring_flow() {
    let content = validate_content(
        WidgetKind::Youtube,
        json!({"url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}),
    )
    .expect("valid youtube content");

    let WidgetContent::Youtube(video) = content else {
        panic!("expected youtube content");
    };
    assert_eq!(video.video_id, "dQw4w9WgXcQ");
    assert_eq!(
        media::youtube_embed_url(&video.video_id),
        "https://www.youtube.com/embed/dQw4w9WgXcQ"
    );
}

// =============================================================================
// Theming
// =============================================================================

#[test]
fn test_theme_inheritance_through_profile() {
    let mut profile = UserProfile::starter("u", "jane", "Jane");
    let config = EditorConfig::default();
    profile.theme = Some(bento_core::Theme::new(Background::gradient("linear-gradient(#000, #fff)")));
    profile.widgets[0].background = Some(Background::color("#F6F9FF"));

    let own = resolve_effective_background(
        profile.widgets[0].background.as_ref(),
        profile.theme.as_ref(),
        &config.default_background,
    );
    assert_eq!(own, &Background::color("#F6F9FF"));

    let inherited = resolve_effective_background(
        profile.widgets[1].background.as_ref(),
        profile.theme.as_ref(),
        &config.default_background,
    );
    assert_eq!(inherited.value, "linear-gradient(#000, #fff)");
}
