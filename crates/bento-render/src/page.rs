//! The public profile page.

use crate::context::RenderContext;
use crate::node::{Element, PresentationNode};
use crate::renderer::render_widget;
use bento_core::{avatar_url, resolve_background, UserProfile};

/// Render a profile: header, then every widget in display order.
///
/// The profile theme is inherited by cards without their own background and
/// paints the page itself. A theme already set on `ctx` is replaced.
pub fn render_profile(profile: &UserProfile, ctx: &RenderContext) -> PresentationNode {
    let ctx = ctx.clone().with_theme(profile.theme.clone());
    let page_style = resolve_background(profile.theme_background()).to_css();

    let widgets = profile
        .display_order()
        .into_iter()
        .map(|widget| render_widget(widget, &ctx));

    Element::new("main")
        .class("bento-profile")
        .attr("data-username", profile.username.as_str())
        .style(&page_style)
        .child(header(profile))
        .child(Element::new("section").class("bento-grid").children(widgets))
        .into()
}

fn header(profile: &UserProfile) -> Element {
    let avatar = if profile.avatar_url.is_empty() {
        avatar_url(&profile.display_name)
    } else {
        profile.avatar_url.clone()
    };

    let mut header = Element::new("header")
        .class("profile-header")
        .child(
            Element::new("img")
                .class("avatar")
                .attr("src", avatar)
                .attr("alt", profile.display_name.as_str()),
        )
        .child(Element::new("h1").text(profile.display_name.as_str()))
        .child(
            Element::new("p")
                .class("username")
                .text(format!("@{}", profile.username)),
        );
    if !profile.bio.is_empty() {
        header = header.child(Element::new("p").class("bio").text(profile.bio.as_str()));
    }
    header
}

/// Standalone HTML document for a rendered page.
#[must_use]
pub fn html_document(profile: &UserProfile, body: &PresentationNode) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>",
        crate::node::escape(&profile.display_name),
        body.to_html()
    )
}
