//! The frame every widget body is drawn in.

use crate::context::RenderContext;
use crate::node::{Element, PresentationNode};
use bento_core::{resolve_effective_background, Background, BackgroundKind, Color, Widget};

/// Readable text color over a solid background, when the token parses.
#[must_use]
pub fn foreground_for(background: &Background) -> Option<Color> {
    match background.kind {
        BackgroundKind::Color => Color::from_hex(&background.value)
            .ok()
            .map(|c| c.readable_foreground()),
        BackgroundKind::Gradient | BackgroundKind::Image | BackgroundKind::Unknown => None,
    }
}

/// Inline CSS for a card: background, foreground and explicit size.
#[must_use]
pub fn card_style(widget: &Widget, ctx: &RenderContext) -> String {
    let background = resolve_effective_background(
        widget.background.as_ref(),
        ctx.theme.as_ref(),
        &ctx.default_background,
    );

    let mut parts = Vec::new();
    let background_css = background.style().to_css();
    if !background_css.is_empty() {
        parts.push(background_css);
    }
    if let Some(fg) = foreground_for(background) {
        parts.push(format!("color: {};", fg.to_hex()));
    }
    if !ctx.preview {
        if let Some(width) = widget.width {
            parts.push(format!("width: {width}px;"));
        }
        if let Some(height) = widget.height {
            parts.push(format!("height: {height}px;"));
        }
    }
    parts.join(" ")
}

/// Wrap `body` in a card with the widget's background and, while editing,
/// the edit/delete buttons and resize handle.
pub(crate) fn card(
    widget: &Widget,
    ctx: &RenderContext,
    modifier: &str,
    body: Vec<PresentationNode>,
) -> PresentationNode {
    let mut class = String::from("bento-card");
    for extra in [modifier, if ctx.preview { "preview" } else { "" }] {
        if !extra.is_empty() {
            class.push(' ');
            class.push_str(extra);
        }
    }

    let mut element = Element::new("div")
        .class(class)
        .attr("data-widget-id", widget.id.as_str())
        .attr("data-widget-type", widget.type_name())
        .style(&card_style(widget, ctx));

    if ctx.shows_affordances() {
        element = element.child(
            Element::new("div")
                .class("card-actions")
                .child(
                    Element::new("button")
                        .class("edit")
                        .attr("aria-label", "Edit widget"),
                )
                .child(
                    Element::new("button")
                        .class("delete")
                        .attr("aria-label", "Delete widget"),
                ),
        );
    }

    element = element.child(Element::new("div").class("card-body").children(body));

    if ctx.shows_affordances() {
        element = element.child(
            Element::new("div")
                .class("resize-handle")
                .attr("aria-label", "Resize widget"),
        );
    }

    element.into()
}
