//! Widget dispatch: one presentation per content kind.
//!
//! Each kind has a compact preview and a full card. Content is assumed to
//! have passed validation; optional fields fall back to the same display
//! strings the editor shows.

use crate::calendar::{available_weekdays, time_slots, WEEKDAY_MARKERS};
use crate::card::card;
use crate::context::RenderContext;
use crate::heatmap::{contribution_weeks, PREVIEW_WEEKS};
use crate::node::{Element, PresentationNode};
use bento_core::media::{
    instagram_username, link_target, map_placeholder_image, map_url, safe_href,
    youtube_thumbnail_url,
};
use bento_core::{
    CalendarContent, GithubContent, ImageContent, InstagramContent, LinkContent, MapContent,
    QuoteContent, SocialContent, SpotifyContent, TextContent, Widget, WidgetContent,
    YoutubeContent,
};
use serde_json::Value;

/// Render one widget as a card.
pub fn render_widget(widget: &Widget, ctx: &RenderContext) -> PresentationNode {
    let title = widget.title.as_deref();
    let body = match &widget.content {
        WidgetContent::Link(c) => link(title, c, ctx),
        WidgetContent::Social(c) => social(title, c, ctx),
        WidgetContent::Text(c) => text(title, c),
        WidgetContent::Image(c) => image(title, c, ctx),
        WidgetContent::Map(c) => map(title, c, ctx),
        WidgetContent::Spotify(c) => spotify(title, c, ctx),
        WidgetContent::Youtube(c) => youtube(title, c, ctx),
        WidgetContent::Instagram(c) => instagram(title, c, ctx),
        WidgetContent::Quote(c) => quote(title, c, ctx),
        WidgetContent::Github(c) => github(widget, c, ctx),
        WidgetContent::Calendar(c) => calendar(title, c, ctx),
        WidgetContent::Unknown { kind, raw } => return placeholder(widget, kind, raw, ctx),
    };
    card(widget, ctx, widget.type_name(), body)
}

/// Non-fatal fallback for a kind this build cannot present.
fn placeholder(widget: &Widget, kind: &str, raw: &Value, ctx: &RenderContext) -> PresentationNode {
    tracing::debug!(id = %widget.id, kind, has_content = !raw.is_null(), "rendering placeholder");
    card(
        widget,
        ctx,
        "unknown",
        vec![
            heading("p", widget.title.as_deref().unwrap_or("Widget")),
            paragraph("muted", format!("Type: {kind}")),
            paragraph("muted", "Renderer not implemented yet."),
        ],
    )
}

fn heading(tag: &str, text: &str) -> PresentationNode {
    Element::new(tag).class("title").text(text).into()
}

fn paragraph(class: &str, text: impl Into<String>) -> PresentationNode {
    Element::new("p").class(class).text(text).into()
}

fn external(href: &str) -> Element {
    Element::new("a")
        .attr("href", href)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
}

fn img(src: &str, alt: &str) -> PresentationNode {
    Element::new("img").attr("src", src).attr("alt", alt).into()
}

const INVALID_LINK: &str = "Invalid URL. Please edit this widget to set a valid URL.";

fn invalid_url(title: &str, message: &str) -> Vec<PresentationNode> {
    vec![heading("h3", title), paragraph("invalid-url", message)]
}

fn first_non_empty<'a>(
    candidates: impl IntoIterator<Item = Option<&'a str>>,
    fallback: &'a str,
) -> &'a str {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or(fallback)
}

fn link(title: Option<&str>, c: &LinkContent, ctx: &RenderContext) -> Vec<PresentationNode> {
    let fallback_title = title.unwrap_or("Link Widget");
    if ctx.preview {
        return vec![
            heading("h3", fallback_title),
            paragraph("muted", first_non_empty([Some(c.label.as_str())], &c.url)),
        ];
    }
    let Some(target) = link_target(&c.url) else {
        return invalid_url(fallback_title, INVALID_LINK);
    };
    vec![external(&target.href)
        .class("card-link")
        .child(img(&target.favicon_url, &target.domain))
        .child(heading(
            "h3",
            first_non_empty([title, Some(c.label.as_str())], &target.domain),
        ))
        .child(paragraph("domain", target.domain.clone()))
        .child(paragraph("cta", first_non_empty([Some(c.label.as_str())], "Visit Link")))
        .into()]
}

fn social(title: Option<&str>, c: &SocialContent, ctx: &RenderContext) -> Vec<PresentationNode> {
    let name = first_non_empty([title], &c.platform);
    let mut body = vec![
        heading("h3", name),
        paragraph("muted", format!("@{}", c.username)),
    ];
    if ctx.preview {
        return body;
    }
    let Some(href) = safe_href(&c.url) else {
        return invalid_url(name, INVALID_LINK);
    };
    if let Some(description) = c.description.as_deref().filter(|d| !d.is_empty()) {
        body.push(paragraph("description", description));
    }
    body.push(
        external(&href)
            .class("cta")
            .text(first_non_empty([c.call_to_action.as_deref()], "Follow"))
            .into(),
    );
    body
}

fn text(title: Option<&str>, c: &TextContent) -> Vec<PresentationNode> {
    let mut body: Vec<PresentationNode> = title.map(|t| heading("h3", t)).into_iter().collect();
    body.extend(c.text.split('\n').map(|line| paragraph("text", line)));
    body
}

fn image(title: Option<&str>, c: &ImageContent, ctx: &RenderContext) -> Vec<PresentationNode> {
    let alt = first_non_empty([c.alt.as_deref(), title], "Image widget");
    let mut body = Vec::new();
    match c.primary() {
        Some(src) => body.push(img(src, alt)),
        None => body.push(paragraph("muted", "No image")),
    }
    if ctx.preview {
        if let Some(title) = title {
            body.push(paragraph("caption", title));
        }
    } else if let Some(caption) = c.captions.first().filter(|s| !s.is_empty()) {
        body.push(Element::new("figcaption").text(caption.as_str()).into());
    }
    body
}

fn map(title: Option<&str>, c: &MapContent, ctx: &RenderContext) -> Vec<PresentationNode> {
    let name = first_non_empty([title], &c.location);
    let mut body = vec![heading("h3", name)];
    if let Some(address) = c.address.as_deref().filter(|a| !a.is_empty()) {
        body.push(paragraph("muted", address));
    }
    if ctx.preview {
        return body;
    }
    let picture = c
        .map_image_url
        .clone()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| map_placeholder_image(&c.location));
    body.push(
        external(&map_url(&c.location, c.latitude, c.longitude))
            .class("map")
            .child(img(&picture, &format!("Map of {}", c.location)))
            .into(),
    );
    if let Some(description) = c.description.as_deref().filter(|d| !d.is_empty()) {
        body.push(paragraph("description", description));
    }
    body
}

fn spotify(title: Option<&str>, c: &SpotifyContent, ctx: &RenderContext) -> Vec<PresentationNode> {
    let name = first_non_empty([title, c.track_name.as_deref()], "Spotify Track");
    if c.track_id.is_empty() {
        return invalid_url(
            name,
            "Invalid Spotify URL. Please edit this widget to set a track link.",
        );
    }
    let art_alt = first_non_empty([c.track_name.as_deref()], "Album art");
    let mut body = vec![heading("h3", name)];
    if let Some(artist) = c.artist_name.as_deref() {
        body.push(paragraph("muted", artist));
    }
    if let Some(art) = c.album_art_url.as_deref() {
        body.push(img(art, art_alt));
    }
    if !ctx.preview {
        let (Some(embed), Some(href)) = (safe_href(&c.embed_url), safe_href(&c.url)) else {
            return invalid_url(name, INVALID_LINK);
        };
        body.push(
            Element::new("iframe")
                .attr("src", embed)
                .attr("title", "Spotify player")
                .attr("allow", "encrypted-media")
                .into(),
        );
        body.push(external(&href).class("cta").text("Open in Spotify").into());
    }
    body
}

fn youtube(title: Option<&str>, c: &YoutubeContent, ctx: &RenderContext) -> Vec<PresentationNode> {
    let name = first_non_empty([title], "YouTube Video");
    if c.video_id.is_empty() {
        return invalid_url(
            name,
            "Invalid YouTube URL. Please edit this widget to set a video link.",
        );
    }
    let thumbnail = c
        .thumbnail_url
        .clone()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| youtube_thumbnail_url(&c.video_id));
    let alt = first_non_empty([title], "Video thumbnail");
    if ctx.preview {
        return vec![heading("h3", name), img(&thumbnail, alt)];
    }
    let Some(href) = safe_href(&c.url) else {
        return invalid_url(name, INVALID_LINK);
    };
    let anchor = external(&href)
        .class("card-link")
        .child(img(&thumbnail, alt))
        .child(heading("h3", name))
        .child_opt(c.channel_name.as_deref().map(|channel| paragraph("muted", channel)))
        .child_opt(
            c.view_count
                .as_ref()
                .map(|views| paragraph("muted", format!("{views} views"))),
        );
    vec![anchor.into()]
}

fn instagram(
    title: Option<&str>,
    c: &InstagramContent,
    ctx: &RenderContext,
) -> Vec<PresentationNode> {
    let derived = instagram_username(&c.url);
    let name = first_non_empty([title, c.username.as_deref()], &derived);
    let mut body = vec![heading("h3", name)];
    if let Some(pic) = c.profile_pic_url.as_deref() {
        body.push(img(
            pic,
            first_non_empty([c.username.as_deref()], "Profile picture"),
        ));
    }
    let followers_label = if ctx.preview { "followers" } else { "Followers" };
    if let Some(followers) = &c.follower_count {
        body.push(paragraph("muted", format!("{followers} {followers_label}")));
    }
    if !ctx.preview {
        let Some(href) = safe_href(&c.url) else {
            return invalid_url(name, INVALID_LINK);
        };
        if let Some(posts) = &c.post_count {
            body.push(paragraph("muted", format!("{posts} posts")));
        }
        body.push(external(&href).class("cta").text("Follow").into());
    }
    body
}

fn quote(title: Option<&str>, c: &QuoteContent, ctx: &RenderContext) -> Vec<PresentationNode> {
    let mut body: Vec<PresentationNode> = match (ctx.preview, title) {
        (true, Some(t)) => vec![heading("h3", t)],
        _ => Vec::new(),
    };
    let quoted = if ctx.preview {
        format!("\"{}\"", c.text)
    } else {
        c.text.clone()
    };
    let mut block = Element::new("blockquote").child(Element::new("p").text(quoted));
    if let Some(author) = c.author.as_deref().filter(|a| !a.is_empty()) {
        block = block.child(Element::new("footer").text(format!("- {author}")));
    }
    body.push(block.into());
    body
}

fn github(widget: &Widget, c: &GithubContent, ctx: &RenderContext) -> Vec<PresentationNode> {
    let weeks = contribution_weeks(widget.id.as_str());
    let shown = if ctx.preview { PREVIEW_WEEKS } else { weeks.len() };
    let grid = Element::new("div").class("heatmap").children(
        weeks.iter().take(shown).map(|week| {
            PresentationNode::from(Element::new("div").class("week").children(
                week.iter().map(|level| {
                    PresentationNode::from(Element::new("div").class(format!("day level-{level}")))
                }),
            ))
        }),
    );

    if ctx.preview {
        let fallback = format!("Github: {}", c.username);
        let mut body = vec![heading("h3", first_non_empty([widget.title.as_deref()], &fallback))];
        if let Some(followers) = &c.follower_count {
            body.push(paragraph("muted", format!("{followers} followers")));
        }
        body.push(grid.into());
        return body;
    }

    let Some(href) = safe_href(&c.url) else {
        return invalid_url(&c.username, INVALID_LINK);
    };
    let mut stats = Element::new("div").class("stats");
    if let Some(repos) = &c.repo_count {
        stats = stats.child(Element::new("span").text(format!("{repos} repos")));
    }
    if let Some(followers) = &c.follower_count {
        stats = stats.child(Element::new("span").text(format!("{followers} followers")));
    }
    vec![external(&href)
        .class("card-link")
        .child(heading("h3", &c.username))
        .child(stats)
        .child(paragraph("muted", "Contribution activity"))
        .child(grid)
        .into()]
}

fn calendar(
    title: Option<&str>,
    c: &CalendarContent,
    ctx: &RenderContext,
) -> Vec<PresentationNode> {
    let available = available_weekdays(c);
    let days = Element::new("div").class("weekdays").children(
        WEEKDAY_MARKERS
            .iter()
            .zip(available)
            .map(|(marker, open)| {
                PresentationNode::from(
                    Element::new("div")
                        .class(if open { "day available" } else { "day" })
                        .text(*marker),
                )
            }),
    );

    if ctx.preview {
        let mut body = vec![heading("h3", first_non_empty([title], "Calendar"))];
        if let Some(event) = c.event_name.as_deref() {
            body.push(paragraph("muted", event));
        }
        body.push(days.into());
        return body;
    }

    let name = first_non_empty([title, c.event_name.as_deref()], "Book a time");
    let Some(href) = safe_href(&c.booking_url) else {
        return invalid_url(name, INVALID_LINK);
    };
    let mut body = vec![heading("h3", name)];
    if let Some(timezone) = c.timezone.as_deref() {
        body.push(paragraph("muted", timezone));
    }
    body.push(days.into());
    body.push(
        Element::new("div")
            .class("time-slots")
            .children(
                time_slots(c).into_iter().map(|slot| {
                    PresentationNode::from(external(&href).class("slot").text(slot))
                }),
            )
            .into(),
    );
    body
}
