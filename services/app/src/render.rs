//! Plain-text rendering of the views

use std::fmt::Write;

use auth::User;
use media::{Comment, Media, detail::DetailView, feed::Feed, image::ImageResolver};

use crate::dashboard::View;

/// Header line naming the signed-in user
pub fn header(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("PhotoApp | Logged in as: {} | Role: {}", user.email, user.role),
        None => "PhotoApp | Not logged in".to_string(),
    }
}

/// Header, view title and the commands available in that view
pub fn dashboard(view: View, user: Option<&User>) -> String {
    let hint = match view {
        View::Login => "Sign in with: photoapp login --email <EMAIL> --password <PASSWORD>",
        View::CreatorUpload => {
            "Upload with: photoapp upload <FILE> [--title] [--caption] [--location] [--people]"
        }
        View::ConsumerFeed => {
            "Browse with: photoapp feed [--search <TEXT>] [--page <N>], then show/comment/rate <ID>"
        }
    };
    format!("{}\n== {} ==\n{}", header(user), view.title(), hint)
}

/// One feed card
pub fn card(media: &Media, images: &ImageResolver) -> String {
    let mut out = format!("[{}] {}", media.id, media.display_title());
    if let Some(location) = media.location() {
        let _ = write!(out, "\n  Location: {location}");
    }
    let _ = write!(out, "\n  Image: {}", images.resolve_or_placeholder(media));
    if let Some(caption) = media.caption() {
        let _ = write!(out, "\n  {caption}");
    }
    out
}

/// Cards visible for the feed's current query and page
pub fn feed(feed: &Feed, images: &ImageResolver) -> String {
    let mut out = format!("Page {}", feed.page());
    if !feed.query().trim().is_empty() {
        let _ = write!(out, " | Search: {}", feed.query().trim());
    }

    let visible = feed.visible();
    if visible.is_empty() {
        out.push_str("\nNo photos found.");
    }
    for media in visible {
        let _ = write!(out, "\n\n{}", card(media, images));
    }
    out
}

/// Comment list in the order served
pub fn comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "No comments yet.".to_string();
    }

    comments
        .iter()
        .map(|comment| match comment.created_at_display() {
            Some(at) => format!("- {} • {}\n  {}", comment.author(), at, comment.text),
            None => format!("- {}\n  {}", comment.author(), comment.text),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Aggregate rating and the user's own rating
pub fn rating(detail: &DetailView) -> String {
    match detail.my_rating() {
        Some(mine) => format!("{}\nMy rating: {}", detail.rating(), mine),
        None => format!("{}\nMy rating: -", detail.rating()),
    }
}

/// Full detail view of one media item
pub fn detail(detail: &DetailView, images: &ImageResolver) -> String {
    let media = detail.media();
    let mut out = format!("[{}] {}", media.id, media.display_title());

    let people = media.people_names();
    match (media.location(), people.is_empty()) {
        (Some(location), false) => {
            let _ = write!(out, "\n{} • People: {}", location, people.join(", "));
        }
        (Some(location), true) => {
            let _ = write!(out, "\n{location}");
        }
        (None, false) => {
            let _ = write!(out, "\nPeople: {}", people.join(", "));
        }
        (None, true) => {}
    }

    let _ = write!(out, "\nImage: {}", images.resolve_or_placeholder(media));
    if let Some(caption) = media.caption() {
        let _ = write!(out, "\n{caption}");
    }
    let _ = write!(
        out,
        "\n\n{}\n\nComments\n{}",
        rating(detail),
        comments(detail.comments())
    );
    out
}
