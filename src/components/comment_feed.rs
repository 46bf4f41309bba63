//! Comment feed: fetch the latest comments and render them as cards.
//!
//! Loading degrades gracefully. Any failure (transport, non-2xx status, bad
//! JSON) replaces the feed with a static message and is logged; it never
//! reaches the caller.
//!
//! Comment fields are HTML-escaped before interpolation.

#[cfg(test)]
#[path = "comment_feed_test.rs"]
mod comment_feed_test;

use crate::app::Portal;
use crate::dom::Page;
use crate::error::ClientError;
use crate::net::api::{self, Api, ApiRequest};
use crate::net::types::{Comment, CommentList};
use crate::state::session::SessionStore;
use crate::util::html::escape;

pub const EMPTY_MESSAGE: &str = r#"<p class="text-center">No comments yet. Be the first to comment!</p>"#;
pub const FAILED_MESSAGE: &str =
    r#"<p class="text-center text-danger">Failed to load comments. Please try again later.</p>"#;

/// What the last [`load`] left in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedRender {
    /// The page has no comment container.
    Skipped,
    Cards(usize),
    Empty,
    Failed,
}

/// Feed URL with a cache-busting timestamp.
#[must_use]
pub fn comments_url(endpoint: &str, now_ms: f64) -> String {
    let sep = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{sep}t={:.0}", now_ms.max(0.0).trunc())
}

#[must_use]
pub fn render_card(comment: &Comment) -> String {
    format!(
        r#"
<div class="card mb-3 shadow-sm">
    <div class="card-body">
        <h5 class="card-title">{}</h5>
        <p class="card-text">{}</p>
        <p class="card-text"><small class="text-muted">Posted on {}</small></p>
    </div>
</div>
"#,
        escape(&comment.name),
        escape(&comment.content),
        escape(&comment.created_at),
    )
}

#[must_use]
pub fn render_cards(comments: &[Comment]) -> String {
    comments.iter().map(render_card).collect()
}

async fn fetch<A: Api>(client: &A, url: String) -> Result<CommentList, ClientError> {
    let response = api::expect_ok(client.send(ApiRequest::get(url)).await?)?;
    response.json()
}

/// Fetch and render the feed if the page has a comment container.
pub async fn load<A: Api, P: Page, S: SessionStore>(portal: &Portal<A, P, S>) -> FeedRender {
    let config = &portal.config.comments;
    let page = &portal.page;
    if !page.exists(&config.container_selector) {
        return FeedRender::Skipped;
    }

    let url = comments_url(&config.endpoint, page.now_ms());
    let result = fetch(&portal.api, url).await;

    page.set_visible(&config.loading_selector, false);
    match result {
        Ok(list) if list.comments.is_empty() => {
            page.set_inner_html(&config.container_selector, EMPTY_MESSAGE);
            FeedRender::Empty
        }
        Ok(list) => {
            page.set_inner_html(&config.container_selector, &render_cards(&list.comments));
            FeedRender::Cards(list.comments.len())
        }
        Err(e) => {
            log::error!("Error loading comments: {e}");
            page.set_inner_html(&config.container_selector, FAILED_MESSAGE);
            FeedRender::Failed
        }
    }
}
