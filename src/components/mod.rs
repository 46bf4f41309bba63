//! Page behaviors bound at load.
//!
//! DESIGN
//! ======
//! Each behavior is independent and written against the [`crate::dom`] and
//! [`crate::state`] seams. The only cross-link is the comment form reloading
//! the comment feed after a successful post.

pub mod comment_feed;
pub mod form_dispatch;
pub mod nav_links;
pub mod scroll_reveal;
