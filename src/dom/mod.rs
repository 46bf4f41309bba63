//! The slice of the page each component is allowed to touch.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components never call `web-sys` directly. They go through [`Page`] (for
//! document-level lookups and side effects) and [`Revealable`] (for scroll
//! animation targets), which the browser module implements over the live DOM.
//! Every selector-based call is a no-op when nothing matches.

#[cfg(feature = "browser")]
pub mod browser;

pub trait Page {
    /// Whether any element matches `selector`.
    fn exists(&self, selector: &str) -> bool;

    /// Set the inline `display` of the first match to `block` or `none`.
    fn set_visible(&self, selector: &str, visible: bool);

    /// Replace the children of the first match with `html`.
    fn set_inner_html(&self, selector: &str, html: &str);

    /// Blocking modal alert.
    fn alert(&self, message: &str);

    fn navigate(&self, path: &str);

    /// Restore the fields of the form with element id `form_id`.
    fn reset_form(&self, form_id: &str);

    /// Wall-clock milliseconds since the Unix epoch.
    fn now_ms(&self) -> f64;
}

/// An element the scroll animator may reveal.
pub trait Revealable {
    /// Distance in CSS pixels from the viewport top to the element's top edge.
    fn top(&self) -> f64;

    fn has_class(&self, class: &str) -> bool;

    fn add_class(&mut self, class: &str);
}
