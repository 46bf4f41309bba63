//! `web-sys` implementations of the page seams.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, Window};

use super::{Page, Revealable};
use crate::error::ClientError;
use crate::net::types::FormRecord;

pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn first(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).unwrap_or(None)
    }
}

impl Page for BrowserPage {
    fn exists(&self, selector: &str) -> bool {
        self.first(selector).is_some()
    }

    fn set_visible(&self, selector: &str, visible: bool) {
        let Some(el) = self.first(selector).and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
            return;
        };
        let display = if visible { "block" } else { "none" };
        if let Err(e) = el.style().set_property("display", display) {
            log::debug!("could not set display on {selector}: {e:?}");
        }
    }

    fn set_inner_html(&self, selector: &str, html: &str) {
        if let Some(el) = self.first(selector) {
            el.set_inner_html(html);
        }
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("alert suppressed: {e:?}");
        }
    }

    fn navigate(&self, path: &str) {
        if let Err(e) = self.window.location().set_href(path) {
            log::error!("navigation to {path} failed: {e:?}");
        }
    }

    fn reset_form(&self, form_id: &str) {
        if let Some(form) = form_by_id(&self.document, form_id) {
            form.reset();
        }
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

impl Revealable for Element {
    fn top(&self) -> f64 {
        self.get_bounding_client_rect().top()
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&mut self, class: &str) {
        if let Err(e) = self.class_list().add_1(class) {
            log::debug!("could not add class {class}: {e:?}");
        }
    }
}

#[must_use]
pub fn form_by_id(document: &Document, form_id: &str) -> Option<HtmlFormElement> {
    document.get_element_by_id(form_id)?.dyn_into::<HtmlFormElement>().ok()
}

/// Every element matching `selector`, in document order.
#[must_use]
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

#[must_use]
pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

/// Current field values of `form`. Non-text entries (file inputs) are skipped.
///
/// # Errors
///
/// Returns [`ClientError::Dom`] if the browser cannot build `FormData`.
pub fn read_form(form: &HtmlFormElement) -> Result<FormRecord, ClientError> {
    let js_err = |e: wasm_bindgen::JsValue| ClientError::Dom(format!("{e:?}"));

    let data = web_sys::FormData::new_with_form(form).map_err(js_err)?;
    let mut record = FormRecord::new();
    let Some(entries) = js_sys::try_iter(&data).map_err(js_err)? else {
        return Ok(record);
    };
    for entry in entries {
        let pair = js_sys::Array::from(&entry.map_err(js_err)?);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            record.insert(name, value);
        }
    }
    Ok(record)
}
