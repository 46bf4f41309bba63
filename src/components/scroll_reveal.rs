//! Scroll-triggered fade-in.
//!
//! Elements tagged for reveal gain the animation classes the first time a
//! pass sees their top edge above the threshold line. Classes are only ever
//! added, so an element stays revealed after scrolling back out of view.
//!
//! Scroll events are coalesced: at most one pass runs per animation frame.

#[cfg(test)]
#[path = "scroll_reveal_test.rs"]
mod scroll_reveal_test;

use std::cell::Cell;

use crate::config::RevealConfig;
use crate::dom::Revealable;

#[must_use]
pub fn is_in_view(top: f64, viewport_height: f64, threshold: f64) -> bool {
    top < viewport_height * threshold
}

/// Add the reveal classes to every in-view target. Returns how many targets
/// gained at least one class.
pub fn reveal_pass<T: Revealable>(targets: &mut [T], viewport_height: f64, config: &RevealConfig) -> usize {
    let mut revealed = 0;
    for target in targets.iter_mut() {
        if !is_in_view(target.top(), viewport_height, config.threshold) {
            continue;
        }
        let mut changed = false;
        for class in &config.classes {
            if !target.has_class(class) {
                target.add_class(class);
                changed = true;
            }
        }
        if changed {
            revealed += 1;
        }
    }
    revealed
}

/// One-slot latch that lets a burst of scroll events schedule a single frame.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Cell<bool>,
}

impl FrameGate {
    /// Claim the slot. Returns `false` while a frame is already pending.
    pub fn try_schedule(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn complete(&self) {
        self.pending.set(false);
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

/// Run one pass over the live document.
#[cfg(feature = "browser")]
pub fn run_pass(window: &web_sys::Window, document: &web_sys::Document, config: &RevealConfig) -> usize {
    let mut targets = crate::dom::browser::query_all(document, &config.selector);
    let revealed = reveal_pass(&mut targets, crate::dom::browser::viewport_height(window), config);
    if revealed > 0 {
        log::trace!("revealed {revealed} element(s)");
    }
    revealed
}

/// Listen for window scrolls and run a pass on the next animation frame.
#[cfg(feature = "browser")]
pub fn install(window: &web_sys::Window, document: &web_sys::Document, config: RevealConfig) {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let gate = Rc::new(FrameGate::default());
    let config = Rc::new(config);
    let win = window.clone();
    let doc = document.clone();

    let on_scroll = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        if !gate.try_schedule() {
            return;
        }
        let (gate_cb, config_cb, win_cb, doc_cb) = (Rc::clone(&gate), Rc::clone(&config), win.clone(), doc.clone());
        let frame = Closure::once_into_js(move |_ts: f64| {
            run_pass(&win_cb, &doc_cb, &config_cb);
            gate_cb.complete();
        });
        if win.request_animation_frame(frame.unchecked_ref()).is_err() {
            run_pass(&win, &doc, &config);
            gate.complete();
        }
    });
    if let Err(e) = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref()) {
        log::warn!("could not bind scroll listener: {e:?}");
    }
    on_scroll.forget();
}
