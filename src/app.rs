//! Portal wiring: the shared context and the browser boot sequence.

use crate::config::ClientConfig;

/// Everything a component may use: config, transport, page, and storage.
pub struct Portal<A, P, S> {
    pub config: ClientConfig,
    pub api: A,
    pub page: P,
    pub session: S,
}

impl<A, P, S> Portal<A, P, S> {
    #[must_use]
    pub fn new(config: ClientConfig, api: A, page: P, session: S) -> Self {
        Self { config, api, page, session }
    }
}

#[cfg(feature = "browser")]
pub type BrowserPortal =
    Portal<crate::net::api::GlooApi, crate::dom::browser::BrowserPage, crate::state::session::BrowserSession>;

/// Install logging, start the scroll animator, and bind the page once the DOM is parsed.
#[cfg(feature = "browser")]
pub fn boot() {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use crate::components::scroll_reveal;
    use crate::dom::browser::BrowserPage;
    use crate::net::api::GlooApi;
    use crate::state::session::BrowserSession;

    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let (config, rejected) = crate::config::from_document(&document);
    if console_log::init_with_level(config.level().unwrap_or(log::Level::Info)).is_err() {
        log::debug!("logger already installed");
    }
    if let Some(e) = rejected {
        log::warn!("{e}; using defaults");
    }

    // Scroll reveal does not wait for DOMContentLoaded.
    scroll_reveal::run_pass(&window, &document, &config.reveal);
    scroll_reveal::install(&window, &document, config.reveal.clone());

    let portal = Rc::new(Portal::new(
        config,
        GlooApi,
        BrowserPage::new(window.clone(), document.clone()),
        BrowserSession::from_window(&window),
    ));

    if document.ready_state() == "loading" {
        let ready = Closure::once_into_js(move || on_ready(&portal));
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref()) {
            log::error!("could not wait for DOMContentLoaded: {e:?}");
        }
    } else {
        on_ready(&portal);
    }
}

#[cfg(feature = "browser")]
fn on_ready(portal: &std::rc::Rc<BrowserPortal>) {
    use crate::components::{comment_feed, form_dispatch, nav_links};

    let visibility = nav_links::apply(&portal.page, &portal.session, &portal.config);
    nav_links::install_sign_out(portal);
    let bound = form_dispatch::bind_all(portal);
    log::debug!("portal ready: signed_in={}, forms={bound}", visibility.logout);

    let portal = std::rc::Rc::clone(portal);
    wasm_bindgen_futures::spawn_local(async move {
        comment_feed::load(&portal).await;
    });
}
