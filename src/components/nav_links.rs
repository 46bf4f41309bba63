//! Login/register/logout link visibility driven by the stored credential.

#[cfg(test)]
#[path = "nav_links_test.rs"]
mod nav_links_test;

use crate::config::{ClientConfig, StorageKeys};
use crate::dom::Page;
use crate::error::ClientError;
use crate::state::session::{self, Scope, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavVisibility {
    pub logout: bool,
    pub login: bool,
    pub register: bool,
}

impl NavVisibility {
    #[must_use]
    pub fn for_signed_in(signed_in: bool) -> Self {
        Self { logout: signed_in, login: !signed_in, register: !signed_in }
    }
}

/// Visibility implied by the credential marker alone.
#[must_use]
pub fn resolve(store: &impl SessionStore, keys: &StorageKeys) -> NavVisibility {
    NavVisibility::for_signed_in(session::credential_marker(store, keys).is_some())
}

/// Resolve and write link visibility. Links missing from the page are skipped.
#[must_use]
pub fn apply(page: &impl Page, store: &impl SessionStore, config: &ClientConfig) -> NavVisibility {
    let visibility = resolve(store, &config.storage);
    page.set_visible(&config.nav.logout_selector, visibility.logout);
    page.set_visible(&config.nav.login_selector, visibility.login);
    page.set_visible(&config.nav.register_selector, visibility.register);
    visibility
}

/// Forget the credential marker in both stores.
///
/// Both removals are attempted; the first failure is returned.
///
/// # Errors
///
/// Returns [`ClientError::Storage`] when a store rejects the removal.
pub fn sign_out(store: &impl SessionStore, keys: &StorageKeys) -> Result<(), ClientError> {
    let durable = store.remove(Scope::Durable, &keys.token);
    let session = store.remove(Scope::Session, &keys.user_id);
    durable.and(session)
}

/// Clear credentials when the logout link is clicked, then let the link navigate.
#[cfg(feature = "browser")]
pub fn install_sign_out(portal: &std::rc::Rc<crate::app::BrowserPortal>) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    if !portal.config.nav.clear_on_logout {
        return;
    }
    let Ok(Some(link)) = portal.page.document().query_selector(&portal.config.nav.logout_selector) else {
        return;
    };
    let portal = std::rc::Rc::clone(portal);
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        if let Err(e) = sign_out(&portal.session, &portal.config.storage) {
            log::warn!("sign-out left credentials behind: {e}");
        }
    });
    if let Err(e) = link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
        log::warn!("could not bind logout link: {e:?}");
    }
    on_click.forget();
}
