//! Form submission over the JSON API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every portal form posts its fields as a flat JSON object to a fixed
//! endpoint. The server answers `{"error": ...}` on failure, whatever the HTTP
//! status, and a form-specific payload on success. What happens after a
//! success is declared per form in [`FORM_ROUTES`].
//!
//! ERROR HANDLING
//! ==============
//! An `error` body is shown to the user and ends the submission. Transport
//! and parse failures are returned to the caller and never alerted; the
//! browser binding only logs them.

#[cfg(test)]
#[path = "form_dispatch_test.rs"]
mod form_dispatch_test;

use serde_json::Value;

use crate::app::Portal;
use crate::components::comment_feed;
use crate::config::StorageKeys;
use crate::dom::Page;
use crate::error::ClientError;
use crate::net::api::{Api, ApiOutcome, ApiRequest};
use crate::net::types::{FormRecord, LoginGrant};
use crate::state::session::{self, Scope, SessionStore};

/// What a form does once the server accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnSuccess {
    /// Store the returned credentials, then navigate without an alert.
    SignIn { redirect: &'static str },
    AlertAndNavigate { message: &'static str, path: &'static str },
    AlertAndReset { message: &'static str },
    /// Reset the form and refresh the comment feed.
    AlertResetAndReload { message: &'static str },
    AlertOnly { message: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRoute {
    pub form_id: &'static str,
    pub endpoint: &'static str,
    pub on_success: OnSuccess,
}

pub static FORM_ROUTES: [FormRoute; 6] = [
    FormRoute {
        form_id: "register-form",
        endpoint: "/api/register",
        on_success: OnSuccess::AlertAndNavigate { message: "Registration successful! Please log in.", path: "/login" },
    },
    FormRoute {
        form_id: "login-form",
        endpoint: "/api/login",
        on_success: OnSuccess::SignIn { redirect: "/profile" },
    },
    FormRoute {
        form_id: "profile-form",
        endpoint: "/api/profile",
        on_success: OnSuccess::AlertOnly { message: "Profile updated successfully!" },
    },
    FormRoute {
        form_id: "contact-form",
        endpoint: "/api/contact",
        on_success: OnSuccess::AlertAndReset { message: "Message sent successfully!" },
    },
    FormRoute {
        form_id: "appointment-form",
        endpoint: "/api/appointments",
        on_success: OnSuccess::AlertAndReset { message: "Appointment scheduled successfully!" },
    },
    FormRoute {
        form_id: "comment-form",
        endpoint: "/api/comments",
        on_success: OnSuccess::AlertResetAndReload { message: "Comment submitted successfully!" },
    },
];

#[must_use]
pub fn route_for(form_id: &str) -> Option<&'static FormRoute> {
    FORM_ROUTES.iter().find(|route| route.form_id == form_id)
}

/// `POST` for `record`, authorized with the durable token when one is stored.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] if the record cannot be serialized.
pub fn build_request(
    route: &FormRoute,
    record: &FormRecord,
    store: &impl SessionStore,
    keys: &StorageKeys,
) -> Result<ApiRequest, ClientError> {
    Ok(ApiRequest::post_json(
        route.endpoint,
        session::authorization_header(store, keys),
        record.to_json()?,
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server's `error` text, already alerted.
    Rejected(String),
    Completed,
}

/// Post `record` for `route` and carry out its success action.
///
/// # Errors
///
/// Returns [`ClientError::Transport`], [`ClientError::Decode`] or
/// [`ClientError::UnexpectedBody`] when the exchange fails,
/// [`ClientError::MissingField`] when a login payload has no token, and
/// [`ClientError::Storage`] when the token cannot be persisted.
pub async fn submit<A: Api, P: Page, S: SessionStore>(
    portal: &Portal<A, P, S>,
    route: &FormRoute,
    record: &FormRecord,
) -> Result<SubmitOutcome, ClientError> {
    let request = build_request(route, record, &portal.session, &portal.config.storage)?;
    let response = portal.api.send(request).await?;
    let body: Value = response.json()?;

    match ApiOutcome::from_value(body)? {
        ApiOutcome::Rejected(message) => {
            log::info!("{} rejected (status {}): {message}", route.form_id, response.status);
            portal.page.alert(&message);
            Ok(SubmitOutcome::Rejected(message))
        }
        ApiOutcome::Accepted(payload) => {
            complete(portal, route, &payload).await?;
            Ok(SubmitOutcome::Completed)
        }
    }
}

async fn complete<A: Api, P: Page, S: SessionStore>(
    portal: &Portal<A, P, S>,
    route: &FormRoute,
    payload: &Value,
) -> Result<(), ClientError> {
    let page = &portal.page;
    match route.on_success {
        OnSuccess::SignIn { redirect } => {
            let grant = LoginGrant::from_payload(payload)?;
            let keys = &portal.config.storage;
            portal.session.set(Scope::Durable, &keys.token, &grant.token)?;
            match grant.user_id {
                Some(user_id) => {
                    if let Err(e) = portal.session.set(Scope::Session, &keys.user_id, &user_id) {
                        log::warn!("user id not persisted: {e}");
                    }
                }
                None => log::warn!("login payload carried no user id"),
            }
            page.navigate(redirect);
        }
        OnSuccess::AlertAndNavigate { message, path } => {
            page.alert(message);
            page.navigate(path);
        }
        OnSuccess::AlertAndReset { message } => {
            page.alert(message);
            page.reset_form(route.form_id);
        }
        OnSuccess::AlertResetAndReload { message } => {
            page.alert(message);
            page.reset_form(route.form_id);
            comment_feed::load(portal).await;
        }
        OnSuccess::AlertOnly { message } => page.alert(message),
    }
    Ok(())
}

/// Attach submit handlers to every routed form present on the page.
///
/// Returns the number of forms bound.
#[cfg(feature = "browser")]
pub fn bind_all(portal: &std::rc::Rc<crate::app::BrowserPortal>) -> usize {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use crate::dom::browser::{form_by_id, read_form};

    let mut bound = 0;
    for route in &FORM_ROUTES {
        let Some(form) = form_by_id(portal.page.document(), route.form_id) else {
            continue;
        };
        let portal = Rc::clone(portal);
        let target = form.clone();
        let on_submit = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            ev.prevent_default();
            let record = match read_form(&target) {
                Ok(record) => record,
                Err(e) => {
                    log::error!("{} could not be read: {e}", route.form_id);
                    return;
                }
            };
            let portal = Rc::clone(&portal);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = submit(&portal, route, &record).await {
                    log::error!("{} submission failed: {e}", route.form_id);
                }
            });
        });
        match form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref()) {
            Ok(()) => {
                log::debug!("bound {} -> {}", route.form_id, route.endpoint);
                bound += 1;
            }
            Err(e) => log::warn!("could not bind {}: {e:?}", route.form_id),
        }
        on_submit.forget();
    }
    bound
}
