//! In-memory doubles for the transport, the page, and reveal targets.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::app::Portal;
use crate::config::ClientConfig;
use crate::dom::{Page, Revealable};
use crate::error::ClientError;
use crate::net::api::{Api, ApiRequest, ApiResponse};
use crate::state::session::MemorySession;

pub type TestPortal = Portal<ScriptedApi, FakePage, MemorySession>;

pub fn portal(api: ScriptedApi, page: FakePage, session: MemorySession) -> TestPortal {
    Portal::new(ClientConfig::default(), api, page, session)
}

// =============================================================
// ScriptedApi
// =============================================================

/// Replies with queued results in order and records every request.
#[derive(Default)]
pub struct ScriptedApi {
    replies: RefCell<VecDeque<Result<ApiResponse, ClientError>>>,
    pub requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedApi {
    pub fn replying(status: u16, body: &str) -> Self {
        let api = Self::default();
        api.then(status, body);
        api
    }

    pub fn failing(message: &str) -> Self {
        let api = Self::default();
        api.replies.borrow_mut().push_back(Err(ClientError::Transport(message.to_owned())));
        api
    }

    pub fn then(&self, status: u16, body: &str) -> &Self {
        self.replies.borrow_mut().push_back(Ok(ApiResponse { status, body: body.to_owned() }));
        self
    }

    pub fn request(&self, index: usize) -> ApiRequest {
        self.requests.borrow()[index].clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Api for ScriptedApi {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted reply".to_owned())))
    }
}

// =============================================================
// FakePage
// =============================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Alert(String),
    Navigate(String),
    Reset(String),
}

/// Page with a fixed set of present selectors. Records side effects.
pub struct FakePage {
    present: HashSet<String>,
    pub now_ms: f64,
    pub events: RefCell<Vec<PageEvent>>,
    pub visible: RefCell<HashMap<String, bool>>,
    pub html: RefCell<HashMap<String, String>>,
}

impl FakePage {
    pub fn with(selectors: &[&str]) -> Self {
        Self {
            present: selectors.iter().map(|s| (*s).to_owned()).collect(),
            now_ms: 1_700_000_000_000.0,
            events: RefCell::default(),
            visible: RefCell::default(),
            html: RefCell::default(),
        }
    }

    pub fn empty() -> Self {
        Self::with(&[])
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.events.borrow().clone()
    }

    pub fn visibility(&self, selector: &str) -> Option<bool> {
        self.visible.borrow().get(selector).copied()
    }

    pub fn html_of(&self, selector: &str) -> Option<String> {
        self.html.borrow().get(selector).cloned()
    }
}

impl Page for FakePage {
    fn exists(&self, selector: &str) -> bool {
        self.present.contains(selector)
    }

    fn set_visible(&self, selector: &str, visible: bool) {
        if self.exists(selector) {
            self.visible.borrow_mut().insert(selector.to_owned(), visible);
        }
    }

    fn set_inner_html(&self, selector: &str, html: &str) {
        if self.exists(selector) {
            self.html.borrow_mut().insert(selector.to_owned(), html.to_owned());
        }
    }

    fn alert(&self, message: &str) {
        self.events.borrow_mut().push(PageEvent::Alert(message.to_owned()));
    }

    fn navigate(&self, path: &str) {
        self.events.borrow_mut().push(PageEvent::Navigate(path.to_owned()));
    }

    fn reset_form(&self, form_id: &str) {
        self.events.borrow_mut().push(PageEvent::Reset(form_id.to_owned()));
    }

    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

// =============================================================
// FakeElement
// =============================================================

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub top: f64,
    pub classes: Vec<String>,
    pub adds: usize,
}

impl FakeElement {
    pub fn at(top: f64) -> Self {
        Self { top, ..Self::default() }
    }
}

impl Revealable for FakeElement {
    fn top(&self) -> f64 {
        self.top
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        self.adds += 1;
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }
}
