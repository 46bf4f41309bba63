//! # portal-client
//!
//! WASM glue for the clinic portal's server-rendered pages.
//!
//! On load it toggles the navigation links from the stored credential, fades
//! in scroll-tagged sections, binds the portal forms to their JSON endpoints,
//! and renders the comment feed. Pure logic builds natively for tests; the
//! browser bindings sit behind the `browser` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Module entry point, run by the generated JS shim once the WASM is instantiated.
#[cfg(feature = "browser")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    app::boot();
}
