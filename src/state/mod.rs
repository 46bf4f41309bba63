//! Client-side persisted state.
//!
//! DESIGN
//! ======
//! Browser storage is reached only through [`session::SessionStore`] so each
//! component can be exercised against an in-memory store.

pub mod session;
