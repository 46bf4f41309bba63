//! Small helpers shared across components.

pub mod html;
