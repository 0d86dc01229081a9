#![forbid(unsafe_code)]

//! Platform handles, input events, and scroll-style utilities for Scrim.
//!
//! Scrim's widget layer never touches a real document. Everything it needs
//! from the host environment arrives through the narrow handle traits in
//! this crate:
//!
//! - [`Element`] / [`DocumentEnv`]: injected references to the container,
//!   the overlay root, and the document's focus state.
//! - [`event::Event`]: document-level input fed in by the host.
//! - [`scroll_style`]: computes and restores the inline-style overrides
//!   that suppress container scrolling while an overlay is up.
//!
//! With the `test-helpers` feature enabled, [`fake`] provides an in-memory
//! document environment so the whole lifecycle can be driven without any
//! rendering backend.

pub mod element;
pub mod env;
pub mod event;
pub mod scroll_style;

#[cfg(feature = "test-helpers")]
pub mod fake;

pub use element::{Element, ElementHandle, ElementId, ScrollMetrics, WeakElement};
pub use env::{DocumentEnv, DocumentHandle};
