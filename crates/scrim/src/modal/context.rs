#![forbid(unsafe_code)]

//! Shared overlay context.
//!
//! One [`OverlayContext`] per application (or per isolated test) replaces
//! the process-wide singletons a modal system traditionally leans on. The
//! application root creates it and hands a clone to every overlay; clones
//! share the same registry and scroll ledger.

use std::rc::Rc;

use crate::modal::registry::OverlayRegistry;
use crate::modal::scroll_lock::ScrollLedger;

#[derive(Debug, Default)]
struct ContextInner {
    registry: OverlayRegistry,
    scroll: ScrollLedger,
}

/// Cheaply clonable handle to the shared registry and scroll ledger.
#[derive(Debug, Clone, Default)]
pub struct OverlayContext {
    inner: Rc<ContextInner>,
}

impl OverlayContext {
    /// Create a fresh, empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared stacking registry.
    pub fn registry(&self) -> &OverlayRegistry {
        &self.inner.registry
    }

    /// The shared scroll-lock ledger.
    pub fn scroll(&self) -> &ScrollLedger {
        &self.inner.scroll
    }
}
