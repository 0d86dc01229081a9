#![forbid(unsafe_code)]

//! Focus capture and restore.
//!
//! When an overlay takes focus it remembers what had it, as a weak handle
//! so a since-removed element is simply skipped on restore.

use std::rc::Rc;

use scrim_core::element::{ElementHandle, WeakElement};
use scrim_core::env::DocumentEnv;

/// Remembers the element focused before an overlay grabbed focus.
#[derive(Debug, Default)]
pub struct FocusMemory {
    previous: Option<WeakElement>,
}

impl FocusMemory {
    /// Record the currently focused element, then focus `target`.
    pub fn capture(&mut self, doc: &dyn DocumentEnv, target: &ElementHandle) {
        self.previous = doc.active_element().map(|el| Rc::downgrade(&el));
        target.focus();
    }

    /// Refocus the remembered element if it is still alive and focusable,
    /// clearing the record either way.
    pub fn restore(&mut self) {
        if let Some(previous) = self.previous.take().and_then(|weak| weak.upgrade())
            && previous.is_focusable()
        {
            previous.focus();
        }
    }

    /// Whether a previous element is recorded.
    pub fn holds_record(&self) -> bool {
        self.previous.is_some()
    }
}
