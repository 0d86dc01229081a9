#![forbid(unsafe_code)]

//! Scroll-lock ownership ledger.
//!
//! When several overlays share one container, only the first to open pays
//! for the style mutation and only that owner restores it on close. The
//! intermediate overlays' acquire/release calls are no-ops, which keeps the
//! container's style stable across nested open/close churn.
//!
//! # Invariants
//!
//! - At most one lock entry per container; the entry records the owner key
//!   and the container's pre-lock inline style.
//! - `release` restores exactly the string captured at acquisition time,
//!   and only when called by the recorded owner.

use std::cell::RefCell;
use std::collections::HashMap;

use scrim_core::element::{ElementHandle, ElementId};
use scrim_core::scroll_style;

use crate::modal::registry::ModalKey;

#[derive(Debug)]
struct LockEntry {
    owner: ModalKey,
    previous: Option<String>,
}

/// Shared per-container scroll-lock state.
#[derive(Debug, Default)]
pub struct ScrollLedger {
    locks: RefCell<HashMap<ElementId, LockEntry, ahash::RandomState>>,
}

impl ScrollLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress scrolling on `container`, recording `owner` as the lock
    /// holder. No-op when the container is already locked.
    pub fn acquire(&self, container: &ElementHandle, owner: &ModalKey) {
        let id = container.element_id();
        let mut locks = self.locks.borrow_mut();
        if locks.contains_key(&id) {
            return;
        }
        let previous = scroll_style::suppress(container.as_ref());
        locks.insert(
            id,
            LockEntry {
                owner: owner.clone(),
                previous,
            },
        );
    }

    /// Restore `container`'s pre-lock style. No-op unless `owner` holds the
    /// lock.
    pub fn release(&self, container: &ElementHandle, owner: &ModalKey) {
        let id = container.element_id();
        let mut locks = self.locks.borrow_mut();
        match locks.get(&id) {
            Some(entry) if entry.owner == *owner => {}
            _ => return,
        }
        if let Some(entry) = locks.remove(&id) {
            scroll_style::restore(container.as_ref(), entry.previous.as_deref());
        }
    }

    /// The key currently holding `container`'s lock, if any.
    pub fn owner(&self, container: ElementId) -> Option<ModalKey> {
        self.locks
            .borrow()
            .get(&container)
            .map(|entry| entry.owner.clone())
    }

    /// Whether `container` is currently locked.
    pub fn is_locked(&self, container: ElementId) -> bool {
        self.locks.borrow().contains_key(&container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrim_core::element::Element;
    use scrim_core::element::ScrollMetrics;
    use scrim_core::fake::FakeDocument;

    fn overflowing() -> ScrollMetrics {
        ScrollMetrics {
            scroll_width: 900,
            client_width: 985,
            offset_width: 1000,
            scroll_height: 2400,
            client_height: 700,
            offset_height: 715,
        }
    }

    #[test]
    fn first_acquirer_owns_the_lock() {
        let doc = FakeDocument::new();
        let body = doc.body_element();
        body.set_scroll_metrics(overflowing());
        let container = body.handle();

        let ledger = ScrollLedger::new();
        let (a, b) = (ModalKey::new("a"), ModalKey::new("b"));

        ledger.acquire(&container, &a);
        let locked = body.inline_style();
        assert!(locked.is_some());
        assert_eq!(ledger.owner(container.element_id()), Some(a.clone()));

        // Second acquirer is a no-op: ownership and style are unchanged.
        ledger.acquire(&container, &b);
        assert_eq!(ledger.owner(container.element_id()), Some(a.clone()));
        assert_eq!(body.inline_style(), locked);
    }

    #[test]
    fn release_by_non_owner_is_noop() {
        let doc = FakeDocument::new();
        let body = doc.body_element();
        body.set_scroll_metrics(overflowing());
        let container = body.handle();

        let ledger = ScrollLedger::new();
        let (a, b) = (ModalKey::new("a"), ModalKey::new("b"));

        ledger.acquire(&container, &a);
        let locked = body.inline_style();

        ledger.release(&container, &b);
        assert!(ledger.is_locked(container.element_id()));
        assert_eq!(body.inline_style(), locked);
    }

    #[test]
    fn owner_release_restores_captured_style() {
        let doc = FakeDocument::new();
        let body = doc.body_element();
        body.set_inline_style(Some("margin:0"));
        body.set_scroll_metrics(overflowing());
        let container = body.handle();

        let ledger = ScrollLedger::new();
        let a = ModalKey::new("a");

        ledger.acquire(&container, &a);
        assert_ne!(body.inline_style().as_deref(), Some("margin:0"));

        ledger.release(&container, &a);
        assert_eq!(body.inline_style().as_deref(), Some("margin:0"));
        assert!(!ledger.is_locked(container.element_id()));
    }

    #[test]
    fn release_clears_absent_previous_style() {
        let doc = FakeDocument::new();
        let body = doc.body_element();
        body.set_scroll_metrics(overflowing());
        let container = body.handle();

        let ledger = ScrollLedger::new();
        let a = ModalKey::new("a");

        ledger.acquire(&container, &a);
        assert!(body.inline_style().is_some());

        ledger.release(&container, &a);
        assert_eq!(body.inline_style(), None);
    }

    #[test]
    fn double_release_is_noop() {
        let doc = FakeDocument::new();
        let body = doc.body_element();
        body.set_scroll_metrics(overflowing());
        let container = body.handle();

        let ledger = ScrollLedger::new();
        let a = ModalKey::new("a");

        ledger.acquire(&container, &a);
        ledger.release(&container, &a);
        ledger.release(&container, &a);
        assert_eq!(body.inline_style(), None);
    }
}
