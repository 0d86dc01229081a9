#![forbid(unsafe_code)]

//! Per-container stacks of open overlays.
//!
//! The registry answers one question: which overlay under a given container
//! is topmost right now? Escape-key routing consults it so only the most
//! recently opened overlay responds.
//!
//! # Invariants
//!
//! - A key is registered under at most one container at a time; the overlay
//!   orchestrator registers on entering `Opening` and unregisters on
//!   reaching `Closed`, so presence tracks "stage is not `Closed`".
//! - Registration/unregistration pairs are balanced across an overlay's
//!   lifetime, including the forced-cleanup path.
//!
//! # Failure Modes
//!
//! - Unregistering an unknown key is a silent no-op.
//! - Registering a key that is already live under the same container is a
//!   caller bug (duplicate user-supplied ids); `debug_assert` flags it in
//!   development builds.

use core::fmt;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use scrim_core::element::ElementId;

/// Global counter for generated overlay keys.
static MODAL_KEY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of one overlay instance.
///
/// Either caller-supplied (must be unique among concurrently open overlays
/// sharing a container) or generated via [`ModalKey::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModalKey(String);

impl ModalKey {
    /// Wrap a caller-supplied id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Allocate a fresh process-unique key.
    pub fn generate() -> Self {
        Self(format!("scrim-{}", MODAL_KEY_COUNTER.fetch_add(1, Ordering::Relaxed)))
    }

    /// The key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModalKey {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModalKey {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Shared mapping from container to its stack of open overlay keys.
///
/// Interior-mutable so a shared handle can serve every overlay instance;
/// the whole system is single-threaded, so a `RefCell` suffices.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    stacks: RefCell<HashMap<ElementId, Vec<ModalKey>, ahash::RandomState>>,
}

impl OverlayRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `key` onto `container`'s stack (it becomes topmost).
    pub fn register(&self, container: ElementId, key: &ModalKey) {
        let mut stacks = self.stacks.borrow_mut();
        let stack = stacks.entry(container).or_default();
        debug_assert!(
            !stack.contains(key),
            "duplicate overlay key {key} registered under {container}"
        );
        stack.push(key.clone());
    }

    /// Remove `key` from `container`'s stack, dropping the container entry
    /// when its stack empties.
    pub fn unregister(&self, container: ElementId, key: &ModalKey) {
        let mut stacks = self.stacks.borrow_mut();
        if let Some(stack) = stacks.get_mut(&container) {
            if let Some(position) = stack.iter().position(|k| k == key) {
                stack.remove(position);
            }
            if stack.is_empty() {
                stacks.remove(&container);
            }
        }
    }

    /// Whether `key` is the most recently opened overlay under `container`.
    pub fn is_topmost(&self, container: ElementId, key: &ModalKey) -> bool {
        self.stacks
            .borrow()
            .get(&container)
            .and_then(|stack| stack.last())
            .is_some_and(|top| top == key)
    }

    /// The topmost key under `container`, if any overlay is open there.
    pub fn top(&self, container: ElementId) -> Option<ModalKey> {
        self.stacks
            .borrow()
            .get(&container)
            .and_then(|stack| stack.last())
            .cloned()
    }

    /// Number of overlays currently open under `container`.
    pub fn depth(&self, container: ElementId) -> usize {
        self.stacks
            .borrow()
            .get(&container)
            .map_or(0, Vec::len)
    }

    /// Whether `key` is currently open under `container`.
    pub fn contains(&self, container: ElementId, key: &ModalKey) -> bool {
        self.stacks
            .borrow()
            .get(&container)
            .is_some_and(|stack| stack.contains(key))
    }
}
