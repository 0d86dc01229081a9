#![forbid(unsafe_code)]

//! Element handles.
//!
//! An [`Element`] is an opaque reference to a node owned by the host
//! environment. The widget layer only needs identity, containment, focus,
//! inline-style access, and scroll extents; everything else (layout,
//! painting, event capture) stays on the host side of the seam.
//!
//! Handles are single-threaded [`Rc`] values. Weak handles are used where
//! the referent may outlive the widget's interest in it (previously focused
//! elements).

use core::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generated element ids.
static ELEMENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable identity for an element handle.
///
/// Two handles refer to the same underlying node iff their ids are equal.
/// Hosts that wrap native nodes should derive the id from the node itself;
/// synthetic environments can use [`ElementId::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a host-provided raw id.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Allocate a fresh process-unique id.
    pub fn generate() -> Self {
        Self(ELEMENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scroll extents of an element, in pixels.
///
/// `scroll_*` is the full content extent, `client_*` the visible inner
/// extent, `offset_*` the border-box extent. An axis overflows when its
/// content extent exceeds the visible extent; the scrollbar thickness on an
/// axis is the offset/client difference on the *opposite* axis measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    pub scroll_width: u32,
    pub client_width: u32,
    pub offset_width: u32,
    pub scroll_height: u32,
    pub client_height: u32,
    pub offset_height: u32,
}

impl ScrollMetrics {
    /// Whether content overflows horizontally.
    #[inline]
    pub fn overflows_x(&self) -> bool {
        self.scroll_width > self.client_width
    }

    /// Whether content overflows vertically.
    #[inline]
    pub fn overflows_y(&self) -> bool {
        self.scroll_height > self.client_height
    }

    /// Thickness of the vertical scrollbar (reclaimed width when hidden).
    #[inline]
    pub fn scrollbar_y(&self) -> u32 {
        self.offset_width.saturating_sub(self.client_width)
    }

    /// Thickness of the horizontal scrollbar (reclaimed height when hidden).
    #[inline]
    pub fn scrollbar_x(&self) -> u32 {
        self.offset_height.saturating_sub(self.client_height)
    }
}

/// Host-owned node reference.
///
/// Implementations must keep [`element_id`](Element::element_id) stable for
/// the life of the underlying node. All methods are infallible; a handle to
/// a node the host has since discarded should degrade to no-ops.
pub trait Element: fmt::Debug {
    /// Stable identity of the underlying node.
    fn element_id(&self) -> ElementId;

    /// Whether `other` is this node or a descendant of it.
    fn contains(&self, other: &dyn Element) -> bool;

    /// Move document focus to this node.
    fn focus(&self);

    /// Whether the node can currently receive focus.
    fn is_focusable(&self) -> bool {
        true
    }

    /// Current inline style string, `None` when no style attribute is set.
    fn inline_style(&self) -> Option<String>;

    /// Replace the inline style string; `None` removes the attribute.
    fn set_inline_style(&self, style: Option<&str>);

    /// Current scroll extents.
    fn scroll_metrics(&self) -> ScrollMetrics;
}

/// Shared element handle.
pub type ElementHandle = Rc<dyn Element>;

/// Weak element handle for references that must not keep the node alive.
pub type WeakElement = Weak<dyn Element>;

/// Whether two handles refer to the same underlying node.
#[inline]
pub fn same_element(a: &dyn Element, b: &dyn Element) -> bool {
    a.element_id() == b.element_id()
}
