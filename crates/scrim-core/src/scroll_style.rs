#![forbid(unsafe_code)]

//! Scroll-suppression style overrides.
//!
//! While an overlay is up, its container must not scroll. Hiding overflow
//! removes the scrollbars, which would otherwise shift layout by the
//! scrollbar thickness; the overrides compensate by widening the padding on
//! the opposite edge.
//!
//! # Invariants
//!
//! - Only axes that currently overflow are hidden; padding compensation is
//!   emitted only for an axis whose scrollbar is actually being removed.
//! - [`suppress`] returns exactly what [`restore`] needs: the previous
//!   inline style string, `None` when the attribute was absent.
//! - `restore(el, suppress(el))` leaves the element's inline style as it
//!   was before suppression.

use core::fmt::Write as _;

use crate::element::{Element, ScrollMetrics};

/// Computed style overrides that suppress scrolling on a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOverrides {
    /// Hide horizontal overflow.
    pub hide_x: bool,
    /// Hide vertical overflow.
    pub hide_y: bool,
    /// Extra right padding replacing the vertical scrollbar, in pixels.
    pub pad_right: u32,
    /// Extra bottom padding replacing the horizontal scrollbar, in pixels.
    pub pad_bottom: u32,
}

impl ScrollOverrides {
    /// Compute the overrides needed for a container with these extents.
    pub fn for_metrics(metrics: &ScrollMetrics) -> Self {
        let hide_x = metrics.overflows_x();
        let hide_y = metrics.overflows_y();
        Self {
            hide_x,
            hide_y,
            pad_right: if hide_y { metrics.scrollbar_y() } else { 0 },
            pad_bottom: if hide_x { metrics.scrollbar_x() } else { 0 },
        }
    }

    /// Whether no override is needed (nothing overflows).
    pub fn is_empty(&self) -> bool {
        !self.hide_x && !self.hide_y
    }

    /// Render the override declarations as an inline-style fragment.
    pub fn declarations(&self) -> String {
        let mut out = String::new();
        match (self.hide_x, self.hide_y) {
            (true, true) => out.push_str("overflow:hidden"),
            (true, false) => out.push_str("overflow-x:hidden"),
            (false, true) => out.push_str("overflow-y:hidden"),
            (false, false) => {}
        }
        if self.pad_right > 0 {
            if !out.is_empty() {
                out.push(';');
            }
            let _ = write!(out, "padding-right:{}px", self.pad_right);
        }
        if self.pad_bottom > 0 {
            if !out.is_empty() {
                out.push(';');
            }
            let _ = write!(out, "padding-bottom:{}px", self.pad_bottom);
        }
        out
    }
}

/// Append override declarations to an existing inline style string.
pub fn compose(previous: Option<&str>, overrides: &ScrollOverrides) -> String {
    let decls = overrides.declarations();
    let prev = previous
        .unwrap_or("")
        .trim()
        .trim_end_matches(';')
        .trim_end();
    if prev.is_empty() {
        decls
    } else if decls.is_empty() {
        prev.to_owned()
    } else {
        format!("{prev};{decls}")
    }
}

/// Apply scroll suppression to a container.
///
/// Returns the container's previous inline style string so the caller can
/// hand it back to [`restore`] later. When nothing overflows the style is
/// left untouched; the return value is still the current style so the
/// restore path stays uniform.
pub fn suppress(element: &dyn Element) -> Option<String> {
    let previous = element.inline_style();
    let overrides = ScrollOverrides::for_metrics(&element.scroll_metrics());
    if !overrides.is_empty() {
        let locked = compose(previous.as_deref(), &overrides);
        element.set_inline_style(Some(&locked));
    }
    previous
}

/// Reinstate a previously captured inline style.
///
/// `None` clears the style attribute entirely.
pub fn restore(element: &dyn Element, previous: Option<&str>) {
    element.set_inline_style(previous);
}
