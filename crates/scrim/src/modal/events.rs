#![forbid(unsafe_code)]

//! Document-level event routing.
//!
//! The host attaches real listeners while an overlay wants them (see
//! [`ModalOverlay::wants_document_events`]) and forwards each event here.
//! Routing is pure: it inspects the event against the instance's gates and
//! names the close-request cause, or stays silent. It never mutates stage.
//!
//! Escape is gated on being topmost in the shared registry, so with several
//! overlays open under one container only the innermost responds. Outside
//! clicks are an explicit opt-in and require the mounted root to be known;
//! until the portal reports it, containment cannot be checked and clicks
//! are ignored.
//!
//! [`ModalOverlay::wants_document_events`]: crate::modal::ModalOverlay::wants_document_events

use scrim_core::element::ElementHandle;
use scrim_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Cause of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModalAction {
    /// Escape was pressed while this overlay was topmost.
    EscapePressed,
    /// A document click landed outside the overlay root.
    OutsideClicked,
    /// The backdrop was clicked.
    BackdropClicked,
}

/// Per-event routing gates derived from config and shared state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RouteGates<'a> {
    pub close_on_escape: bool,
    pub document_clicks: bool,
    pub topmost: bool,
    pub root: Option<&'a ElementHandle>,
}

/// Route one document-level event against the gates.
pub(crate) fn route(event: &Event, gates: &RouteGates<'_>) -> Option<ModalAction> {
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Escape,
            kind: KeyEventKind::Press,
            ..
        }) if gates.close_on_escape && gates.topmost => Some(ModalAction::EscapePressed),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            target,
        }) if gates.document_clicks => {
            let root = gates.root?;
            match target {
                Some(target) if root.contains(target.as_ref()) => None,
                // No target means the click hit the bare document, which is
                // never inside the overlay root.
                _ => Some(ModalAction::OutsideClicked),
            }
        }
        _ => None,
    }
}
