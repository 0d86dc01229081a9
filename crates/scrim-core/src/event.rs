#![forbid(unsafe_code)]

//! Document-level input events.
//!
//! The host forwards keyboard and mouse input to open overlays through this
//! vocabulary. Mouse events carry the target element handle rather than
//! coordinates: containment checks ("was this click inside the overlay
//! root?") are identity-based, not geometric.

use bitflags::bitflags;

use crate::element::ElementHandle;

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Key identity for the keys overlays care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Enter,
    Tab,
    Char(char),
}

/// Phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Press,
    Repeat,
    Release,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a plain key press with no modifiers.
    pub fn press(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }
}

/// Mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Phase of a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
}

/// A mouse event with its target element.
///
/// `target` is `None` when the event happened on the document itself with
/// no element underneath (synthetic environments mostly).
#[derive(Debug, Clone)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub target: Option<ElementHandle>,
}

impl MouseEvent {
    /// Create a left-button press on the given target.
    pub fn left_down(target: Option<ElementHandle>) -> Self {
        Self {
            kind: MouseEventKind::Down(MouseButton::Left),
            target,
        }
    }
}

/// A document-level input event.
#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
}
