#![forbid(unsafe_code)]

//! Modal overlay lifecycle for Scrim.
//!
//! This crate coordinates everything around a modal except the pixels:
//! open/close staging against asynchronous enter/exit animations, stacking
//! of concurrently open overlays, scroll suppression on the shared
//! container, focus capture/restore, and Escape / outside-click close
//! requests. Rendering, portaling, and animation timing belong to the host;
//! the seams are described in [`scrim_core`].

pub mod modal;

pub use modal::{
    ClassNames, ModalAction, ModalConfig, ModalHooks, ModalKey, ModalOverlay, ModalProjection,
    OverlayContext, PartProjection, Stage, TransitionPart, TransitionParts,
};
