#![forbid(unsafe_code)]

//! Modal overlay lifecycle: stage machine, stacking registry, scroll lock,
//! focus memory, event routing, and render projection.
//!
//! # Architecture
//!
//! An overlay is driven, never self-propelled. The host owns rendering,
//! portaling, and animation; [`ModalOverlay`] owns the coordination:
//!
//! 1. The host observes the show intent and calls
//!    [`ModalOverlay::set_show`].
//! 2. The overlay's [`StageMachine`] decides whether a transition begins;
//!    entering a transition triggers shared side effects (scroll lock,
//!    registry, event wiring) and the projection starts describing what to
//!    mount.
//! 3. The host mounts the projected parts, runs its enter/exit animations,
//!    and acknowledges each completion via [`ModalOverlay::part_entered`] /
//!    [`ModalOverlay::part_exited`].
//! 4. When every participating part has acknowledged, the stage settles and
//!    the remaining effects (focus, hooks) fire.
//!
//! The shared pieces (which overlays are open under a container, in what
//! order, and who owns a container's scroll lock) live in an
//! [`OverlayContext`] the application passes to each instance.
//!
//! # Example
//!
//! ```ignore
//! use scrim::modal::{ModalConfig, ModalHooks, ModalOverlay, OverlayContext, TransitionPart};
//!
//! let ctx = OverlayContext::new();
//! let mut overlay = ModalOverlay::new(
//!     doc,
//!     ctx.clone(),
//!     ModalConfig::default().document_clicks(true),
//!     ModalHooks::new().on_close_request(|action| println!("close: {action:?}")),
//!     false,
//! );
//!
//! overlay.set_show(true);
//! // ... host mounts overlay.projection(), animates, then:
//! overlay.part_entered(TransitionPart::Body);
//! overlay.part_entered(TransitionPart::Backdrop);
//! ```

mod config;
mod context;
mod events;
mod focus;
mod overlay;
mod projection;
mod registry;
mod scroll_lock;
mod stage;

pub use config::{ClassNames, ModalConfig, ModalHooks};
pub use context::OverlayContext;
pub use events::ModalAction;
pub use focus::FocusMemory;
pub use overlay::ModalOverlay;
pub use projection::{ModalProjection, PartProjection};
pub use registry::{ModalKey, OverlayRegistry};
pub use scroll_lock::ScrollLedger;
pub use stage::{
    Stage, StageEdge, StageEvent, StageMachine, TransitionDirection, TransitionPart,
    TransitionParts,
};
