#![forbid(unsafe_code)]

//! Per-instance overlay orchestration.
//!
//! [`ModalOverlay`] owns one stage machine and maps its edges onto the
//! shared registry, the scroll ledger, focus memory, and the lifecycle
//! hooks. The host drives it with four inputs: show-intent changes,
//! animation acknowledgments, document events, and the mounted root from
//! its portal.
//!
//! # Effect ordering
//!
//! - Entering `Opening` (or mounting already open): `before_open`, scroll
//!   lock, registry registration, event wiring.
//! - Reaching `Opened`: focus capture (deferred until the portal reports a
//!   root), `on_open`, then re-observation of the stored intent.
//! - Entering `Closing`: `before_close`.
//! - Reaching `Closed`: registry deregistration, event unwiring, focus
//!   restore, scroll release, `on_close`, then intent re-observation.
//!
//! # Invariants
//!
//! - Open-side resources are acquired at most once per open cycle and
//!   released exactly once, even when a forced cleanup races a natural
//!   completion.
//! - An intent flip absorbed mid-transition is re-applied when the
//!   in-flight transition completes, so the overlay always settles on the
//!   last requested state.
//!
//! # Failure Modes
//!
//! - Dropping an overlay that is not `Closed` runs the forced cleanup, so
//!   shared state never leaks a dead key.

use tracing::{debug, trace};

use scrim_core::element::ElementHandle;
use scrim_core::env::DocumentHandle;
use scrim_core::event::Event;

use crate::modal::config::{ModalConfig, ModalHooks};
use crate::modal::context::OverlayContext;
use crate::modal::events::{self, ModalAction, RouteGates};
use crate::modal::focus::FocusMemory;
use crate::modal::projection::{self, ModalProjection};
use crate::modal::registry::ModalKey;
use crate::modal::stage::{
    Stage, StageEdge, StageEvent, StageMachine, TransitionDirection, TransitionPart,
};

/// One modal overlay instance.
pub struct ModalOverlay {
    key: ModalKey,
    config: ModalConfig,
    hooks: ModalHooks,
    machine: StageMachine,
    /// Last observed show intent; re-applied when a transition settles.
    intent: bool,
    /// Document listeners requested (stage is not `Closed`).
    wired: bool,
    /// Open-side resources (registration, scroll lock) currently held.
    resources_held: bool,
    focus: FocusMemory,
    focus_taken: bool,
    /// Concrete mounted root, reported by the host's portal.
    root: Option<ElementHandle>,
    container: ElementHandle,
    doc: DocumentHandle,
    ctx: OverlayContext,
}

impl ModalOverlay {
    /// Create an overlay instance.
    ///
    /// With `show` set, the overlay mounts directly in `Opened`: the open
    /// effect sequence runs immediately and the parts project as visible so
    /// the host's animation primitive animates them in.
    pub fn new(
        doc: DocumentHandle,
        ctx: OverlayContext,
        config: ModalConfig,
        hooks: ModalHooks,
        show: bool,
    ) -> Self {
        let key = config.key.clone().unwrap_or_else(ModalKey::generate);
        let container = config.append_to.clone().unwrap_or_else(|| doc.body());
        let expected = config.expected_parts();
        let machine = if show {
            StageMachine::opened(expected)
        } else {
            StageMachine::new(expected)
        };

        let mut overlay = Self {
            key,
            config,
            hooks,
            machine,
            intent: show,
            wired: false,
            resources_held: false,
            focus: FocusMemory::default(),
            focus_taken: false,
            root: None,
            container,
            doc,
            ctx,
        };
        if show {
            debug!(key = %overlay.key, "mounting open");
            overlay.open_resources();
            overlay.settle_opened();
        }
        overlay
    }

    /// The instance key.
    pub fn key(&self) -> &ModalKey {
        &self.key
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> Stage {
        self.machine.stage()
    }

    /// The resolved mount container.
    pub fn container(&self) -> &ElementHandle {
        &self.container
    }

    /// Whether this overlay is topmost under its container.
    pub fn is_topmost(&self) -> bool {
        self.ctx
            .registry()
            .is_topmost(self.container.element_id(), &self.key)
    }

    /// Observe the show-intent flag.
    ///
    /// Contradictory observations mid-transition are absorbed, not acted
    /// upon, until the in-flight transition completes.
    pub fn set_show(&mut self, show: bool) {
        self.intent = show;
        self.drive(StageEvent::Intent(show));
    }

    /// A part finished its enter animation.
    pub fn part_entered(&mut self, part: TransitionPart) {
        trace!(key = %self.key, ?part, "enter acknowledged");
        self.drive(StageEvent::PartDone {
            part,
            direction: TransitionDirection::Enter,
        });
    }

    /// A part finished its exit animation.
    pub fn part_exited(&mut self, part: TransitionPart) {
        trace!(key = %self.key, ?part, "exit acknowledged");
        self.drive(StageEvent::PartDone {
            part,
            direction: TransitionDirection::Exit,
        });
    }

    /// Report the concrete mounted root element (or its removal).
    ///
    /// Needed for focus capture and outside-click containment. A root
    /// arriving while already `Opened` performs the deferred focus capture.
    pub fn set_root(&mut self, root: Option<ElementHandle>) {
        self.root = root;
        if self.machine.stage() == Stage::Opened {
            self.try_capture_focus();
        }
    }

    /// Whether the host should have document-level listeners attached.
    pub fn wants_document_events(&self) -> bool {
        self.wired
    }

    /// Whether the host should also forward document clicks.
    pub fn wants_document_clicks(&self) -> bool {
        self.wired && self.config.document_clicks
    }

    /// Route one document-level event.
    ///
    /// A returned action has already been forwarded to `on_close_request`;
    /// the host should treat it as handled (prevent default).
    pub fn handle_document_event(&mut self, event: &Event) -> Option<ModalAction> {
        if !self.wired {
            return None;
        }
        let gates = RouteGates {
            close_on_escape: self.config.close_on_escape,
            document_clicks: self.config.document_clicks,
            topmost: self.is_topmost(),
            root: self.root.as_ref(),
        };
        let action = events::route(event, &gates)?;
        debug!(key = %self.key, ?action, "close requested");
        self.hooks.run_close_request(action);
        Some(action)
    }

    /// The host's backdrop node was clicked.
    pub fn backdrop_clicked(&mut self) -> Option<ModalAction> {
        if !self.wired || !self.config.backdrop || !self.config.close_on_backdrop {
            return None;
        }
        debug!(key = %self.key, "close requested by backdrop click");
        self.hooks.run_close_request(ModalAction::BackdropClicked);
        Some(ModalAction::BackdropClicked)
    }

    /// What the host should have mounted right now; `None` when `Closed`.
    pub fn projection(&self) -> Option<ModalProjection> {
        projection::project(self.machine.stage(), &self.config, &self.container)
    }

    /// Forced synchronous cleanup for unmount.
    ///
    /// Releases every held resource without waiting for animation
    /// acknowledgments and without firing lifecycle hooks. Safe to call
    /// repeatedly; also runs on drop.
    pub fn unmount(&mut self) {
        if self.machine.apply(StageEvent::ForceClose).is_some() {
            debug!(key = %self.key, "forced close");
        }
        self.release_resources();
    }

    fn drive(&mut self, event: StageEvent) {
        if let Some(edge) = self.machine.apply(event) {
            self.on_edge(edge);
        }
    }

    fn on_edge(&mut self, edge: StageEdge) {
        debug!(key = %self.key, ?edge, stage = ?self.machine.stage(), "stage edge");
        match edge {
            StageEdge::OpeningStarted => self.open_resources(),
            StageEdge::Opened => self.settle_opened(),
            StageEdge::ClosingStarted => self.hooks.run_before_close(),
            StageEdge::Closed => {
                self.release_resources();
                self.hooks.run_on_close();
                self.reobserve_intent();
            }
        }
    }

    fn open_resources(&mut self) {
        self.hooks.run_before_open();
        if self.config.lock_scroll {
            self.ctx.scroll().acquire(&self.container, &self.key);
        }
        self.ctx
            .registry()
            .register(self.container.element_id(), &self.key);
        self.wired = true;
        self.resources_held = true;
    }

    fn settle_opened(&mut self) {
        self.try_capture_focus();
        self.hooks.run_on_open();
        self.reobserve_intent();
    }

    fn try_capture_focus(&mut self) {
        if !self.config.grab_focus || self.focus_taken {
            return;
        }
        let Some(root) = self.root.clone() else {
            return;
        };
        self.focus.capture(self.doc.as_ref(), &root);
        self.focus_taken = true;
    }

    fn release_resources(&mut self) {
        if !self.resources_held {
            return;
        }
        self.resources_held = false;
        self.ctx
            .registry()
            .unregister(self.container.element_id(), &self.key);
        self.wired = false;
        self.focus.restore();
        self.focus_taken = false;
        self.ctx.scroll().release(&self.container, &self.key);
    }

    /// Apply an intent flip that was absorbed mid-transition.
    fn reobserve_intent(&mut self) {
        match (self.machine.stage(), self.intent) {
            (Stage::Opened, false) => self.drive(StageEvent::Intent(false)),
            (Stage::Closed, true) => self.drive(StageEvent::Intent(true)),
            _ => {}
        }
    }
}

impl Drop for ModalOverlay {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl core::fmt::Debug for ModalOverlay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModalOverlay")
            .field("key", &self.key)
            .field("stage", &self.machine.stage())
            .field("intent", &self.intent)
            .field("wired", &self.wired)
            .field("resources_held", &self.resources_held)
            .finish_non_exhaustive()
    }
}
