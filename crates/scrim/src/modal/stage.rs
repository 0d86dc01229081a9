#![forbid(unsafe_code)]

//! Overlay lifecycle stage machine.
//!
//! A modal overlay moves through `Closed → Opening → Opened → Closing →
//! Closed`. The `Opening` and `Closing` stages wait on the host's animation
//! primitive: each animated part (body, and backdrop unless suppressed)
//! acknowledges completion independently, and the stage advances when every
//! participating part has acknowledged.
//!
//! The machine is a pure reducer over `(stage, event)` pairs: it performs
//! no side effects and returns the [`StageEdge`] crossed, if any. The
//! overlay orchestrator maps edges to registry/scroll/focus effects.
//!
//! # Invariants
//!
//! - The acknowledged set is always a subset of the expected set; a part
//!   acknowledging twice, out of phase, or while not participating cannot
//!   advance the stage.
//! - Each `Opening`/`Closing` cycle crosses its completion edge exactly
//!   once.
//! - An intent observation that contradicts the current stage (per the
//!   table below) is a no-op; in particular, intent flips mid-transition
//!   never interrupt the in-flight animation.
//!
//! # Failure Modes
//!
//! - Acknowledgments arriving after `ForceClose` are ignored (the machine
//!   is already `Closed`).

use bitflags::bitflags;
use tracing::trace;

bitflags! {
    /// Set of independently animated overlay parts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TransitionParts: u8 {
        const BODY = 1 << 0;
        const BACKDROP = 1 << 1;
    }
}

impl TransitionParts {
    /// The parts participating in transitions for a given backdrop setting.
    pub fn for_backdrop(backdrop: bool) -> Self {
        if backdrop {
            Self::BODY | Self::BACKDROP
        } else {
            Self::BODY
        }
    }
}

/// One animated part of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPart {
    Body,
    Backdrop,
}

impl TransitionPart {
    /// The part's bit in a [`TransitionParts`] set.
    #[inline]
    pub const fn bit(self) -> TransitionParts {
        match self {
            Self::Body => TransitionParts::BODY,
            Self::Backdrop => TransitionParts::BACKDROP,
        }
    }
}

/// Direction of an animation acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionDirection {
    /// The part finished animating in.
    Enter,
    /// The part finished animating out.
    Exit,
}

/// Lifecycle stage of one overlay instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    Closed,
    Opening,
    Opened,
    Closing,
}

impl Stage {
    /// Whether a transition is in flight.
    #[inline]
    pub const fn is_transitioning(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// Whether the overlay's parts should be mounted at all.
    #[inline]
    pub const fn mounts_content(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether mounted parts should be in their visible (entered) state.
    ///
    /// Parts animate in whenever not actively closing, including an
    /// initial mount that starts already `Opened`.
    #[inline]
    pub const fn parts_visible(self) -> bool {
        !matches!(self, Self::Closing)
    }
}

/// Input to the stage machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// Observation of the show-intent flag.
    Intent(bool),
    /// A part finished its enter or exit animation.
    PartDone {
        part: TransitionPart,
        direction: TransitionDirection,
    },
    /// Unmount cleanup: jump straight to `Closed`, skipping the rendezvous.
    ForceClose,
}

/// Edge crossed by an applied event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEdge {
    OpeningStarted,
    Opened,
    ClosingStarted,
    Closed,
}

/// Pure reducer coordinating the open/close rendezvous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageMachine {
    stage: Stage,
    expected: TransitionParts,
    acked: TransitionParts,
}

impl StageMachine {
    /// Create a machine at `Closed`.
    pub fn new(expected: TransitionParts) -> Self {
        Self {
            stage: Stage::Closed,
            expected,
            acked: TransitionParts::empty(),
        }
    }

    /// Create a machine already `Opened` (shown on mount).
    pub fn opened(expected: TransitionParts) -> Self {
        Self {
            stage: Stage::Opened,
            expected,
            acked: TransitionParts::empty(),
        }
    }

    /// Current stage.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Parts participating in transitions.
    #[inline]
    pub fn expected_parts(&self) -> TransitionParts {
        self.expected
    }

    /// Parts that have acknowledged the in-flight transition.
    #[inline]
    pub fn acked_parts(&self) -> TransitionParts {
        self.acked
    }

    /// Apply one event, returning the edge crossed, if any.
    pub fn apply(&mut self, event: StageEvent) -> Option<StageEdge> {
        match (self.stage, event) {
            (Stage::Closed, StageEvent::Intent(true)) => {
                self.enter(Stage::Opening);
                Some(StageEdge::OpeningStarted)
            }
            (Stage::Opened, StageEvent::Intent(false)) => {
                self.enter(Stage::Closing);
                Some(StageEdge::ClosingStarted)
            }
            (_, StageEvent::Intent(_)) => None,
            (
                Stage::Opening,
                StageEvent::PartDone {
                    part,
                    direction: TransitionDirection::Enter,
                },
            ) => self.acknowledge(part, Stage::Opened, StageEdge::Opened),
            (
                Stage::Closing,
                StageEvent::PartDone {
                    part,
                    direction: TransitionDirection::Exit,
                },
            ) => self.acknowledge(part, Stage::Closed, StageEdge::Closed),
            (stage, StageEvent::PartDone { part, direction }) => {
                trace!(?stage, ?part, ?direction, "ignoring out-of-phase acknowledgment");
                None
            }
            (Stage::Closed, StageEvent::ForceClose) => None,
            (_, StageEvent::ForceClose) => {
                self.enter(Stage::Closed);
                Some(StageEdge::Closed)
            }
        }
    }

    fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        self.acked = TransitionParts::empty();
    }

    fn acknowledge(&mut self, part: TransitionPart, next: Stage, edge: StageEdge) -> Option<StageEdge> {
        let bit = part.bit() & self.expected;
        if bit.is_empty() {
            trace!(stage = ?self.stage, ?part, "ignoring acknowledgment from non-participating part");
            return None;
        }
        if self.acked.contains(bit) {
            trace!(stage = ?self.stage, ?part, "ignoring duplicate acknowledgment");
            return None;
        }
        self.acked |= bit;
        if self.acked == self.expected {
            self.enter(next);
            Some(edge)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(part: TransitionPart) -> StageEvent {
        StageEvent::PartDone {
            part,
            direction: TransitionDirection::Enter,
        }
    }

    fn exit(part: TransitionPart) -> StageEvent {
        StageEvent::PartDone {
            part,
            direction: TransitionDirection::Exit,
        }
    }

    #[test]
    fn open_waits_for_both_parts() {
        let mut m = StageMachine::new(TransitionParts::for_backdrop(true));
        assert_eq!(m.apply(StageEvent::Intent(true)), Some(StageEdge::OpeningStarted));
        assert_eq!(m.stage(), Stage::Opening);

        assert_eq!(m.apply(enter(TransitionPart::Body)), None);
        assert_eq!(m.stage(), Stage::Opening);
        assert_eq!(m.apply(enter(TransitionPart::Backdrop)), Some(StageEdge::Opened));
        assert_eq!(m.stage(), Stage::Opened);
    }

    #[test]
    fn no_backdrop_needs_single_acknowledgment() {
        let mut m = StageMachine::new(TransitionParts::for_backdrop(false));
        m.apply(StageEvent::Intent(true));
        assert_eq!(m.apply(enter(TransitionPart::Body)), Some(StageEdge::Opened));
    }

    #[test]
    fn backdrop_ack_without_backdrop_is_ignored() {
        let mut m = StageMachine::new(TransitionParts::for_backdrop(false));
        m.apply(StageEvent::Intent(true));
        assert_eq!(m.apply(enter(TransitionPart::Backdrop)), None);
        assert_eq!(m.stage(), Stage::Opening);
    }

    #[test]
    fn duplicate_ack_cannot_complete_the_rendezvous() {
        let mut m = StageMachine::new(TransitionParts::for_backdrop(true));
        m.apply(StageEvent::Intent(true));
        assert_eq!(m.apply(enter(TransitionPart::Body)), None);
        assert_eq!(m.apply(enter(TransitionPart::Body)), None);
        assert_eq!(m.stage(), Stage::Opening);
        assert_eq!(m.acked_parts(), TransitionParts::BODY);
    }

    #[test]
    fn out_of_phase_ack_is_ignored() {
        let mut m = StageMachine::new(TransitionParts::for_backdrop(false));
        m.apply(StageEvent::Intent(true));
        // Exit-completion while opening must not corrupt the rendezvous.
        assert_eq!(m.apply(exit(TransitionPart::Body)), None);
        assert_eq!(m.stage(), Stage::Opening);
        assert_eq!(m.apply(enter(TransitionPart::Body)), Some(StageEdge::Opened));
    }

    #[test]
    fn acks_while_resting_are_ignored() {
        let mut m = StageMachine::opened(TransitionParts::for_backdrop(false));
        assert_eq!(m.apply(enter(TransitionPart::Body)), None);
        assert_eq!(m.apply(exit(TransitionPart::Body)), None);
        assert_eq!(m.stage(), Stage::Opened);
    }

    #[test]
    fn intent_is_noop_mid_transition() {
        let mut m = StageMachine::new(TransitionParts::for_backdrop(false));
        m.apply(StageEvent::Intent(true));
        assert_eq!(m.apply(StageEvent::Intent(false)), None);
        assert_eq!(m.apply(StageEvent::Intent(true)), None);
        assert_eq!(m.stage(), Stage::Opening);
    }

    #[test]
    fn full_close_cycle() {
        let mut m = StageMachine::opened(TransitionParts::for_backdrop(true));
        assert_eq!(m.apply(StageEvent::Intent(false)), Some(StageEdge::ClosingStarted));
        assert_eq!(m.apply(exit(TransitionPart::Backdrop)), None);
        assert_eq!(m.apply(exit(TransitionPart::Body)), Some(StageEdge::Closed));
        assert_eq!(m.stage(), Stage::Closed);
    }

    #[test]
    fn force_close_skips_the_rendezvous() {
        for setup in [
            StageMachine::new(TransitionParts::for_backdrop(true)),
            StageMachine::opened(TransitionParts::for_backdrop(true)),
        ] {
            let mut m = setup;
            if m.stage() == Stage::Closed {
                m.apply(StageEvent::Intent(true));
            }
            assert_eq!(m.apply(StageEvent::ForceClose), Some(StageEdge::Closed));
            assert_eq!(m.stage(), Stage::Closed);
            assert_eq!(m.apply(StageEvent::ForceClose), None);
        }
    }

    #[test]
    fn reopen_after_close() {
        let mut m = StageMachine::new(TransitionParts::for_backdrop(false));
        m.apply(StageEvent::Intent(true));
        m.apply(enter(TransitionPart::Body));
        m.apply(StageEvent::Intent(false));
        m.apply(exit(TransitionPart::Body));
        assert_eq!(m.stage(), Stage::Closed);

        assert_eq!(m.apply(StageEvent::Intent(true)), Some(StageEdge::OpeningStarted));
        assert_eq!(m.acked_parts(), TransitionParts::empty());
    }

    #[test]
    fn stage_visibility_projection_flags() {
        assert!(!Stage::Closed.mounts_content());
        assert!(Stage::Opening.mounts_content() && Stage::Opening.parts_visible());
        assert!(Stage::Opened.mounts_content() && Stage::Opened.parts_visible());
        assert!(Stage::Closing.mounts_content() && !Stage::Closing.parts_visible());
    }
}
