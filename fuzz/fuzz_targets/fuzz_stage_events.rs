#![no_main]

//! Fuzz the stage machine with arbitrary event sequences.
//!
//! Checked invariants:
//! - The acknowledged set never escapes the expected set.
//! - Completion edges alternate: a second `Opened` edge requires an
//!   intervening `Closed` (and vice versa).
//! - `ForceClose` always lands in `Closed`.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use scrim::modal::{
    Stage, StageEdge, StageEvent, StageMachine, TransitionDirection, TransitionPart,
    TransitionParts,
};

#[derive(Debug, Arbitrary)]
enum FuzzEvent {
    Intent(bool),
    BodyEnter,
    BodyExit,
    BackdropEnter,
    BackdropExit,
    ForceClose,
}

impl FuzzEvent {
    fn into_event(self) -> StageEvent {
        let part_done = |part, direction| StageEvent::PartDone { part, direction };
        match self {
            Self::Intent(show) => StageEvent::Intent(show),
            Self::BodyEnter => part_done(TransitionPart::Body, TransitionDirection::Enter),
            Self::BodyExit => part_done(TransitionPart::Body, TransitionDirection::Exit),
            Self::BackdropEnter => part_done(TransitionPart::Backdrop, TransitionDirection::Enter),
            Self::BackdropExit => part_done(TransitionPart::Backdrop, TransitionDirection::Exit),
            Self::ForceClose => StageEvent::ForceClose,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    backdrop: bool,
    start_opened: bool,
    events: Vec<FuzzEvent>,
}

fuzz_target!(|input: FuzzInput| {
    let expected = TransitionParts::for_backdrop(input.backdrop);
    let mut machine = if input.start_opened {
        StageMachine::opened(expected)
    } else {
        StageMachine::new(expected)
    };

    let mut open = input.start_opened;
    for event in input.events {
        let event = event.into_event();
        let edge = machine.apply(event);

        assert!(
            expected.contains(machine.acked_parts()),
            "acknowledged set escaped the expected set"
        );
        match edge {
            Some(StageEdge::Opened) => {
                assert!(!open, "Opened edge without an intervening Closed");
                open = true;
            }
            Some(StageEdge::Closed) => {
                if !matches!(event, StageEvent::ForceClose) {
                    assert!(open, "natural Closed edge without a preceding open cycle");
                }
                open = false;
            }
            _ => {}
        }
        if matches!(event, StageEvent::ForceClose) {
            assert_eq!(machine.stage(), Stage::Closed);
        }
    }
});
