#![no_main]

//! Fuzz the full overlay orchestration against the fake environment.
//!
//! Checked invariants after every operation:
//! - Registry presence tracks `stage != Closed`.
//! - The scroll ledger holds the container lock iff the overlay is open.
//! - Dropping the overlay leaves no shared state behind.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use scrim::modal::{ModalConfig, ModalHooks, ModalOverlay, OverlayContext, Stage, TransitionPart};
use scrim_core::fake::FakeDocument;

#[derive(Debug, Arbitrary)]
enum Op {
    Show(bool),
    Enter(bool),
    Exit(bool),
    Unmount,
}

#[derive(Debug, Arbitrary)]
struct Input {
    backdrop: bool,
    show_on_mount: bool,
    ops: Vec<Op>,
}

fn part(backdrop_part: bool) -> TransitionPart {
    if backdrop_part {
        TransitionPart::Backdrop
    } else {
        TransitionPart::Body
    }
}

fuzz_target!(|input: Input| {
    let doc = FakeDocument::new();
    let ctx = OverlayContext::new();
    let container;
    let key;
    {
        let mut overlay = ModalOverlay::new(
            doc.clone(),
            ctx.clone(),
            ModalConfig::default().backdrop(input.backdrop),
            ModalHooks::new(),
            input.show_on_mount,
        );
        container = overlay.container().element_id();
        key = overlay.key().clone();

        for op in input.ops {
            match op {
                Op::Show(show) => overlay.set_show(show),
                Op::Enter(backdrop_part) => overlay.part_entered(part(backdrop_part)),
                Op::Exit(backdrop_part) => overlay.part_exited(part(backdrop_part)),
                Op::Unmount => overlay.unmount(),
            }

            let registered = ctx.registry().contains(container, &key);
            assert_eq!(registered, overlay.stage() != Stage::Closed);
            assert_eq!(ctx.scroll().is_locked(container), registered);
        }
    }
    assert_eq!(ctx.registry().depth(container), 0);
    assert!(!ctx.scroll().is_locked(container));
});
