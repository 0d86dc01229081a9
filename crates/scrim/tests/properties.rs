#![forbid(unsafe_code)]

//! Property tests: lifecycle bookkeeping under arbitrary input sequences.
//!
//! Two families:
//!
//! - Overlay driving: for any interleaving of intent flips and animation
//!   acknowledgments, hook invocations stay balanced, registry presence
//!   tracks the stage, and the overlay settles on the last requested state
//!   once the in-flight animations drain.
//! - Registry model check: register/unregister sequences against a plain
//!   vector model preserve the topmost/containment contract.
//!
//! Run: `cargo test -p scrim --test properties`

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use scrim::modal::{
    ModalConfig, ModalHooks, ModalKey, ModalOverlay, OverlayContext, OverlayRegistry, Stage,
    TransitionPart,
};
use scrim_core::element::ElementId;
use scrim_core::fake::FakeDocument;

// =============================================================================
// Overlay driving
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum DriveOp {
    Show(bool),
    Enter(TransitionPart),
    Exit(TransitionPart),
}

fn drive_op() -> impl Strategy<Value = DriveOp> {
    prop_oneof![
        any::<bool>().prop_map(DriveOp::Show),
        Just(DriveOp::Enter(TransitionPart::Body)),
        Just(DriveOp::Enter(TransitionPart::Backdrop)),
        Just(DriveOp::Exit(TransitionPart::Body)),
        Just(DriveOp::Exit(TransitionPart::Backdrop)),
    ]
}

struct Counters {
    opened: Rc<Cell<u32>>,
    closed: Rc<Cell<u32>>,
}

fn counting_overlay(
    doc: &Rc<FakeDocument>,
    ctx: &OverlayContext,
    backdrop: bool,
) -> (ModalOverlay, Counters) {
    let opened = Rc::new(Cell::new(0));
    let closed = Rc::new(Cell::new(0));
    let hooks = ModalHooks::new()
        .on_open({
            let opened = Rc::clone(&opened);
            move || opened.set(opened.get() + 1)
        })
        .on_close({
            let closed = Rc::clone(&closed);
            move || closed.set(closed.get() + 1)
        });
    let overlay = ModalOverlay::new(
        doc.clone(),
        ctx.clone(),
        ModalConfig::default().backdrop(backdrop),
        hooks,
        false,
    );
    (overlay, Counters { opened, closed })
}

fn check_bookkeeping(overlay: &ModalOverlay, ctx: &OverlayContext, counters: &Counters) {
    let container = overlay.container().element_id();
    let registered = ctx.registry().contains(container, overlay.key());
    assert_eq!(
        registered,
        overlay.stage() != Stage::Closed,
        "registry presence must track the stage"
    );
    assert_eq!(ctx.scroll().is_locked(container), registered);

    let opened = counters.opened.get();
    let closed = counters.closed.get();
    assert!(opened >= closed, "on_close cannot outrun on_open");
    assert!(opened - closed <= 1, "open cycles cannot nest");
    match overlay.stage() {
        Stage::Opened | Stage::Closing => assert_eq!(opened - closed, 1),
        Stage::Closed | Stage::Opening => {}
    }
}

/// Acknowledge in-flight animations until the overlay stops transitioning.
fn drain(overlay: &mut ModalOverlay) {
    for _ in 0..8 {
        match overlay.stage() {
            Stage::Opening => {
                overlay.part_entered(TransitionPart::Body);
                overlay.part_entered(TransitionPart::Backdrop);
            }
            Stage::Closing => {
                overlay.part_exited(TransitionPart::Body);
                overlay.part_exited(TransitionPart::Backdrop);
            }
            Stage::Closed | Stage::Opened => return,
        }
    }
    panic!("overlay failed to settle after draining animations");
}

proptest! {
    #[test]
    fn hooks_stay_balanced_under_arbitrary_driving(
        ops in proptest::collection::vec(drive_op(), 0..48),
        backdrop in any::<bool>(),
    ) {
        let doc = FakeDocument::new();
        let ctx = OverlayContext::new();
        let (mut overlay, counters) = counting_overlay(&doc, &ctx, backdrop);

        for op in ops {
            match op {
                DriveOp::Show(show) => overlay.set_show(show),
                DriveOp::Enter(part) => overlay.part_entered(part),
                DriveOp::Exit(part) => overlay.part_exited(part),
            }
            check_bookkeeping(&overlay, &ctx, &counters);
        }
    }

    #[test]
    fn overlay_settles_on_last_intent(
        ops in proptest::collection::vec(drive_op(), 0..48),
        last_intent in any::<bool>(),
        backdrop in any::<bool>(),
    ) {
        let doc = FakeDocument::new();
        let ctx = OverlayContext::new();
        let (mut overlay, counters) = counting_overlay(&doc, &ctx, backdrop);

        for op in ops {
            match op {
                DriveOp::Show(show) => overlay.set_show(show),
                DriveOp::Enter(part) => overlay.part_entered(part),
                DriveOp::Exit(part) => overlay.part_exited(part),
            }
        }
        overlay.set_show(last_intent);
        drain(&mut overlay);

        let expected = if last_intent { Stage::Opened } else { Stage::Closed };
        prop_assert_eq!(overlay.stage(), expected);
        check_bookkeeping(&overlay, &ctx, &counters);
    }

    #[test]
    fn dropping_mid_sequence_leaves_no_shared_state(
        ops in proptest::collection::vec(drive_op(), 0..32),
    ) {
        let doc = FakeDocument::new();
        let ctx = OverlayContext::new();
        let container;
        {
            let (mut overlay, _counters) = counting_overlay(&doc, &ctx, true);
            container = overlay.container().element_id();
            for op in ops {
                match op {
                    DriveOp::Show(show) => overlay.set_show(show),
                    DriveOp::Enter(part) => overlay.part_entered(part),
                    DriveOp::Exit(part) => overlay.part_exited(part),
                }
            }
        }
        prop_assert_eq!(ctx.registry().depth(container), 0);
        prop_assert!(!ctx.scroll().is_locked(container));
    }
}

// =============================================================================
// Registry model check
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum RegistryOp {
    Register { container: u8, key: u8 },
    Unregister { container: u8, key: u8 },
}

fn registry_op() -> impl Strategy<Value = RegistryOp> {
    prop_oneof![
        (0..3u8, 0..6u8).prop_map(|(container, key)| RegistryOp::Register { container, key }),
        (0..3u8, 0..6u8).prop_map(|(container, key)| RegistryOp::Unregister { container, key }),
    ]
}

proptest! {
    #[test]
    fn registry_matches_vector_model(
        ops in proptest::collection::vec(registry_op(), 0..64),
    ) {
        let registry = OverlayRegistry::new();
        let mut model: Vec<Vec<u8>> = vec![Vec::new(); 3];
        let containers: Vec<ElementId> = (0..3u64).map(|i| ElementId::from_raw(1000 + i)).collect();
        let keys: Vec<ModalKey> = (0..6).map(|i| ModalKey::new(format!("k{i}"))).collect();

        for op in ops {
            match op {
                RegistryOp::Register { container, key } => {
                    // A key may be live under at most one container; skip
                    // registrations the overlay layer would never issue.
                    let live = model.iter().any(|stack| stack.contains(&key));
                    if !live {
                        registry.register(containers[container as usize], &keys[key as usize]);
                        model[container as usize].push(key);
                    }
                }
                RegistryOp::Unregister { container, key } => {
                    registry.unregister(containers[container as usize], &keys[key as usize]);
                    model[container as usize].retain(|k| *k != key);
                }
            }

            for (idx, stack) in model.iter().enumerate() {
                let container = containers[idx];
                prop_assert_eq!(registry.depth(container), stack.len());
                let top = stack.last().map(|k| keys[*k as usize].clone());
                prop_assert_eq!(registry.top(container), top);
                for key in 0..6u8 {
                    prop_assert_eq!(
                        registry.contains(container, &keys[key as usize]),
                        stack.contains(&key)
                    );
                    prop_assert_eq!(
                        registry.is_topmost(container, &keys[key as usize]),
                        stack.last() == Some(&key)
                    );
                }
            }
        }
    }
}
