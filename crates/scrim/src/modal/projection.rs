#![forbid(unsafe_code)]

//! Render projection.
//!
//! The overlay never draws. Each time the host renders, it asks for a
//! projection: a description of which parts to mount, under which
//! container, with which classes, and whether each part should be in its
//! entered (visible) state. The host feeds the `visible` flag to its
//! animation primitive and reports completions back through
//! [`ModalOverlay::part_entered`] / [`part_exited`].
//!
//! [`ModalOverlay::part_entered`]: crate::modal::ModalOverlay::part_entered
//! [`part_exited`]: crate::modal::ModalOverlay::part_exited

use scrim_core::element::ElementHandle;

use crate::modal::config::ModalConfig;
use crate::modal::stage::{Stage, TransitionPart};

/// What to mount for one animated part.
#[derive(Debug, Clone)]
pub struct PartProjection {
    pub part: TransitionPart,
    pub class_name: String,
    pub transition_prefix: String,
    /// Entered state: parts animate in whenever not actively closing.
    pub visible: bool,
}

/// What the host should have mounted right now.
#[derive(Debug, Clone)]
pub struct ModalProjection {
    /// Portal target.
    pub container: ElementHandle,
    /// Backdrop part; `None` when the backdrop is suppressed.
    pub backdrop: Option<PartProjection>,
    /// Body part.
    pub body: PartProjection,
}

pub(crate) fn project(
    stage: Stage,
    config: &ModalConfig,
    container: &ElementHandle,
) -> Option<ModalProjection> {
    if !stage.mounts_content() {
        return None;
    }
    let visible = stage.parts_visible();
    let names = &config.class_names;
    let backdrop = config.backdrop.then(|| PartProjection {
        part: TransitionPart::Backdrop,
        class_name: names.backdrop_class(),
        transition_prefix: names.prefix(),
        visible,
    });
    Some(ModalProjection {
        container: container.clone(),
        backdrop,
        body: PartProjection {
            part: TransitionPart::Body,
            class_name: names.body_class(),
            transition_prefix: names.prefix(),
            visible,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrim_core::fake::FakeDocument;

    fn container() -> ElementHandle {
        FakeDocument::new().body_element().handle()
    }

    #[test]
    fn closed_projects_nothing() {
        let config = ModalConfig::default();
        assert!(project(Stage::Closed, &config, &container()).is_none());
    }

    #[test]
    fn open_stages_project_visible_parts() {
        let config = ModalConfig::default();
        for stage in [Stage::Opening, Stage::Opened] {
            let p = project(stage, &config, &container()).unwrap();
            assert!(p.body.visible);
            assert!(p.backdrop.unwrap().visible);
        }
    }

    #[test]
    fn closing_projects_hidden_parts() {
        let config = ModalConfig::default();
        let p = project(Stage::Closing, &config, &container()).unwrap();
        assert!(!p.body.visible);
        assert!(!p.backdrop.unwrap().visible);
    }

    #[test]
    fn suppressed_backdrop_is_absent() {
        let config = ModalConfig::default().backdrop(false);
        let p = project(Stage::Opened, &config, &container()).unwrap();
        assert!(p.backdrop.is_none());
    }

    #[test]
    fn class_names_flow_through() {
        let config =
            ModalConfig::default().class_names(crate::modal::ClassNames::with_base("popup"));
        let p = project(Stage::Opened, &config, &container()).unwrap();
        assert_eq!(p.body.class_name, "popup");
        assert_eq!(p.body.transition_prefix, "popup");
        assert_eq!(p.backdrop.unwrap().class_name, "popup-backdrop");
    }
}
