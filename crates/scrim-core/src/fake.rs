#![forbid(unsafe_code)]

//! In-memory fake document environment.
//!
//! [`FakeDocument`] and [`FakeElement`] implement the platform handle
//! traits over plain `Rc`/`RefCell` state so the overlay lifecycle can be
//! exercised without any rendering backend: focus moves are recorded on the
//! document, inline styles are stored as strings, scroll metrics are
//! whatever the test sets, and containment is tracked through
//! [`FakeElement::append_child`].
//!
//! Available behind the `test-helpers` feature.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::element::{Element, ElementHandle, ElementId, ScrollMetrics};
use crate::env::DocumentEnv;

#[derive(Debug, Default)]
struct DocShared {
    active: RefCell<Option<ElementHandle>>,
}

/// Fake document with focus tracking and a body element.
#[derive(Debug)]
pub struct FakeDocument {
    shared: Rc<DocShared>,
    body: Rc<FakeElement>,
}

impl FakeDocument {
    /// Create a fake document with an empty body.
    pub fn new() -> Rc<Self> {
        let shared = Rc::new(DocShared::default());
        let body = FakeElement::with_shared(&shared);
        Rc::new(Self { shared, body })
    }

    /// Create a detached element belonging to this document.
    pub fn create_element(&self) -> Rc<FakeElement> {
        FakeElement::with_shared(&self.shared)
    }

    /// Concrete handle to the body element.
    pub fn body_element(&self) -> Rc<FakeElement> {
        Rc::clone(&self.body)
    }

    /// Id of the currently focused element, if any.
    pub fn active_id(&self) -> Option<ElementId> {
        self.shared.active.borrow().as_ref().map(|el| el.element_id())
    }

    /// Clear document focus.
    pub fn blur(&self) {
        self.shared.active.borrow_mut().take();
    }
}

impl DocumentEnv for FakeDocument {
    fn body(&self) -> ElementHandle {
        let handle: ElementHandle = self.body.clone();
        handle
    }

    fn active_element(&self) -> Option<ElementHandle> {
        self.shared.active.borrow().clone()
    }
}

/// Fake element with settable metrics, style storage, and recorded children.
#[derive(Debug)]
pub struct FakeElement {
    id: ElementId,
    doc: Weak<DocShared>,
    self_handle: Weak<FakeElement>,
    focusable: Cell<bool>,
    style: RefCell<Option<String>>,
    metrics: Cell<ScrollMetrics>,
    children: RefCell<Vec<ElementId>>,
}

impl FakeElement {
    fn with_shared(shared: &Rc<DocShared>) -> Rc<Self> {
        Rc::new_cyclic(|weak| Self {
            id: ElementId::generate(),
            doc: Rc::downgrade(shared),
            self_handle: weak.clone(),
            focusable: Cell::new(true),
            style: RefCell::new(None),
            metrics: Cell::new(ScrollMetrics::default()),
            children: RefCell::new(Vec::new()),
        })
    }

    /// Type-erased handle to this element.
    pub fn handle(self: &Rc<Self>) -> ElementHandle {
        let handle: ElementHandle = self.clone();
        handle
    }

    /// Record `child` (and its recorded descendants) as contained in `self`.
    pub fn append_child(&self, child: &Rc<FakeElement>) {
        let mut children = self.children.borrow_mut();
        children.push(child.id);
        children.extend(child.children.borrow().iter().copied());
    }

    /// Make the element (un)focusable.
    pub fn set_focusable(&self, focusable: bool) {
        self.focusable.set(focusable);
    }

    /// Set the scroll extents reported by [`Element::scroll_metrics`].
    pub fn set_scroll_metrics(&self, metrics: ScrollMetrics) {
        self.metrics.set(metrics);
    }

    /// Whether this element currently holds document focus.
    pub fn is_focused(&self) -> bool {
        self.doc
            .upgrade()
            .and_then(|shared| {
                shared
                    .active
                    .borrow()
                    .as_ref()
                    .map(|el| el.element_id() == self.id)
            })
            .unwrap_or(false)
    }
}

impl Element for FakeElement {
    fn element_id(&self) -> ElementId {
        self.id
    }

    fn contains(&self, other: &dyn Element) -> bool {
        let other_id = other.element_id();
        self.id == other_id || self.children.borrow().contains(&other_id)
    }

    fn focus(&self) {
        if !self.focusable.get() {
            return;
        }
        if let (Some(shared), Some(me)) = (self.doc.upgrade(), self.self_handle.upgrade()) {
            let handle: ElementHandle = me;
            *shared.active.borrow_mut() = Some(handle);
        }
    }

    fn is_focusable(&self) -> bool {
        self.focusable.get()
    }

    fn inline_style(&self) -> Option<String> {
        self.style.borrow().clone()
    }

    fn set_inline_style(&self, style: Option<&str>) {
        *self.style.borrow_mut() = style.map(str::to_owned);
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.metrics.get()
    }
}
