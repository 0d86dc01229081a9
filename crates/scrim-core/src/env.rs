#![forbid(unsafe_code)]

//! Document environment handle.
//!
//! The widget layer asks the environment for exactly two things: a default
//! mount container (the document body) and the currently focused element.
//! Everything else flows through [`Element`](crate::element::Element)
//! handles the host passes in explicitly.

use core::fmt;
use std::rc::Rc;

use crate::element::ElementHandle;

/// Host document environment.
pub trait DocumentEnv: fmt::Debug {
    /// The document body, used as the default mount container.
    fn body(&self) -> ElementHandle;

    /// The element that currently holds focus, if any.
    fn active_element(&self) -> Option<ElementHandle>;
}

/// Shared document handle.
pub type DocumentHandle = Rc<dyn DocumentEnv>;
