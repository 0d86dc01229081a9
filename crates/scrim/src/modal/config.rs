#![forbid(unsafe_code)]

//! Overlay configuration and lifecycle hooks.
//!
//! Configuration is fixed for the lifetime of an instance; the show intent
//! is the only dynamic input. All hooks are optional and default to no-ops.

use core::fmt;

use scrim_core::element::ElementHandle;

use crate::modal::events::ModalAction;
use crate::modal::registry::ModalKey;
use crate::modal::stage::TransitionParts;

/// Class names applied to the projected nodes.
///
/// Everything derives from `base` unless overridden: the body gets `base`
/// itself, the backdrop `{base}-backdrop`, and the animation primitive is
/// handed `base` as its transition-class prefix.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassNames {
    pub base: String,
    pub body: Option<String>,
    pub backdrop: Option<String>,
    pub transition_prefix: Option<String>,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self::with_base("scrim")
    }
}

impl ClassNames {
    /// Create class names derived from `base`.
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            body: None,
            backdrop: None,
            transition_prefix: None,
        }
    }

    /// Override the body class.
    pub fn body(mut self, class: impl Into<String>) -> Self {
        self.body = Some(class.into());
        self
    }

    /// Override the backdrop class.
    pub fn backdrop(mut self, class: impl Into<String>) -> Self {
        self.backdrop = Some(class.into());
        self
    }

    /// Override the transition-class prefix.
    pub fn transition_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.transition_prefix = Some(prefix.into());
        self
    }

    /// Resolved body class.
    pub fn body_class(&self) -> String {
        self.body.clone().unwrap_or_else(|| self.base.clone())
    }

    /// Resolved backdrop class.
    pub fn backdrop_class(&self) -> String {
        self.backdrop
            .clone()
            .unwrap_or_else(|| format!("{}-backdrop", self.base))
    }

    /// Resolved transition-class prefix.
    pub fn prefix(&self) -> String {
        self.transition_prefix
            .clone()
            .unwrap_or_else(|| self.base.clone())
    }
}

/// Overlay configuration.
#[derive(Debug, Clone)]
pub struct ModalConfig {
    /// Stable instance key; generated when absent. A caller-supplied key
    /// must be unique among concurrently open overlays sharing a container.
    pub key: Option<ModalKey>,
    /// Mount container; the document body when absent.
    pub append_to: Option<ElementHandle>,
    /// Render (and animate) a backdrop behind the body.
    pub backdrop: bool,
    /// Capture focus on open and restore it on close.
    pub grab_focus: bool,
    /// Suppress container scrolling while open.
    pub lock_scroll: bool,
    /// Opt into document-level clicks; clicks outside the root request close.
    pub document_clicks: bool,
    /// Backdrop clicks request close.
    pub close_on_backdrop: bool,
    /// Escape requests close while this overlay is topmost.
    pub close_on_escape: bool,
    /// Class names for the projected nodes.
    pub class_names: ClassNames,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            key: None,
            append_to: None,
            backdrop: true,
            grab_focus: true,
            lock_scroll: true,
            document_clicks: false,
            close_on_backdrop: true,
            close_on_escape: true,
            class_names: ClassNames::default(),
        }
    }
}

impl ModalConfig {
    /// Set the instance key.
    pub fn key(mut self, key: impl Into<ModalKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the mount container.
    pub fn append_to(mut self, container: ElementHandle) -> Self {
        self.append_to = Some(container);
        self
    }

    /// Enable or suppress the backdrop.
    pub fn backdrop(mut self, backdrop: bool) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// Enable or disable focus capture.
    pub fn grab_focus(mut self, grab: bool) -> Self {
        self.grab_focus = grab;
        self
    }

    /// Enable or disable the scroll lock.
    pub fn lock_scroll(mut self, lock: bool) -> Self {
        self.lock_scroll = lock;
        self
    }

    /// Opt in or out of document-level click handling.
    pub fn document_clicks(mut self, enabled: bool) -> Self {
        self.document_clicks = enabled;
        self
    }

    /// Set close-on-backdrop-click behavior.
    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }

    /// Set close-on-escape behavior.
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Set the class names.
    pub fn class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    /// Parts participating in this overlay's transitions.
    pub fn expected_parts(&self) -> TransitionParts {
        TransitionParts::for_backdrop(self.backdrop)
    }
}

type Hook = Box<dyn FnMut()>;

/// Lifecycle hooks. Every hook is optional; absent hooks are no-ops.
///
/// `on_close_request` never closes anything by itself; the host decides
/// whether to flip the show intent in response.
#[derive(Default)]
pub struct ModalHooks {
    pub(crate) before_open: Option<Hook>,
    pub(crate) before_close: Option<Hook>,
    pub(crate) on_open: Option<Hook>,
    pub(crate) on_close: Option<Hook>,
    pub(crate) on_close_request: Option<Box<dyn FnMut(ModalAction)>>,
}

impl ModalHooks {
    /// Create an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when an open transition begins.
    pub fn before_open(mut self, hook: impl FnMut() + 'static) -> Self {
        self.before_open = Some(Box::new(hook));
        self
    }

    /// Called when a close transition begins.
    pub fn before_close(mut self, hook: impl FnMut() + 'static) -> Self {
        self.before_close = Some(Box::new(hook));
        self
    }

    /// Called when the overlay reaches `Opened`.
    pub fn on_open(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_open = Some(Box::new(hook));
        self
    }

    /// Called when the overlay reaches `Closed`.
    pub fn on_close(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }

    /// Called when the user asks the overlay to close (Escape, outside
    /// click, backdrop click).
    pub fn on_close_request(mut self, hook: impl FnMut(ModalAction) + 'static) -> Self {
        self.on_close_request = Some(Box::new(hook));
        self
    }

    pub(crate) fn run_before_open(&mut self) {
        if let Some(hook) = self.before_open.as_mut() {
            hook();
        }
    }

    pub(crate) fn run_before_close(&mut self) {
        if let Some(hook) = self.before_close.as_mut() {
            hook();
        }
    }

    pub(crate) fn run_on_open(&mut self) {
        if let Some(hook) = self.on_open.as_mut() {
            hook();
        }
    }

    pub(crate) fn run_on_close(&mut self) {
        if let Some(hook) = self.on_close.as_mut() {
            hook();
        }
    }

    pub(crate) fn run_close_request(&mut self, action: ModalAction) {
        if let Some(hook) = self.on_close_request.as_mut() {
            hook(action);
        }
    }
}

impl fmt::Debug for ModalHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalHooks")
            .field("before_open", &self.before_open.is_some())
            .field("before_close", &self.before_close.is_some())
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_close_request", &self.on_close_request.is_some())
            .finish()
    }
}
