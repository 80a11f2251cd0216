//! Widgets mounted on the page, keyed by form id
//!
//! The browser start hook mounts on the default form as soon as the module
//! loads. A later configured mount for the same form must reach that widget
//! instead of wiring a second set of listeners.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use super::gpa_widget::GpaWidget;
use super::host::PageHost;
use crate::core::EnrolledCourse;

/// A widget shared between the listeners of one page
pub type SharedWidget<H> = Rc<RefCell<GpaWidget<H>>>;

/// Mounted widgets by form id
#[derive(Debug)]
pub struct MountRegistry<H: PageHost> {
    widgets: HashMap<String, SharedWidget<H>>,
}

impl<H: PageHost> Default for MountRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: PageHost> MountRegistry<H> {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }

    /// Returns true if a widget is mounted on the form
    #[must_use]
    pub fn is_mounted(&self, form_id: &str) -> bool {
        self.widgets.contains_key(form_id)
    }

    /// The widget mounted on the form
    #[must_use]
    pub fn get(&self, form_id: &str) -> Option<SharedWidget<H>> {
        self.widgets.get(form_id).map(Rc::clone)
    }

    /// Records a freshly wired widget under its form id
    pub fn register(&mut self, widget: SharedWidget<H>) {
        let form_id = widget.borrow().config().form_id.clone();
        self.widgets.insert(form_id, widget);
    }

    /// Seeds enrolled rows into the widget already mounted on the form.
    ///
    /// Returns false when nothing is mounted there, so the caller mounts
    /// a new widget instead.
    pub fn seed_mounted(&self, form_id: &str, seed: &[EnrolledCourse]) -> bool {
        let Some(widget) = self.widgets.get(form_id) else {
            return false;
        };
        if seed.is_empty() {
            return true;
        }
        match widget.try_borrow_mut() {
            Ok(mut widget) => widget.seed_enrolled(seed),
            Err(_) => debug!(form_id, "widget busy, seed dropped"),
        }
        true
    }

    /// Number of mounted widgets
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns true if nothing is mounted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
