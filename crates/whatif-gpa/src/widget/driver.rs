//! Mock page driver
//!
//! Implements [`GpaDriver`] by dispatching DOM events into a [`MockDom`]
//! and routing whatever the registered listeners receive into the widget,
//! the same path the browser listeners take.

use super::dom::{DomEvent, MockDom};
use super::gpa_widget::{EventOutcome, GpaWidget, WidgetEvent};
use super::host::{Listener, PageHost};
use crate::config::WidgetConfig;
use crate::core::{EnrolledCourse, Grade};
use crate::driver::GpaDriver;

#[derive(Debug)]
enum MockPage {
    Active(GpaWidget<MockDom>),
    Inactive(MockDom),
}

/// Driver over a mock page
#[derive(Debug)]
pub struct MockDriver {
    page: MockPage,
    config: WidgetConfig,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Mounts the widget on an empty default page
    #[must_use]
    pub fn new() -> Self {
        Self::mount(MockDom::page(), WidgetConfig::default())
    }

    /// Mounts the widget on `dom`.
    ///
    /// Listeners are registered only when every anchor is present;
    /// otherwise the page is left untouched.
    #[must_use]
    pub fn mount(dom: MockDom, config: WidgetConfig) -> Self {
        let page = if dom.missing_anchor(&config).is_some() {
            MockPage::Inactive(dom)
        } else {
            let mut widget = GpaWidget::bind(dom, config.clone());
            for listener in Listener::ALL {
                widget.host_mut().register_listener(listener);
            }
            MockPage::Active(widget)
        };
        Self { page, config }
    }

    /// Returns true if the widget activated
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.page, MockPage::Active(_))
    }

    /// The widget, when active
    #[must_use]
    pub fn widget(&self) -> Option<&GpaWidget<MockDom>> {
        match &self.page {
            MockPage::Active(widget) => Some(widget),
            MockPage::Inactive(_) => None,
        }
    }

    /// Returns a reference to the page
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        match &self.page {
            MockPage::Active(widget) => widget.host(),
            MockPage::Inactive(dom) => dom,
        }
    }

    fn dom_mut(&mut self) -> &mut MockDom {
        match &mut self.page {
            MockPage::Active(widget) => widget.host_mut(),
            MockPage::Inactive(dom) => dom,
        }
    }

    /// Dispatches an event and lets the widget handle what its listeners see
    pub fn dispatch(&mut self, event: DomEvent) -> Option<EventOutcome> {
        let is_submit = matches!(event, DomEvent::Submit { .. });
        let delivered = self.dom_mut().dispatch_event(event);

        let outcome = match (&mut self.page, delivered) {
            (MockPage::Active(widget), Some(widget_event)) => {
                Some(widget.handle_event(&widget_event))
            }
            _ => None,
        };

        if is_submit {
            let prevented = outcome.is_some_and(|o| o.prevent_default);
            self.dom_mut().complete_submit(prevented);
        }
        outcome
    }

    /// Delivers a widget event directly, bypassing the mock DOM
    pub fn deliver(&mut self, event: WidgetEvent) -> Option<EventOutcome> {
        match &mut self.page {
            MockPage::Active(widget) => Some(widget.handle_event(&event)),
            MockPage::Inactive(_) => None,
        }
    }
}

impl GpaDriver for MockDriver {
    fn add_class(&mut self) {
        let id = self.config.add_button_id.clone();
        self.dispatch(DomEvent::click(&id));
    }

    fn set_units(&mut self, row: usize, units: &str) {
        self.dispatch(DomEvent::change(row, "units", units));
    }

    fn set_grade(&mut self, row: usize, grade: &str) {
        self.dispatch(DomEvent::change(row, "grade", grade));
    }

    fn click_remove(&mut self, row: usize) {
        let class = self.config.remove_control_class.clone();
        self.dispatch(DomEvent::row_click(row, &class));
    }

    fn submit(&mut self) -> bool {
        let id = self.config.form_id.clone();
        let before = self.dom().native_submissions();
        self.dispatch(DomEvent::submit(&id));
        self.dom().native_submissions() == before
    }

    fn seed_enrolled(&mut self, units: f64, grade: Grade) {
        if let MockPage::Active(widget) = &mut self.page {
            widget.seed_enrolled(&[EnrolledCourse {
                course_name: String::new(),
                units,
                grade: Some(grade),
            }]);
        }
    }

    fn gpa_text(&self) -> String {
        self.dom().gpa_text()
    }

    fn row_count(&self) -> usize {
        self.dom().row_count()
    }
}
