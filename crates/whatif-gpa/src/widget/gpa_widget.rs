//! The what-if GPA widget
//!
//! Holds the page host, reacts to the four delegated events and keeps the
//! GPA display in sync with the rows. Every operation runs to completion
//! inside one event callback.

use tracing::{debug, info, trace};

use super::host::PageHost;
use super::template::RowTemplate;
use crate::config::WidgetConfig;
use crate::core::{CourseRow, EnrolledCourse, GpaTally};
use crate::error::{GpaError, GpaResult};

/// Named controls of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    /// `input[name="course_name"]`
    CourseName,
    /// `input[name="units"]`
    Units,
    /// `select[name="grade"]`
    Grade,
}

impl RowField {
    /// Identifies a control by tag and `name`, as `Element::matches` would
    #[must_use]
    pub fn from_control(tag: &str, name: &str) -> Option<Self> {
        let is = |expected: &str| tag.eq_ignore_ascii_case(expected);
        match name {
            "course_name" if is("input") => Some(Self::CourseName),
            "units" if is("input") => Some(Self::Units),
            "grade" if is("select") => Some(Self::Grade),
            _ => None,
        }
    }

    /// Returns true if a change to this control can move the GPA
    #[must_use]
    pub const fn affects_gpa(&self) -> bool {
        matches!(self, Self::Units | Self::Grade)
    }
}

/// Events delivered by the page's listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The add-class control was activated
    AddClicked,
    /// A remove control inside the given row was activated
    RemoveClicked {
        /// Row index in the table body
        row: usize,
    },
    /// A row control fired `change`
    FieldChanged {
        /// Which control changed
        field: RowField,
    },
    /// The form was submitted
    Submitted,
}

/// What the listener should do after the widget handled an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Call `preventDefault()` on the native event
    pub prevent_default: bool,
    /// The GPA display was recomputed
    pub recomputed: bool,
}

/// Result of a remove request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRemoval {
    /// The row was deleted
    Removed,
    /// The row is enrolled and stays
    Refused,
    /// No such row
    Missing,
}

/// What-if GPA widget bound to a page
#[derive(Debug)]
pub struct GpaWidget<H: PageHost> {
    host: H,
    config: WidgetConfig,
    template: RowTemplate,
    tally: GpaTally,
    display: String,
}

impl<H: PageHost> GpaWidget<H> {
    /// Binds to the page if all required anchors exist, then computes once
    /// so pre-seeded rows are reflected.
    pub fn attach(host: H, config: WidgetConfig) -> GpaResult<Self> {
        if let Some(id) = host.missing_anchor(&config) {
            return Err(GpaError::missing_anchor(id));
        }
        Ok(Self::bind(host, config))
    }

    // Caller has checked the anchors
    pub(crate) fn bind(host: H, config: WidgetConfig) -> Self {
        let template = RowTemplate::from_config(&config);
        let mut widget = Self {
            host,
            config,
            template,
            tally: GpaTally::new(),
            display: String::new(),
        };
        widget.compute_gpa();
        info!(
            rows = widget.host.row_count(),
            gpa = %widget.display,
            "what-if GPA widget attached"
        );
        widget
    }

    /// Like [`attach`](Self::attach), but a page without the widget is not
    /// an error: returns `None` and the caller registers nothing.
    pub fn mount(host: H, config: WidgetConfig) -> Option<Self> {
        match Self::attach(host, config) {
            Ok(widget) => Some(widget),
            Err(err) => {
                debug!(%err, "what-if GPA widget inactive on this page");
                None
            }
        }
    }

    /// Appends a blank hypothetical row
    pub fn add_row(&mut self) {
        match self.host.append_row(&self.template, &CourseRow::blank()) {
            Ok(()) => debug!(rows = self.host.row_count(), "row added"),
            Err(err) => debug!(%err, "row could not be added"),
        }
        self.compute_gpa();
    }

    /// Appends enrolled rows shipped as data rather than markup
    pub fn seed_enrolled(&mut self, courses: &[EnrolledCourse]) {
        for course in courses {
            if let Err(err) = self.host.append_row(&self.template, &course.to_row()) {
                debug!(%err, course = %course.course_name, "enrolled row could not be added");
            }
        }
        self.compute_gpa();
    }

    /// Deletes a hypothetical row; enrolled rows are silently kept
    pub fn remove_row(&mut self, index: usize) -> RowRemoval {
        let row = match self.host.read_row(index) {
            Ok(row) => row,
            Err(err) => {
                debug!(%err, "remove ignored");
                return RowRemoval::Missing;
            }
        };

        if !row.kind.is_removable() {
            debug!(index, "enrolled row kept");
            return RowRemoval::Refused;
        }

        if let Err(err) = self.host.remove_row(index) {
            debug!(%err, "remove failed");
            return RowRemoval::Missing;
        }
        debug!(index, rows = self.host.row_count(), "row removed");
        self.compute_gpa();
        RowRemoval::Removed
    }

    /// Recomputes the GPA from every row and updates the display
    pub fn compute_gpa(&mut self) -> &str {
        let rows = self.host.read_rows();
        self.tally = GpaTally::from_rows(&rows);
        self.display = self.tally.display(&self.config.display);
        self.host.set_gpa_text(&self.display);
        trace!(
            counted = self.tally.counted_rows,
            skipped = self.tally.skipped_rows,
            gpa = %self.display,
            "gpa recomputed"
        );
        &self.display
    }

    /// Handles one delegated event
    pub fn handle_event(&mut self, event: &WidgetEvent) -> EventOutcome {
        match *event {
            WidgetEvent::AddClicked => {
                self.add_row();
                EventOutcome {
                    prevent_default: false,
                    recomputed: true,
                }
            }
            WidgetEvent::RemoveClicked { row } => EventOutcome {
                prevent_default: false,
                recomputed: self.remove_row(row) == RowRemoval::Removed,
            },
            WidgetEvent::FieldChanged { field } if field.affects_gpa() => {
                self.compute_gpa();
                EventOutcome {
                    prevent_default: false,
                    recomputed: true,
                }
            }
            WidgetEvent::FieldChanged { .. } => EventOutcome::default(),
            WidgetEvent::Submitted => {
                trace!("form submission suppressed");
                EventOutcome {
                    prevent_default: true,
                    recomputed: false,
                }
            }
        }
    }

    /// Text currently shown in the GPA display
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Sums behind the current display
    #[must_use]
    pub fn tally(&self) -> &GpaTally {
        &self.tally
    }

    /// The widget configuration
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Returns a reference to the page host
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns a mutable reference to the page host
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Releases the page host
    pub fn into_host(self) -> H {
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Grade;
    use crate::widget::dom::MockDom;

    fn widget(dom: MockDom) -> GpaWidget<MockDom> {
        GpaWidget::attach(dom, WidgetConfig::default()).unwrap()
    }

    // ===== RowField tests =====

    #[test]
    fn test_row_field_from_control() {
        assert_eq!(RowField::from_control("INPUT", "units"), Some(RowField::Units));
        assert_eq!(RowField::from_control("select", "grade"), Some(RowField::Grade));
        assert_eq!(
            RowField::from_control("input", "course_name"),
            Some(RowField::CourseName)
        );
        assert_eq!(RowField::from_control("select", "units"), None);
        assert_eq!(RowField::from_control("input", "grade"), None);
        assert_eq!(RowField::from_control("button", "units"), None);
    }

    #[test]
    fn test_row_field_affects_gpa() {
        assert!(RowField::Units.affects_gpa());
        assert!(RowField::Grade.affects_gpa());
        assert!(!RowField::CourseName.affects_gpa());
    }

    // ===== attach tests =====

    #[test]
    fn test_attach_computes_initial_gpa() {
        let widget = widget(MockDom::page().with_enrolled("3", "A"));
        assert_eq!(widget.display(), "4.00");
        assert_eq!(widget.host().gpa_text(), "4.00");
    }

    #[test]
    fn test_attach_empty_page_shows_placeholder() {
        let widget = widget(MockDom::page());
        assert_eq!(widget.display(), "–");
    }

    #[test]
    fn test_attach_fails_for_each_missing_anchor() {
        for id in WidgetConfig::default().required_anchors() {
            let result = GpaWidget::attach(MockDom::page().without(id), WidgetConfig::default());
            assert!(
                matches!(&result, Err(GpaError::MissingAnchor { id: missing }) if missing == id),
                "{id}"
            );
        }
    }

    #[test]
    fn test_mount_missing_anchor_is_none() {
        let dom = MockDom::page().without("gpaValue");
        assert!(GpaWidget::mount(dom, WidgetConfig::default()).is_none());
    }

    #[test]
    fn test_attach_with_custom_ids() {
        let config = WidgetConfig::new().with_gpa_display_id("gpa");
        let dom = MockDom::page_for(&config).with_enrolled("2", "B");
        let widget = GpaWidget::attach(dom, config).unwrap();
        assert_eq!(widget.host().get_element_text("gpa"), Some("3.00"));
        assert_eq!(widget.config().gpa_display_id, "gpa");
    }

    // ===== add_row tests =====

    #[test]
    fn test_add_row_is_blank_and_neutral() {
        let mut widget = widget(MockDom::page().with_enrolled("3", "A"));
        widget.add_row();
        assert_eq!(widget.host().row_count(), 2);
        assert_eq!(widget.display(), "4.00");

        let row = widget.host().read_row(1).unwrap();
        assert_eq!(row, CourseRow::blank());
    }

    // ===== remove_row tests =====

    #[test]
    fn test_remove_hypothetical_row() {
        let mut widget = widget(MockDom::page().with_enrolled("3", "A"));
        widget.add_row();
        assert_eq!(widget.remove_row(1), RowRemoval::Removed);
        assert_eq!(widget.host().row_count(), 1);
    }

    #[test]
    fn test_remove_enrolled_row_refused() {
        let mut widget = widget(MockDom::page().with_enrolled("3", "A"));
        assert_eq!(widget.remove_row(0), RowRemoval::Refused);
        assert_eq!(widget.host().row_count(), 1);
        assert_eq!(widget.display(), "4.00");
    }

    #[test]
    fn test_remove_missing_row() {
        let mut widget = widget(MockDom::page());
        assert_eq!(widget.remove_row(3), RowRemoval::Missing);
    }

    // ===== seed_enrolled tests =====

    #[test]
    fn test_seed_enrolled() {
        let mut widget = widget(MockDom::page());
        widget.seed_enrolled(&[
            EnrolledCourse {
                course_name: "CS 10".to_string(),
                units: 3.0,
                grade: Some(Grade::A),
            },
            EnrolledCourse {
                course_name: "HIST 4".to_string(),
                units: 4.0,
                grade: Some(Grade::B),
            },
        ]);
        assert_eq!(widget.display(), "3.43");
        assert_eq!(widget.remove_row(0), RowRemoval::Refused);
        assert_eq!(widget.tally().counted_rows, 2);
    }

    // ===== handle_event tests =====

    #[test]
    fn test_submit_is_prevented() {
        let mut widget = widget(MockDom::page());
        let outcome = widget.handle_event(&WidgetEvent::Submitted);
        assert!(outcome.prevent_default);
        assert!(!outcome.recomputed);
    }

    #[test]
    fn test_course_name_change_does_not_recompute() {
        let mut widget = widget(MockDom::page());
        let outcome = widget.handle_event(&WidgetEvent::FieldChanged {
            field: RowField::CourseName,
        });
        assert_eq!(outcome, EventOutcome::default());
    }

    #[test]
    fn test_refused_remove_does_not_recompute() {
        let mut widget = widget(MockDom::page().with_enrolled("3", "A"));
        let outcome = widget.handle_event(&WidgetEvent::RemoveClicked { row: 0 });
        assert!(!outcome.recomputed);
        assert!(!outcome.prevent_default);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let mut widget = widget(MockDom::page().with_enrolled("3", "A").with_enrolled("4", "B"));
        let first = widget.compute_gpa().to_string();
        let second = widget.compute_gpa().to_string();
        assert_eq!(first, "3.43");
        assert_eq!(first, second);
    }

    #[test]
    fn test_into_host() {
        let widget = widget(MockDom::page().with_enrolled("1", "F"));
        let dom = widget.into_host();
        assert_eq!(dom.gpa_text(), "0.00");
    }
}
