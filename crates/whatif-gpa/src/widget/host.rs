//! The page surface the widget logic is written against
//!
//! Both the in-memory [`MockDom`](super::MockDom) and the web-sys backed
//! `BrowserPage` implement [`PageHost`], so the same widget code drives
//! host-side tests and the real page.

use super::template::RowTemplate;
use crate::config::WidgetConfig;
use crate::core::CourseRow;
use crate::error::GpaResult;

/// The four event listeners an active widget owns.
///
/// Row events are delegated to the table body, so rows added later are
/// covered without registering anything new.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// `submit` on the form, always prevented
    FormSubmit,
    /// `click` on the add-class control
    AddClick,
    /// `click` delegated at the table body (remove controls)
    BodyClick,
    /// `change` delegated at the table body (units and grade controls)
    BodyChange,
}

impl Listener {
    /// Every listener, in registration order
    pub const ALL: [Self; 4] = [
        Self::FormSubmit,
        Self::AddClick,
        Self::BodyClick,
        Self::BodyChange,
    ];

    /// DOM event type this listener handles
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::FormSubmit => "submit",
            Self::AddClick | Self::BodyClick => "click",
            Self::BodyChange => "change",
        }
    }
}

/// Page operations needed by [`GpaWidget`](super::GpaWidget)
pub trait PageHost {
    /// Returns true if an element with this id exists
    fn has_anchor(&self, id: &str) -> bool;

    /// Number of rows in the table body
    fn row_count(&self) -> usize;

    /// Snapshot of the row at `index`
    fn read_row(&self, index: usize) -> GpaResult<CourseRow>;

    /// Appends a row rendered from `template`, pre-filled from `row`
    fn append_row(&mut self, template: &RowTemplate, row: &CourseRow) -> GpaResult<()>;

    /// Deletes the row at `index`
    fn remove_row(&mut self, index: usize) -> GpaResult<()>;

    /// Replaces the GPA display text
    fn set_gpa_text(&mut self, text: &str);

    /// Current GPA display text
    fn gpa_text(&self) -> String;

    /// First anchor of `config` missing from the page, if any
    fn missing_anchor<'c>(&self, config: &'c WidgetConfig) -> Option<&'c str> {
        config
            .required_anchors()
            .into_iter()
            .find(|id| !self.has_anchor(id))
    }

    /// Snapshots every row in table order, skipping unreadable ones
    fn read_rows(&self) -> Vec<CourseRow> {
        (0..self.row_count())
            .filter_map(|index| self.read_row(index).ok())
            .collect()
    }
}
