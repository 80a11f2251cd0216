//! What-if GPA calculator widget
//!
//! Lets a student add and remove hypothetical course rows (name, units,
//! letter grade) next to their enrolled courses and shows a live,
//! units-weighted GPA. Nothing is persisted and the form never submits.
//!
//! # Example
//!
//! ```rust
//! use whatif_gpa::prelude::*;
//!
//! let page = MockDom::page().with_enrolled("3", "A");
//! let mut widget = GpaWidget::attach(page, WidgetConfig::default()).unwrap();
//! assert_eq!(widget.display(), "4.00");
//!
//! // A new row does not count until it has units and a grade
//! widget.add_row();
//! assert_eq!(widget.display(), "4.00");
//!
//! // Enrolled rows cannot be removed
//! assert_eq!(widget.remove_row(0), RowRemoval::Refused);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod error;

/// Widget logic plus the mock and browser pages it runs on
pub mod widget;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{DisplayFormat, WidgetConfig};
    pub use crate::core::{
        compute_gpa_text, format_gpa, parse_units, CourseRow, EnrolledCourse, GpaTally, Grade,
        RowKind,
    };
    pub use crate::driver::GpaDriver;
    pub use crate::error::{GpaError, GpaResult};
    pub use crate::widget::{
        DomElement, DomEvent, EventOutcome, GpaWidget, Listener, MockDom, MockDriver, PageHost,
        RowField, RowRemoval, RowTemplate, WidgetEvent,
    };

    #[cfg(feature = "wasm")]
    pub use crate::widget::BrowserPage;
}
