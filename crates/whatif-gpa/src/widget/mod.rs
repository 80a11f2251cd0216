//! The GPA widget and the pages it can run on
//!
//! The widget logic only sees [`PageHost`]. [`MockDom`] backs host-side
//! tests; `BrowserPage` (feature `wasm`) backs the real page.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;
mod gpa_widget;
mod host;
mod registry;
mod template;

#[cfg(feature = "wasm")]
pub use browser::{gpa_for_rows_json, mount, mount_page, mount_with_config, BrowserPage};
pub use dom::{DomElement, DomEvent, MockDom};
pub use driver::MockDriver;
pub use gpa_widget::{EventOutcome, GpaWidget, RowField, RowRemoval, WidgetEvent};
pub use host::{Listener, PageHost};
pub use registry::{MountRegistry, SharedWidget};
pub use template::{escape_html, RowTemplate};
