//! Widget configuration
//!
//! Defaults match the identifiers the GPA page renders, so most pages
//! mount with `WidgetConfig::default()`.

use serde::{Deserialize, Serialize};

use crate::error::GpaResult;

/// How the GPA display element renders a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayFormat {
    /// Text shown when no row qualifies
    pub placeholder: String,
    /// Fixed number of decimal places
    pub decimals: usize,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            placeholder: DisplayFormat::EN_DASH.to_string(),
            decimals: 2,
        }
    }
}

impl DisplayFormat {
    /// Placeholder shown when nothing qualifies
    pub const EN_DASH: &'static str = "–";
}

/// Page anchors and display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    /// Form wrapping the widget; its submission is always suppressed
    pub form_id: String,
    /// Table whose body holds the course rows
    pub table_id: String,
    /// Add-class control
    pub add_button_id: String,
    /// Element showing the current GPA
    pub gpa_display_id: String,
    /// Class carried by every row's remove control
    pub remove_control_class: String,
    /// GPA display format
    pub display: DisplayFormat,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            form_id: "whatIfForm".to_string(),
            table_id: "whatifTable".to_string(),
            add_button_id: "addClassBtn".to_string(),
            gpa_display_id: "gpaValue".to_string(),
            remove_control_class: "remove-row".to_string(),
            display: DisplayFormat::default(),
        }
    }
}

impl WidgetConfig {
    /// Create a config with the page defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> GpaResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the form id
    #[must_use]
    pub fn with_form_id(mut self, id: &str) -> Self {
        self.form_id = id.to_string();
        self
    }

    /// Set the table id
    #[must_use]
    pub fn with_table_id(mut self, id: &str) -> Self {
        self.table_id = id.to_string();
        self
    }

    /// Set the add-class control id
    #[must_use]
    pub fn with_add_button_id(mut self, id: &str) -> Self {
        self.add_button_id = id.to_string();
        self
    }

    /// Set the GPA display id
    #[must_use]
    pub fn with_gpa_display_id(mut self, id: &str) -> Self {
        self.gpa_display_id = id.to_string();
        self
    }

    /// Set the display format
    #[must_use]
    pub fn with_display(mut self, display: DisplayFormat) -> Self {
        self.display = display;
        self
    }

    /// The four anchors that must all exist for the widget to activate
    #[must_use]
    pub fn required_anchors(&self) -> [&str; 4] {
        [
            self.form_id.as_str(),
            self.table_id.as_str(),
            self.add_button_id.as_str(),
            self.gpa_display_id.as_str(),
        ]
    }
}
