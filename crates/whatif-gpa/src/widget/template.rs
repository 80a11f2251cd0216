//! Markup for rows created by the widget

use std::fmt::Write as _;

use super::dom::DomElement;
use crate::config::WidgetConfig;
use crate::core::{CourseRow, Grade};

/// Rendering contract for a course row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTemplate {
    /// Class on the remove control, used for click delegation
    pub remove_class: String,
    /// Placeholder of the course-name input
    pub name_placeholder: String,
    /// Label of the blank grade option
    pub blank_grade_label: String,
    /// Text of the remove control
    pub remove_label: String,
}

impl Default for RowTemplate {
    fn default() -> Self {
        Self::from_config(&WidgetConfig::default())
    }
}

impl RowTemplate {
    /// Minimum accepted by the units input
    pub const UNITS_MIN: &'static str = "0";
    /// Step of the units input
    pub const UNITS_STEP: &'static str = "0.5";
    /// Placeholder of the units input
    pub const UNITS_PLACEHOLDER: &'static str = "0";

    /// Template using the config's remove class
    #[must_use]
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self {
            remove_class: config.remove_control_class.clone(),
            name_placeholder: "Course Name (optional)".to_string(),
            blank_grade_label: "Select grade".to_string(),
            remove_label: "✕".to_string(),
        }
    }

    /// `(value, label)` pairs of the grade select, blank option first
    #[must_use]
    pub fn grade_options(&self) -> Vec<(&str, &str)> {
        std::iter::once(("", self.blank_grade_label.as_str()))
            .chain(Grade::ALL.iter().map(|g| (g.label(), g.label())))
            .collect()
    }

    /// Builds the row as a mock element tree
    #[must_use]
    pub fn render_dom(&self, row: &CourseRow) -> DomElement {
        let name = DomElement::new("input")
            .with_attr("type", "text")
            .with_attr("name", "course_name")
            .with_attr("placeholder", &self.name_placeholder)
            .with_class("form-control")
            .with_value(row.course_name.as_deref().unwrap_or_default());

        let units = DomElement::new("input")
            .with_attr("type", "number")
            .with_attr("name", "units")
            .with_attr("min", Self::UNITS_MIN)
            .with_attr("step", Self::UNITS_STEP)
            .with_attr("placeholder", Self::UNITS_PLACEHOLDER)
            .with_class("form-control")
            .with_value(row.units.as_deref().unwrap_or_default());

        let selected = selected_grade(row);
        let mut grade = DomElement::new("select")
            .with_attr("name", "grade")
            .with_class("form-select")
            .with_value(selected);
        for (value, label) in self.grade_options() {
            grade = grade.with_child(
                DomElement::new("option")
                    .with_attr("value", value)
                    .with_text(label),
            );
        }

        let remove = DomElement::new("button")
            .with_attr("type", "button")
            .with_class("btn")
            .with_class("btn-outline-danger")
            .with_class("btn-sm")
            .with_class(&self.remove_class)
            .with_text(&self.remove_label);

        DomElement::new("tr")
            .with_attr("data-enrolled", row.kind.attr_value())
            .with_child(cell(name))
            .with_child(cell(units))
            .with_child(cell(grade))
            .with_child(cell(remove).with_class("text-center"))
    }

    /// Builds the inner HTML of the row's `<tr>`
    #[must_use]
    pub fn render_html(&self, row: &CourseRow) -> String {
        let mut html = String::new();

        let name = row.course_name.as_deref().unwrap_or_default();
        let _ = write!(
            html,
            r#"<td class="align-middle"><input type="text" class="form-control" name="course_name" placeholder="{}"{}></td>"#,
            escape_html(&self.name_placeholder),
            value_attr(name),
        );

        let units = row.units.as_deref().unwrap_or_default();
        let _ = write!(
            html,
            r#"<td class="align-middle"><input type="number" class="form-control" name="units" min="{}" step="{}" placeholder="{}"{}></td>"#,
            Self::UNITS_MIN,
            Self::UNITS_STEP,
            Self::UNITS_PLACEHOLDER,
            value_attr(units),
        );

        let selected = selected_grade(row);
        html.push_str(r#"<td class="align-middle"><select class="form-select" name="grade">"#);
        for (value, label) in self.grade_options() {
            let flag = if !value.is_empty() && value == selected {
                " selected"
            } else {
                ""
            };
            let _ = write!(
                html,
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(value),
                flag,
                escape_html(label),
            );
        }
        html.push_str("</select></td>");

        let _ = write!(
            html,
            r#"<td class="align-middle text-center"><button type="button" class="btn btn-outline-danger btn-sm {}">{}</button></td>"#,
            escape_html(&self.remove_class),
            escape_html(&self.remove_label),
        );

        html
    }
}

fn cell(control: DomElement) -> DomElement {
    DomElement::new("td")
        .with_class("align-middle")
        .with_child(control)
}

// A select can only hold one of its option values.
fn selected_grade(row: &CourseRow) -> &str {
    row.grade
        .as_deref()
        .and_then(|g| Grade::parse(g).ok())
        .map_or("", |g| g.label())
}

fn value_attr(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!(r#" value="{}""#, escape_html(value))
    }
}

/// Escapes text for use in HTML content and quoted attributes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
