//! Mock DOM for the GPA page
//!
//! Models the four anchors, the table body rows and delegated event
//! dispatch, so the widget can be exercised without a browser.

use std::collections::HashMap;

use super::gpa_widget::{RowField, WidgetEvent};
use super::host::{Listener, PageHost};
use super::template::RowTemplate;
use crate::config::WidgetConfig;
use crate::core::{CourseRow, RowKind};
use crate::error::{GpaError, GpaResult};

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets the control value
    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Current control value (empty when unset)
    #[must_use]
    pub fn value(&self) -> &str {
        self.get_attr("value").unwrap_or_default()
    }

    /// Sets the control value
    pub fn set_value(&mut self, value: &str) {
        self.attributes
            .insert("value".to_string(), value.to_string());
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Depth-first search of the descendants (self excluded)
    #[must_use]
    pub fn find<P>(&self, pred: P) -> Option<&DomElement>
    where
        P: Fn(&DomElement) -> bool + Copy,
    {
        for child in &self.children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable depth-first search of the descendants (self excluded)
    pub fn find_mut<P>(&mut self, pred: P) -> Option<&mut DomElement>
    where
        P: Fn(&DomElement) -> bool + Copy,
    {
        for child in &mut self.children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_mut(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Equivalent of `querySelector('tag[name="name"]')`
    #[must_use]
    pub fn find_control(&self, tag: &str, name: &str) -> Option<&DomElement> {
        self.find(|e| e.tag == tag && e.get_attr("name") == Some(name))
    }

    /// Descendant carrying the given class
    #[must_use]
    pub fn find_class(&self, class: &str) -> Option<&DomElement> {
        self.find(|e| e.has_class(class))
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click on an element addressed by id
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Click on an element inside a table body row
    RowClick {
        /// Index of the row in the table body
        row: usize,
        /// Class of the clicked element
        class: String,
    },
    /// Change of a named control inside a table body row
    Change {
        /// Index of the row in the table body
        row: usize,
        /// Value of the control's `name` attribute
        name: String,
        /// The new value
        value: String,
    },
    /// Form submission
    Submit {
        /// The ID of the submitted form
        element_id: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a click on a row element carrying `class`
    #[must_use]
    pub fn row_click(row: usize, class: &str) -> Self {
        Self::RowClick {
            row,
            class: class.to_string(),
        }
    }

    /// Creates a change event
    #[must_use]
    pub fn change(row: usize, name: &str, value: &str) -> Self {
        Self::Change {
            row,
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a submit event
    #[must_use]
    pub fn submit(element_id: &str) -> Self {
        Self::Submit {
            element_id: element_id.to_string(),
        }
    }
}

/// Mock GPA page
#[derive(Debug)]
pub struct MockDom {
    /// Identifiers the page was built with
    config: WidgetConfig,
    /// Anchor elements by ID
    anchors: HashMap<String, DomElement>,
    /// Rows of the table body
    rows: Vec<DomElement>,
    /// Registered listeners
    listeners: Vec<Listener>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
    /// Submissions that reached the network
    native_submissions: usize,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty page with no anchors
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: WidgetConfig::default(),
            anchors: HashMap::new(),
            rows: Vec::new(),
            listeners: Vec::new(),
            event_history: Vec::new(),
            native_submissions: 0,
        }
    }

    /// Creates the GPA page with the default identifiers
    #[must_use]
    pub fn page() -> Self {
        Self::page_for(&WidgetConfig::default())
    }

    /// Creates the GPA page with the identifiers of `config`
    #[must_use]
    pub fn page_for(config: &WidgetConfig) -> Self {
        let mut dom = Self {
            config: config.clone(),
            ..Self::new()
        };

        dom.register_element(DomElement::new("form").with_id(&config.form_id));
        dom.register_element(
            DomElement::new("table")
                .with_id(&config.table_id)
                .with_class("table")
                .with_child(DomElement::new("tbody")),
        );
        dom.register_element(
            DomElement::new("button")
                .with_id(&config.add_button_id)
                .with_attr("type", "button")
                .with_text("Add Class"),
        );
        dom.register_element(DomElement::new("span").with_id(&config.gpa_display_id));

        dom
    }

    /// Removes an anchor, for pages that do not carry the widget
    #[must_use]
    pub fn without(mut self, id: &str) -> Self {
        self.anchors.remove(id);
        self
    }

    /// Adds a server-rendered row to the table body
    #[must_use]
    pub fn with_seeded_row(mut self, row: DomElement) -> Self {
        self.rows.push(row);
        self
    }

    /// Adds a server-rendered enrolled row
    #[must_use]
    pub fn with_enrolled(self, units: &str, grade: &str) -> Self {
        let template = RowTemplate::from_config(&self.config);
        let row = template.render_dom(&CourseRow::enrolled(units, grade));
        self.with_seeded_row(row)
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.anchors.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.anchors.get(id)
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.anchors.get(id).map(|e| e.text_content.as_str())
    }

    /// Rows of the table body
    #[must_use]
    pub fn rows(&self) -> &[DomElement] {
        &self.rows
    }

    /// Registers a listener
    pub fn register_listener(&mut self, listener: Listener) {
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    /// Registered listeners
    #[must_use]
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    /// Dispatches an event and returns what a listener would receive.
    ///
    /// Changes are applied to the control first, as the browser does before
    /// firing `change`. Events without a matching listener return `None`.
    pub fn dispatch_event(&mut self, event: DomEvent) -> Option<WidgetEvent> {
        self.event_history.push(event.clone());

        match event {
            DomEvent::Click { element_id } => (element_id == self.config.add_button_id
                && self.is_listening(Listener::AddClick))
            .then_some(WidgetEvent::AddClicked),
            DomEvent::RowClick { row, class } => {
                let on_remove = class == self.config.remove_control_class
                    && self
                        .rows
                        .get(row)
                        .is_some_and(|tr| tr.find_class(&class).is_some());
                (on_remove && self.is_listening(Listener::BodyClick))
                    .then_some(WidgetEvent::RemoveClicked { row })
            }
            DomEvent::Change { row, name, value } => {
                let control = self
                    .rows
                    .get_mut(row)?
                    .find_mut(|e| e.get_attr("name") == Some(name.as_str()))?;
                control.set_value(&value);
                let field = RowField::from_control(&control.tag, &name);
                if self.is_listening(Listener::BodyChange) {
                    field.map(|field| WidgetEvent::FieldChanged { field })
                } else {
                    None
                }
            }
            DomEvent::Submit { element_id } => (element_id == self.config.form_id
                && self.is_listening(Listener::FormSubmit))
            .then_some(WidgetEvent::Submitted),
        }
    }

    /// Finishes a submit dispatch; unprevented submissions reach the network
    pub fn complete_submit(&mut self, prevented: bool) {
        if !prevented {
            self.native_submissions += 1;
        }
    }

    /// Number of submissions that were not prevented
    #[must_use]
    pub fn native_submissions(&self) -> usize {
        self.native_submissions
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }
}

impl PageHost for MockDom {
    fn has_anchor(&self, id: &str) -> bool {
        self.anchors.contains_key(id)
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn read_row(&self, index: usize) -> GpaResult<CourseRow> {
        let tr = self.rows.get(index).ok_or(GpaError::RowOutOfRange {
            index,
            len: self.rows.len(),
        })?;
        let value = |tag: &str, name: &str| tr.find_control(tag, name).map(|e| e.value().to_string());

        Ok(CourseRow {
            course_name: value("input", "course_name"),
            units: value("input", "units"),
            grade: value("select", "grade"),
            kind: RowKind::from_attr(tr.get_attr("data-enrolled")),
        })
    }

    fn append_row(&mut self, template: &RowTemplate, row: &CourseRow) -> GpaResult<()> {
        self.rows.push(template.render_dom(row));
        Ok(())
    }

    fn remove_row(&mut self, index: usize) -> GpaResult<()> {
        if index >= self.rows.len() {
            return Err(GpaError::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        self.rows.remove(index);
        Ok(())
    }

    fn set_gpa_text(&mut self, text: &str) {
        if let Some(display) = self.anchors.get_mut(&self.config.gpa_display_id) {
            display.set_text(text);
        }
    }

    fn gpa_text(&self) -> String {
        self.get_element_text(&self.config.gpa_display_id)
            .unwrap_or_default()
            .to_string()
    }
}
