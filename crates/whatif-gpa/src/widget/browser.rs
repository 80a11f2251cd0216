//! Browser WASM bindings for the GPA widget
//!
//! [`BrowserPage`] is the web-sys [`PageHost`]. Mounting registers four
//! listeners (form submit, add click, and click/change delegated at the
//! table body) that share one widget for the lifetime of the page.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, Document, Element, Event, HtmlInputElement, HtmlSelectElement,
    HtmlTableRowElement, HtmlTableSectionElement, Node,
};

use super::gpa_widget::{GpaWidget, RowField, WidgetEvent};
use super::host::{Listener, PageHost};
use super::registry::{MountRegistry, SharedWidget};
use super::template::RowTemplate;
use crate::config::WidgetConfig;
use crate::core::{compute_gpa_text, CourseRow, EnrolledCourse, RowKind};
use crate::error::{GpaError, GpaResult};

thread_local! {
    static MOUNTED: RefCell<MountRegistry<BrowserPage>> = RefCell::new(MountRegistry::new());
}

fn dom_err(value: JsValue) -> GpaError {
    GpaError::Dom(format!("{value:?}"))
}

/// The GPA page as seen through web-sys
#[derive(Debug, Clone)]
pub struct BrowserPage {
    document: Document,
    form: Element,
    add_button: Element,
    body: HtmlTableSectionElement,
    gpa_display: Element,
}

impl BrowserPage {
    /// Looks up the anchors of `config` in the current document
    pub fn locate(config: &WidgetConfig) -> GpaResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GpaError::Dom("no document".to_string()))?;
        Self::locate_in(document, config)
    }

    /// Looks up the anchors of `config` in `document`
    pub fn locate_in(document: Document, config: &WidgetConfig) -> GpaResult<Self> {
        let anchor = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| GpaError::missing_anchor(id))
        };

        let form = anchor(&config.form_id)?;
        let table = anchor(&config.table_id)?;
        let add_button = anchor(&config.add_button_id)?;
        let gpa_display = anchor(&config.gpa_display_id)?;

        let body = table
            .query_selector("tbody")
            .map_err(dom_err)?
            .and_then(|e| e.dyn_into::<HtmlTableSectionElement>().ok())
            .ok_or_else(|| GpaError::missing_anchor(&format!("{} tbody", config.table_id)))?;

        Ok(Self {
            document,
            form,
            add_button,
            body,
            gpa_display,
        })
    }

    fn row_element(&self, index: usize) -> GpaResult<Element> {
        let rows = self.body.rows();
        u32::try_from(index)
            .ok()
            .and_then(|i| rows.item(i))
            .ok_or(GpaError::RowOutOfRange {
                index,
                len: rows.length() as usize,
            })
    }
}

fn control_value(row: &Element, selector: &str) -> Option<String> {
    let control = row.query_selector(selector).ok().flatten()?;
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    control
        .dyn_ref::<HtmlSelectElement>()
        .map(HtmlSelectElement::value)
}

impl PageHost for BrowserPage {
    fn has_anchor(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn row_count(&self) -> usize {
        self.body.rows().length() as usize
    }

    fn read_row(&self, index: usize) -> GpaResult<CourseRow> {
        let tr = self.row_element(index)?;
        Ok(CourseRow {
            course_name: control_value(&tr, r#"input[name="course_name"]"#),
            units: control_value(&tr, r#"input[name="units"]"#),
            grade: control_value(&tr, r#"select[name="grade"]"#),
            kind: RowKind::from_attr(tr.get_attribute("data-enrolled").as_deref()),
        })
    }

    fn append_row(&mut self, template: &RowTemplate, row: &CourseRow) -> GpaResult<()> {
        let tr = self.document.create_element("tr").map_err(dom_err)?;
        tr.set_attribute("data-enrolled", row.kind.attr_value())
            .map_err(dom_err)?;
        tr.set_inner_html(&template.render_html(row));
        self.body.append_child(&tr).map_err(dom_err)?;
        Ok(())
    }

    fn remove_row(&mut self, index: usize) -> GpaResult<()> {
        self.row_element(index)?.remove();
        Ok(())
    }

    fn set_gpa_text(&mut self, text: &str) {
        self.gpa_display.set_text_content(Some(text));
    }

    fn gpa_text(&self) -> String {
        self.gpa_display.text_content().unwrap_or_default()
    }
}

fn deliver(widget: &SharedWidget<BrowserPage>, event: WidgetEvent, native: &Event) {
    let Ok(mut widget) = widget.try_borrow_mut() else {
        debug!(?event, "widget busy, event dropped");
        return;
    };
    let outcome = widget.handle_event(&event);
    if outcome.prevent_default {
        native.prevent_default();
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

// Index of the body row containing the clicked remove control
fn remove_target(event: &Event, body: &HtmlTableSectionElement, class: &str) -> Option<usize> {
    let target = event_element(event)?;
    let control = target.closest(&format!(".{class}")).ok()??;
    let row = control
        .closest("tr")
        .ok()??
        .dyn_into::<HtmlTableRowElement>()
        .ok()?;
    let node: &Node = &row;
    if !body.contains(Some(node)) {
        return None;
    }
    usize::try_from(row.section_row_index()).ok()
}

fn changed_field(event: &Event) -> Option<RowField> {
    let target = event_element(event)?;
    let name = target.get_attribute("name")?;
    RowField::from_control(&target.tag_name(), &name)
}

fn listen<F>(target: &Element, listener: Listener, handler: F) -> GpaResult<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(listener.event_type(), closure.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

fn wire(
    page: &BrowserPage,
    widget: &SharedWidget<BrowserPage>,
    config: &WidgetConfig,
) -> GpaResult<()> {
    for listener in Listener::ALL {
        let shared = Rc::clone(widget);
        match listener {
            Listener::FormSubmit => listen(&page.form, listener, move |event| {
                deliver(&shared, WidgetEvent::Submitted, &event);
            })?,
            Listener::AddClick => listen(&page.add_button, listener, move |event| {
                deliver(&shared, WidgetEvent::AddClicked, &event);
            })?,
            Listener::BodyClick => {
                let body = page.body.clone();
                let class = config.remove_control_class.clone();
                listen(&page.body, listener, move |event| {
                    if let Some(row) = remove_target(&event, &body, &class) {
                        deliver(&shared, WidgetEvent::RemoveClicked { row }, &event);
                    }
                })?;
            }
            Listener::BodyChange => listen(&page.body, listener, move |event| {
                if let Some(field) = changed_field(&event) {
                    deliver(&shared, WidgetEvent::FieldChanged { field }, &event);
                }
            })?,
        }
    }
    Ok(())
}

/// Mounts the widget on the current page.
///
/// When the form already carries a widget, `seed` is appended to it and no
/// listeners are added. Returns `Ok(false)` without touching the page when
/// an anchor is missing.
pub fn mount_page(config: WidgetConfig, seed: &[EnrolledCourse]) -> GpaResult<bool> {
    if MOUNTED.with(|m| m.borrow().seed_mounted(&config.form_id, seed)) {
        debug!(form_id = %config.form_id, seeded = seed.len(), "widget already mounted");
        return Ok(true);
    }

    let page = match BrowserPage::locate(&config) {
        Ok(page) => page,
        Err(err @ GpaError::MissingAnchor { .. }) => {
            debug!(%err, "what-if GPA widget inactive on this page");
            return Ok(false);
        }
        Err(err) => return Err(err),
    };

    let mut widget = GpaWidget::attach(page.clone(), config.clone())?;
    if !seed.is_empty() {
        widget.seed_enrolled(seed);
    }
    let widget = Rc::new(RefCell::new(widget));
    wire(&page, &widget, &config)?;

    MOUNTED.with(|m| m.borrow_mut().register(widget));
    Ok(true)
}

fn to_js(err: GpaError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Mounts with the default page identifiers
#[wasm_bindgen]
pub fn mount() -> bool {
    match mount_page(WidgetConfig::default(), &[]) {
        Ok(mounted) => mounted,
        Err(err) => {
            debug!(%err, "mount failed");
            false
        }
    }
}

/// Mounts with a JSON config and optional JSON array of enrolled courses.
///
/// Seeds the widget the start hook already mounted when the form matches.
#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(config_json: &str, seed_json: Option<String>) -> Result<bool, JsValue> {
    let config = WidgetConfig::from_json(config_json).map_err(to_js)?;
    let seed: Vec<EnrolledCourse> = match seed_json {
        Some(json) => serde_json::from_str(&json)
            .map_err(GpaError::from)
            .map_err(to_js)?,
        None => Vec::new(),
    };
    mount_page(config, &seed).map_err(to_js)
}

/// GPA display text for a JSON array of rows, without touching the page
#[wasm_bindgen(js_name = gpaForRows)]
pub fn gpa_for_rows_json(rows_json: &str) -> Result<String, JsValue> {
    let rows: Vec<CourseRow> = serde_json::from_str(rows_json)
        .map_err(GpaError::from)
        .map_err(to_js)?;
    Ok(compute_gpa_text(&rows))
}

/// Initialize the widget in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if mount() {
        console::log_1(&"What-if GPA widget initialized".into());
    }
}
