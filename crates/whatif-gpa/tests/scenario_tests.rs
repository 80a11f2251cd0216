//! End-to-end scenarios against the mock page

use whatif_gpa::driver::{add_course, run_all_scenarios};
use whatif_gpa::prelude::*;

#[test]
fn all_scenarios_on_mock_page() {
    run_all_scenarios(MockDriver::new);
}

#[test]
fn weighted_mean_two_rows() {
    let mut driver = MockDriver::new();
    add_course(&mut driver, "3", "A");
    add_course(&mut driver, "4", "B");
    assert_eq!(driver.gpa_text(), "3.43");
}

#[test]
fn zero_unit_row_shows_placeholder() {
    let mut driver = MockDriver::new();
    add_course(&mut driver, "0", "A");
    assert_eq!(driver.gpa_text(), "–");
}

#[test]
fn ungraded_row_shows_placeholder() {
    let mut driver = MockDriver::new();
    add_course(&mut driver, "2", "");
    assert_eq!(driver.gpa_text(), "–");
}

#[test]
fn enrolled_row_survives_remove() {
    let dom = MockDom::page().with_enrolled("3", "A");
    let mut driver = MockDriver::mount(dom, WidgetConfig::default());
    assert_eq!(driver.gpa_text(), "4.00");

    driver.click_remove(0);
    assert_eq!(driver.row_count(), 1);
    assert_eq!(driver.gpa_text(), "4.00");
}

#[test]
fn exact_tie_rounds_half_to_even() {
    let mut driver = MockDriver::new();
    add_course(&mut driver, "1", "A");
    add_course(&mut driver, "7", "B");
    // 25 / 8 = 3.125
    assert_eq!(driver.gpa_text(), "3.12");
}

#[test]
fn overflowing_units_show_placeholder() {
    let mut driver = MockDriver::new();
    add_course(&mut driver, "1e308", "A");
    add_course(&mut driver, "1e308", "B");
    assert_eq!(driver.gpa_text(), "–");
}

#[test]
fn page_without_widget_is_inert() {
    let dom = MockDom::page().without("whatifTable");
    let mut driver = MockDriver::mount(dom, WidgetConfig::default());
    assert!(!driver.is_active());
    assert!(driver.dom().listeners().is_empty());

    driver.add_class();
    assert_eq!(driver.row_count(), 0);
    assert_eq!(driver.gpa_text(), "");
}

#[test]
fn mixed_enrolled_and_hypothetical_session() {
    let dom = MockDom::page().with_enrolled("4", "B").with_enrolled("3", "A-");
    let mut driver = MockDriver::mount(dom, WidgetConfig::default());
    // (4 * 3.0 + 3 * 3.7) / 7 = 23.1 / 7 = 3.3
    assert_eq!(driver.gpa_text(), "3.30");

    let row = add_course(&mut driver, "3", "F");
    // 23.1 / 10
    assert_eq!(driver.gpa_text(), "2.31");

    driver.set_grade(row, "A");
    // 35.1 / 10
    assert_eq!(driver.gpa_text(), "3.51");

    driver.click_remove(row);
    assert_eq!(driver.gpa_text(), "3.30");

    driver.click_remove(0);
    driver.click_remove(1);
    assert_eq!(driver.row_count(), 2);
}

#[test]
fn seeded_markup_rows_without_controls_are_skipped() {
    let dom = MockDom::page()
        .with_seeded_row(DomElement::new("tr").with_child(DomElement::new("td").with_text("Header")))
        .with_enrolled("2", "C");
    let driver = MockDriver::mount(dom, WidgetConfig::default());
    assert_eq!(driver.gpa_text(), "2.00");
    let tally = driver.widget().unwrap().tally();
    assert_eq!(tally.counted_rows, 1);
    assert_eq!(tally.skipped_rows, 1);
}

#[test]
fn config_from_json_mounts_custom_page() {
    let config = WidgetConfig::from_json(
        r#"{"form_id":"f","table_id":"t","add_button_id":"add","gpa_display_id":"out","display":{"placeholder":"-"}}"#,
    )
    .unwrap();
    let mut driver = MockDriver::mount(MockDom::page_for(&config), config);
    assert_eq!(driver.gpa_text(), "-");
    add_course(&mut driver, "1", "D+");
    assert_eq!(driver.dom().get_element_text("out"), Some("1.30"));
    assert!(driver.submit());
}

#[test]
fn rows_json_round_trip_through_serde() {
    let rows: Vec<CourseRow> = serde_json::from_str(
        r#"[
            {"course_name":"CS 1","units":"3","grade":"A","kind":"enrolled"},
            {"course_name":null,"units":"4","grade":"B"}
        ]"#,
    )
    .unwrap();
    assert_eq!(rows[0].kind, RowKind::Enrolled);
    assert_eq!(rows[1].kind, RowKind::Hypothetical);
    assert_eq!(compute_gpa_text(&rows), "3.43");
}
