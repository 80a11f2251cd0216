//! Unified widget driver
//!
//! Scenario checks are written once against [`GpaDriver`] and run against
//! any page implementation. Each `verify_*` function expects a freshly
//! mounted driver whose table body is empty.

use crate::core::Grade;

/// Student-level interactions with the GPA page
pub trait GpaDriver {
    /// Activates the add-class control
    fn add_class(&mut self);

    /// Types a units value into a row and fires `change`
    fn set_units(&mut self, row: usize, units: &str);

    /// Picks a grade option in a row and fires `change`
    fn set_grade(&mut self, row: usize, grade: &str);

    /// Activates a row's remove control
    fn click_remove(&mut self, row: usize);

    /// Submits the form; returns true if the submission was prevented
    fn submit(&mut self) -> bool;

    /// Places an enrolled row on the page, as the server would
    fn seed_enrolled(&mut self, units: f64, grade: Grade);

    /// Text of the GPA display
    fn gpa_text(&self) -> String;

    /// Number of rows in the table body
    fn row_count(&self) -> usize;
}

/// Adds a row and fills it in; returns its index
pub fn add_course<D: GpaDriver>(driver: &mut D, units: &str, grade: &str) -> usize {
    driver.add_class();
    let row = driver.row_count() - 1;
    driver.set_units(row, units);
    driver.set_grade(row, grade);
    row
}

/// Two valid rows give their units-weighted mean, rounded to two places
pub fn verify_weighted_mean<D: GpaDriver>(driver: &mut D) {
    add_course(driver, "3", "A");
    add_course(driver, "4", "B");
    // 24 / 7 = 3.428...
    assert_eq!(driver.gpa_text(), "3.43");
}

/// A row with zero units does not count
pub fn verify_zero_units_excluded<D: GpaDriver>(driver: &mut D) {
    add_course(driver, "0", "A");
    assert_eq!(driver.gpa_text(), "–");
}

/// A row without a grade does not count
pub fn verify_blank_grade_excluded<D: GpaDriver>(driver: &mut D) {
    add_course(driver, "2", "");
    assert_eq!(driver.gpa_text(), "–");
}

/// Removing an enrolled row does nothing
pub fn verify_enrolled_row_kept<D: GpaDriver>(driver: &mut D) {
    driver.seed_enrolled(3.0, Grade::A);
    driver.click_remove(0);
    assert_eq!(driver.row_count(), 1);
    assert_eq!(driver.gpa_text(), "4.00");
}

/// Non-empty results always carry two decimals
pub fn verify_two_decimals<D: GpaDriver>(driver: &mut D) {
    add_course(driver, "1", "A");
    add_course(driver, "1", "B");
    assert_eq!(driver.gpa_text(), "3.50");
}

/// A new row leaves the GPA alone until it has units and a grade
pub fn verify_add_row_neutral<D: GpaDriver>(driver: &mut D) {
    add_course(driver, "3", "B");
    assert_eq!(driver.gpa_text(), "3.00");

    driver.add_class();
    let row = driver.row_count() - 1;
    assert_eq!(driver.gpa_text(), "3.00");

    driver.set_units(row, "3");
    assert_eq!(driver.gpa_text(), "3.00");

    driver.set_grade(row, "A");
    assert_eq!(driver.gpa_text(), "3.50");
}

/// Removing a hypothetical row drops it from the GPA
pub fn verify_remove_recomputes<D: GpaDriver>(driver: &mut D) {
    add_course(driver, "3", "A");
    let row = add_course(driver, "3", "C");
    assert_eq!(driver.gpa_text(), "3.00");

    driver.click_remove(row);
    assert_eq!(driver.row_count(), 1);
    assert_eq!(driver.gpa_text(), "4.00");

    driver.click_remove(0);
    assert_eq!(driver.row_count(), 0);
    assert_eq!(driver.gpa_text(), "–");
}

/// Recomputing without a data change yields the same text
pub fn verify_idempotent<D: GpaDriver>(driver: &mut D) {
    let row = add_course(driver, "2.5", "B+");
    add_course(driver, "4", "C-");
    let before = driver.gpa_text();
    driver.set_units(row, "2.5");
    driver.set_units(row, "2.5");
    assert_eq!(driver.gpa_text(), before);
}

/// The form never submits
pub fn verify_submit_suppressed<D: GpaDriver>(driver: &mut D) {
    add_course(driver, "3", "A");
    assert!(driver.submit());
    assert_eq!(driver.row_count(), 1);
    assert_eq!(driver.gpa_text(), "4.00");
}

/// Runs every scenario, each on its own fresh driver
pub fn run_all_scenarios<D: GpaDriver>(mut fresh: impl FnMut() -> D) {
    verify_weighted_mean(&mut fresh());
    verify_zero_units_excluded(&mut fresh());
    verify_blank_grade_excluded(&mut fresh());
    verify_enrolled_row_kept(&mut fresh());
    verify_two_decimals(&mut fresh());
    verify_add_row_neutral(&mut fresh());
    verify_remove_recomputes(&mut fresh());
    verify_idempotent(&mut fresh());
    verify_submit_suppressed(&mut fresh());
}
