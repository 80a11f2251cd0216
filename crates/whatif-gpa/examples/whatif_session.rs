//! What-if GPA session on the mock page
//!
//! Run with: cargo run --example whatif_session

use whatif_gpa::driver::add_course;
use whatif_gpa::prelude::*;

fn show(step: &str, driver: &MockDriver) {
    println!("{step:<40} rows={} gpa={}", driver.row_count(), driver.gpa_text());
}

fn main() {
    let page = MockDom::page().with_enrolled("4", "B").with_enrolled("3", "A-");
    let mut driver = MockDriver::mount(page, WidgetConfig::default());
    show("page load (two enrolled courses)", &driver);

    driver.add_class();
    show("add blank row", &driver);

    let row = driver.row_count() - 1;
    driver.set_units(row, "3");
    show("units = 3", &driver);

    driver.set_grade(row, "A");
    show("grade = A", &driver);

    let other = add_course(&mut driver, "4", "C+");
    show("add 4 units of C+", &driver);

    driver.click_remove(other);
    show("remove the C+ row", &driver);

    driver.click_remove(0);
    show("remove enrolled row (refused)", &driver);

    let prevented = driver.submit();
    println!("form submission prevented: {prevented}");
}
