use wh_reader_rust::{Measurement, format_summary};

#[test]
fn summary_snapshot() {
    let measurement = Measurement {
        width_mm: 200.0,
        height_mm: 125.0,
    };
    insta::assert_snapshot!("summary", format_summary(&measurement));
}
