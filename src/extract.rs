//! Labeled W/H field extraction from raw OCR text.

use regex::Regex;
use std::sync::LazyLock;

/// Millimeter values recovered from one screenshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub width_mm: f64,
    pub height_mm: f64,
}

static WIDTH_WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| field_pattern("W", true));
static WIDTH_BARE: LazyLock<Regex> = LazyLock::new(|| field_pattern("W", false));
static HEIGHT_WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| field_pattern("H", true));
static HEIGHT_BARE: LazyLock<Regex> = LazyLock::new(|| field_pattern("H", false));

// Label letter, ASCII or full-width colon, numeric token, optionally the
// literal mm unit. OCR output drops units often enough that the bare form
// is worth a second pass, but only after the unit form found nothing.
fn field_pattern(label: &str, with_unit: bool) -> Regex {
    let pattern = if with_unit {
        format!(r"(?i)\b{label}\s*[:：]\s*([0-9]+(?:\.[0-9]+)?)\s*mm\b")
    } else {
        format!(r"(?i)\b{label}\s*[:：]\s*([0-9]+(?:\.[0-9]+)?)\b")
    };
    Regex::new(&pattern).expect("field pattern compiles")
}

// Leftmost match wins; a later, cleaner occurrence never overrides an
// earlier one.
fn find_field(text: &str, with_unit: &Regex, bare: &Regex) -> Option<f64> {
    let captures = with_unit.captures(text).or_else(|| bare.captures(text))?;
    captures.get(1)?.as_str().parse().ok()
}

/// Extract the W and H millimeter fields from OCR text.
///
/// Each field is searched independently, strict (with `mm` unit) before
/// relaxed (bare number). Both-or-nothing: `None` when either label is
/// absent or its numeric token does not parse as a float.
pub fn extract_measurements(text: &str) -> Option<Measurement> {
    let width_mm = find_field(text, &WIDTH_WITH_UNIT, &WIDTH_BARE)?;
    let height_mm = find_field(text, &HEIGHT_WITH_UNIT, &HEIGHT_BARE)?;
    Some(Measurement {
        width_mm,
        height_mm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_both_fields_with_units() {
        let measurement = extract_measurements("W: 150.0mm H:200mm").expect("measurement");
        assert_eq!(measurement.width_mm, 150.0);
        assert_eq!(measurement.height_mm, 200.0);
    }

    #[test]
    fn full_width_colon_without_unit_falls_back_to_bare_pattern() {
        let measurement = extract_measurements("W：100 H：50").expect("measurement");
        assert_eq!(measurement.width_mm, 100.0);
        assert_eq!(measurement.height_mm, 50.0);
    }

    #[test]
    fn mixed_strict_and_bare_fields_extract() {
        let measurement = extract_measurements("W:80 H: 50.5mm").expect("measurement");
        assert_eq!(measurement.width_mm, 80.0);
        assert_eq!(measurement.height_mm, 50.5);
    }

    #[test]
    fn missing_height_is_not_found() {
        assert_eq!(extract_measurements("W: 80mm"), None);
    }

    #[test]
    fn missing_width_is_not_found() {
        assert_eq!(extract_measurements("H: 80mm"), None);
    }

    #[test]
    fn empty_text_is_not_found() {
        assert_eq!(extract_measurements(""), None);
    }

    #[test]
    fn first_occurrence_wins() {
        let measurement =
            extract_measurements("W: 80mm junk W: 90mm H: 10mm H: 20mm").expect("measurement");
        assert_eq!(measurement.width_mm, 80.0);
        assert_eq!(measurement.height_mm, 10.0);
    }

    #[test]
    fn labels_are_case_insensitive() {
        let measurement = extract_measurements("w:10mm h:20mm").expect("measurement");
        assert_eq!(measurement.width_mm, 10.0);
        assert_eq!(measurement.height_mm, 20.0);
    }

    #[test]
    fn label_inside_a_word_does_not_match() {
        assert_eq!(extract_measurements("SWITCH: 5mm DEPTH: 7mm"), None);
    }

    #[test]
    fn label_must_be_followed_by_a_colon() {
        assert_eq!(extract_measurements("Width 100mm Height 50mm"), None);
    }

    #[test]
    fn surrounding_ocr_noise_is_ignored() {
        let text = "寸法情報\nW : 42.5 mm\n備考\nH：17\n";
        let measurement = extract_measurements(text).expect("measurement");
        assert_eq!(measurement.width_mm, 42.5);
        assert_eq!(measurement.height_mm, 17.0);
    }
}
