//! Decimal rounding for the mm → cm conversion.

/// Round `value` to `precision` fractional digits, ties away from zero.
///
/// The value is routed through its shortest base-10 representation before
/// any digit is inspected: rounding the binary double directly misreads
/// values whose decimal form ends in ".x5" (2.675 sits just below the
/// midpoint as a double), while the canonical string keeps the tie a tie.
pub fn round_half_up(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    round_decimal_text(&value.to_string(), precision)
        .parse()
        .unwrap_or(value)
}

/// Millimeters to centimeters, one decimal digit, half-up.
pub fn mm_to_cm(mm: f64) -> f64 {
    round_half_up(mm / 10.0, 1)
}

fn round_decimal_text(text: &str, precision: u32) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };
    let precision = precision as usize;
    if frac_part.len() <= precision {
        return text.to_string();
    }

    // All digits that survive, integer and fractional, as one string so a
    // carry can ripple across the decimal point.
    let mut kept: String = int_part
        .chars()
        .chain(frac_part.chars().take(precision))
        .collect();
    if frac_part.as_bytes()[precision] >= b'5' {
        kept = increment_digits(&kept);
    }

    let split = kept.len() - precision;
    if precision == 0 {
        format!("{}{}", sign, kept)
    } else {
        format!("{}{}.{}", sign, &kept[..split], &kept[split..])
    }
}

fn increment_digits(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    let mut idx = out.len();
    while idx > 0 {
        idx -= 1;
        if out[idx] == b'9' {
            out[idx] = b'0';
        } else {
            out[idx] += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    format!("1{}", String::from_utf8_lossy(&out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(round_half_up(1.25, 1), 1.3);
        assert_eq!(round_half_up(0.05, 1), 0.1);
        assert_eq!(round_half_up(0.45, 1), 0.5);
    }

    #[test]
    fn negative_ties_round_away_from_zero() {
        assert_eq!(round_half_up(-0.05, 1), -0.1);
        assert_eq!(round_half_up(-1.25, 1), -1.3);
    }

    #[test]
    fn binary_artifacts_do_not_flip_the_tie() {
        // 2.675 is stored just below the midpoint; naive multiply-round
        // would yield 2.67.
        assert_eq!(round_half_up(2.675, 2), 2.68);
    }

    #[test]
    fn precision_zero_rounds_to_integers() {
        assert_eq!(round_half_up(2.5, 0), 3.0);
        assert_eq!(round_half_up(2.4, 0), 2.0);
        assert_eq!(round_half_up(-2.5, 0), -3.0);
    }

    #[test]
    fn carry_propagates_through_nines() {
        assert_eq!(round_half_up(9.95, 1), 10.0);
        assert_eq!(round_half_up(0.999, 2), 1.0);
        assert_eq!(round_half_up(99.99, 1), 100.0);
    }

    #[test]
    fn short_fractions_pass_through() {
        assert_eq!(round_half_up(1.2, 1), 1.2);
        assert_eq!(round_half_up(3.0, 1), 3.0);
        assert_eq!(round_half_up(0.0, 1), 0.0);
    }

    #[test]
    fn mm_to_cm_keeps_one_decimal() {
        assert_eq!(mm_to_cm(125.0), 12.5);
        assert_eq!(mm_to_cm(123.0), 12.3);
        assert_eq!(mm_to_cm(0.0), 0.0);
        assert_eq!(mm_to_cm(123.45), 12.3);
        assert_eq!(mm_to_cm(105.0), 10.5);
    }
}
