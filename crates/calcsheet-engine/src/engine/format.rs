/// Number of significant digits shown for every result.
pub const SIGNIFICANT_DIGITS: usize = 14;

/// Smallest and largest-exclusive decimal exponents rendered without an exponent.
///
/// These are the thresholds of JavaScript's `Number#toString`. Some 14-digit
/// calculator formatters switch to exponent notation much earlier, at 1e5 and
/// 1e-3; this one keeps everyday magnitudes such as `250000` in fixed notation.
const MIN_FIXED_EXPONENT: i32 = -7;
const MAX_FIXED_EXPONENT: i32 = 21;

/// Format a number for display.
///
/// Values are rounded to [`SIGNIFICANT_DIGITS`] significant digits and trailing
/// zeros are dropped, so `1 / 3` renders as `0.33333333333333` and `0.1 + 0.2`
/// as `0.3`. Magnitudes outside `1e-7 ..< 1e21` use exponent notation (`1.5e+25`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    // `{:e}` rounds correctly and carries into the exponent (9.99...95 -> 1e1).
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, n.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return sci;
    };

    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    let body = if (MIN_FIXED_EXPONENT..MAX_FIXED_EXPONENT).contains(&exponent) {
        fixed_notation(digits, exponent)
    } else {
        exponent_notation(digits, exponent)
    };

    if n.is_sign_negative() {
        format!("-{}", body)
    } else {
        body
    }
}

fn fixed_notation(digits: &str, exponent: i32) -> String {
    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("0.{}{}", zeros, digits);
    }

    let int_len = exponent as usize + 1;
    if digits.len() <= int_len {
        format!("{}{}", digits, "0".repeat(int_len - digits.len()))
    } else {
        format!("{}.{}", &digits[..int_len], &digits[int_len..])
    }
}

fn exponent_notation(digits: &str, exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    let (lead, rest) = digits.split_at(1);
    if rest.is_empty() {
        format!("{}e{}{}", lead, sign, exponent.abs())
    } else {
        format!("{}.{}e{}{}", lead, rest, sign, exponent.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::format_number;

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(123456789.0), "123456789");
    }

    #[test]
    fn test_format_rounds_to_fourteen_digits() {
        assert_eq!(format_number(1.0 / 3.0), "0.33333333333333");
        assert_eq!(format_number(2.0 / 3.0), "0.66666666666667");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(10.0 / 3.0), "3.3333333333333");
        assert_eq!(format_number(-1.0 / 3.0), "-0.33333333333333");
    }

    #[test]
    fn test_format_carry() {
        assert_eq!(format_number(9.999999999999999), "10");
        assert_eq!(format_number(0.99999999999999999), "1");
    }

    #[test]
    fn test_format_small_and_large() {
        assert_eq!(format_number(0.00125), "0.00125");
        assert_eq!(format_number(1.5e-7), "0.00000015");
        assert_eq!(format_number(1.5e-8), "1.5e-8");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e30), "-2.5e+30");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_is_deterministic() {
        let value = 22.0 / 7.0;
        assert_eq!(format_number(value), format_number(value));
        assert_eq!(format_number(value), "3.1428571428571");
    }
}
