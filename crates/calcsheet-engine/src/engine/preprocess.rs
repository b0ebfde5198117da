//! Expression preprocessing.
//!
//! Sheet expressions use calculator conventions that Rhai does not share, so
//! they are rewritten before compilation:
//!
//! - **Numeric literals** become floats: `1` → `1.0`, `.5` → `0.5`, `5.` → `5.0`,
//!   `2e3` → `2.0e3`. Rhai integer division truncates, calculator division must not.
//! - **Power**: `^` → `**` (Rhai uses `^` for XOR).
//! - **Variables**: every identifier not followed by `(` gets the
//!   [`VARIABLE_PREFIX`], so sheet names that Rhai reserves (`new`, `case`,
//!   `default`, ...) still parse. Function names are left untouched.

use regex::Regex;
use std::sync::OnceLock;

/// Prefix carried by sheet variables and constants inside Rhai.
pub const VARIABLE_PREFIX: &str = "v_";

/// Rhai name for a sheet variable.
pub fn variable_name(name: &str) -> String {
    format!("{}{}", VARIABLE_PREFIX, name)
}

/// Sheet name for a Rhai variable produced by [`variable_name`].
pub fn sheet_name(rhai_name: &str) -> &str {
    rhai_name.strip_prefix(VARIABLE_PREFIX).unwrap_or(rhai_name)
}

/// Regex that tokenizes identifiers, numeric literals and the `^` operator.
///
/// Identifiers come first in the alternation so digits inside a name are never
/// treated as a literal.
fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?<ident>[A-Za-z_][A-Za-z0-9_]*)|(?<num>(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)|(?<pow>\^)",
        )
        .expect("preprocess token regex must compile")
    })
}

/// Rewrite a float literal into a form Rhai accepts.
fn float_literal(literal: &str) -> String {
    let (mantissa, exponent) = match literal.find(['e', 'E']) {
        Some(idx) => literal.split_at(idx),
        None => (literal, ""),
    };

    let mantissa = if mantissa.starts_with('.') {
        format!("0{}", mantissa)
    } else if mantissa.ends_with('.') {
        format!("{}0", mantissa)
    } else if !mantissa.contains('.') {
        format!("{}.0", mantissa)
    } else {
        mantissa.to_string()
    };

    format!("{}{}", mantissa, exponent)
}

/// Transform a sheet expression into Rhai source.
pub fn preprocess_expression(expression: &str) -> String {
    token_re()
        .replace_all(expression, |caps: &regex::Captures| {
            if let Some(ident) = caps.name("ident") {
                if expression[ident.end()..].trim_start().starts_with('(') {
                    ident.as_str().to_string()
                } else {
                    variable_name(ident.as_str())
                }
            } else if let Some(num) = caps.name("num") {
                float_literal(num.as_str())
            } else {
                "**".to_string()
            }
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{preprocess_expression, sheet_name, variable_name};

    #[test]
    fn test_preprocess_integer_literals() {
        assert_eq!(preprocess_expression("1 / 3"), "1.0 / 3.0");
        assert_eq!(preprocess_expression("10+5"), "10.0+5.0");
        assert_eq!(preprocess_expression("(2)*(3)"), "(2.0)*(3.0)");
    }

    #[test]
    fn test_preprocess_decimal_literals() {
        assert_eq!(preprocess_expression("1.5 * 2"), "1.5 * 2.0");
        assert_eq!(preprocess_expression(".5 + 5."), "0.5 + 5.0");
        assert_eq!(preprocess_expression("2e3"), "2.0e3");
        assert_eq!(preprocess_expression("1.5e-3"), "1.5e-3");
    }

    #[test]
    fn test_preprocess_power() {
        assert_eq!(preprocess_expression("2^10"), "2.0**10.0");
        assert_eq!(preprocess_expression("x ^ 2"), "v_x ** 2.0");
    }

    #[test]
    fn test_preprocess_prefixes_variables() {
        assert_eq!(preprocess_expression("x1 + y_2"), "v_x1 + v_y_2");
        assert_eq!(preprocess_expression("sqrt(x2) * 2"), "sqrt(v_x2) * 2.0");
        assert_eq!(preprocess_expression("new - old"), "v_new - v_old");
        assert_eq!(preprocess_expression("pi*e"), "v_pi*v_e");
    }

    #[test]
    fn test_preprocess_keeps_function_names() {
        assert_eq!(preprocess_expression("log10(100)"), "log10(100.0)");
        assert_eq!(preprocess_expression("max (a, b)"), "max (v_a, v_b)");
        assert_eq!(preprocess_expression("2e3 + e"), "2.0e3 + v_e");
    }

    #[test]
    fn test_variable_names_round_trip() {
        assert_eq!(variable_name("default"), "v_default");
        assert_eq!(sheet_name("v_default"), "default");
        assert_eq!(sheet_name("other"), "other");
    }
}
