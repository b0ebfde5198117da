//! Sheet lines and assignment classification.
//!
//! Every line of a sheet is either an assignment (`name = expression`) or a
//! bare expression. Classification is purely syntactic: the right-hand side
//! of an assignment is not checked here, that happens during evaluation.
//!
//! # Examples
//!
//! ```ignore
//! let kind = classify("total = 10 * 3");
//! assert_eq!(kind, LineKind::Assignment { name: "total".into(), rest: "10 * 3".into() });
//! ```

use regex::Regex;
use std::sync::OnceLock;

/// Stable identifier assigned to a line by its owner.
pub type LineId = u64;

/// A single line of the sheet as supplied by the UI collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub id: LineId,
    pub text: String,
}

impl Line {
    pub fn new(id: LineId, text: impl Into<String>) -> Line {
        Line {
            id,
            text: text.into(),
        }
    }
}

/// Result of classifying a normalized line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// `name = rest`, where `rest` has not been validated yet.
    Assignment { name: String, rest: String },
    /// Anything else.
    Expression(String),
}

/// Regex matching `identifier = rest`.
///
/// Captures:
/// - `name`: the variable being assigned
/// - `rest`: everything after the first `=` (surrounding whitespace dropped)
fn assignment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<name>[a-zA-Z_][a-zA-Z0-9_]*)\s*=\s*(?<rest>.+)$")
            .expect("assignment regex must compile")
    })
}

/// Lower-case a raw line and strip surrounding whitespace.
pub fn normalize_line(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// Classify a normalized line as an assignment or a bare expression.
pub fn classify(line: &str) -> LineKind {
    match assignment_re().captures(line) {
        Some(caps) => LineKind::Assignment {
            name: caps["name"].to_string(),
            rest: caps["rest"].to_string(),
        },
        None => LineKind::Expression(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(name: &str, rest: &str) -> LineKind {
        LineKind::Assignment {
            name: name.to_string(),
            rest: rest.to_string(),
        }
    }

    #[test]
    fn test_classify_assignment() {
        assert_eq!(classify("x = 10"), assignment("x", "10"));
        assert_eq!(classify("total=a+b"), assignment("total", "a+b"));
        assert_eq!(classify("_tmp2 =  3 * 4"), assignment("_tmp2", "3 * 4"));
    }

    #[test]
    fn test_classify_keeps_malformed_rest() {
        // Syntax problems on the right-hand side are left to evaluation.
        assert_eq!(classify("x = foo("), assignment("x", "foo("));
        assert_eq!(classify("x == 5"), assignment("x", "= 5"));
    }

    #[test]
    fn test_classify_expression() {
        assert_eq!(classify("1 + 2"), LineKind::Expression("1 + 2".to_string()));
        assert_eq!(
            classify("20% of 50"),
            LineKind::Expression("20% of 50".to_string())
        );
        assert_eq!(classify("2x = 4"), LineKind::Expression("2x = 4".to_string()));
        assert_eq!(classify("x ="), LineKind::Expression("x =".to_string()));
        assert_eq!(classify(""), LineKind::Expression(String::new()));
    }

    #[test]
    fn test_normalize_line() {
        assert_eq!(normalize_line("  Total = X + 1  "), "total = x + 1");
        assert_eq!(normalize_line("\t20% OF 50\n"), "20% of 50");
        assert_eq!(normalize_line("   "), "");
    }
}
