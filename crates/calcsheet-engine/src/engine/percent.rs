//! Percentage shorthand recognition.
//!
//! Natural-language percentage idioms such as `20% of 50` or `80 + 15%` do
//! not parse the way a reader expects under ordinary operator rules, so they
//! are intercepted before general evaluation and computed directly.
//!
//! Shorthands only accept non-negative decimal literals. Variables are never
//! substituted into them.

use regex::Regex;
use std::sync::OnceLock;

/// One of the recognized percentage idioms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PercentShorthand {
    /// `P% of N` -> `P/100 * N`
    Of,
    /// `N + P%` -> `N + N*P/100`
    Increase,
    /// `N - P%` -> `N - N*P/100`
    Decrease,
    /// `P% off N` -> `N - N*P/100`
    Off,
}

/// Shorthands in the order they are tried. First match wins.
pub const PERCENT_SHORTHANDS: &[PercentShorthand] = &[
    PercentShorthand::Of,
    PercentShorthand::Increase,
    PercentShorthand::Decrease,
    PercentShorthand::Off,
];

const NUMBER: &str = r"\d+(?:\.\d+)?";

fn compile(template: &str) -> Regex {
    let pattern = template
        .replace("{pct}", &format!("(?<pct>{NUMBER})"))
        .replace("{num}", &format!("(?<num>{NUMBER})"));
    Regex::new(&pattern).expect("percentage regex must compile")
}

impl PercentShorthand {
    /// Regex for this shorthand. Operates on normalized (lower-case, trimmed) text.
    ///
    /// Captures:
    /// - `pct`: the percentage literal
    /// - `num`: the base number literal
    pub fn regex(self) -> &'static Regex {
        static OF: OnceLock<Regex> = OnceLock::new();
        static INCREASE: OnceLock<Regex> = OnceLock::new();
        static DECREASE: OnceLock<Regex> = OnceLock::new();
        static OFF: OnceLock<Regex> = OnceLock::new();
        match self {
            PercentShorthand::Of => OF.get_or_init(|| compile(r"^{pct}%\s+of\s+{num}$")),
            PercentShorthand::Increase => {
                INCREASE.get_or_init(|| compile(r"^{num}\s*\+\s*{pct}%$"))
            }
            PercentShorthand::Decrease => DECREASE.get_or_init(|| compile(r"^{num}\s*-\s*{pct}%$")),
            PercentShorthand::Off => OFF.get_or_init(|| compile(r"^{pct}%\s+off\s+{num}$")),
        }
    }

    /// Compute the shorthand from its percentage and base number.
    pub fn apply(self, pct: f64, num: f64) -> f64 {
        match self {
            PercentShorthand::Of => (pct / 100.0) * num,
            PercentShorthand::Increase => num + num * pct / 100.0,
            PercentShorthand::Decrease | PercentShorthand::Off => num - num * pct / 100.0,
        }
    }

    /// Match `text` against this shorthand alone, returning `(pct, num)`.
    pub fn captures(self, text: &str) -> Option<(f64, f64)> {
        let caps = self.regex().captures(text)?;
        let pct = caps["pct"].parse::<f64>().ok()?;
        let num = caps["num"].parse::<f64>().ok()?;
        Some((pct, num))
    }

    /// Find the first shorthand matching `text`.
    pub fn detect(text: &str) -> Option<(PercentShorthand, f64, f64)> {
        PERCENT_SHORTHANDS
            .iter()
            .find_map(|&shorthand| shorthand.captures(text).map(|(p, n)| (shorthand, p, n)))
    }
}

/// Evaluate `text` if it is a percentage shorthand; `None` means "not a shorthand".
pub fn evaluate_percentage(text: &str) -> Option<f64> {
    PercentShorthand::detect(text).map(|(shorthand, pct, num)| shorthand.apply(pct, num))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(evaluate_percentage("20% of 50"), Some(10.0));
        assert_eq!(evaluate_percentage("12.5% of 80"), Some(10.0));
        assert_eq!(
            PercentShorthand::detect("20% of 50").map(|(s, _, _)| s),
            Some(PercentShorthand::Of)
        );
    }

    #[test]
    fn test_percent_increase_and_decrease() {
        assert_eq!(evaluate_percentage("200 + 10%"), Some(220.0));
        assert_eq!(evaluate_percentage("200+10%"), Some(220.0));
        assert_eq!(evaluate_percentage("200 - 10%"), Some(180.0));
        assert_eq!(evaluate_percentage("200-10%"), Some(180.0));
    }

    #[test]
    fn test_percent_off() {
        assert_eq!(evaluate_percentage("25% off 80"), Some(60.0));
        assert_eq!(
            PercentShorthand::detect("25% off 80").map(|(s, _, _)| s),
            Some(PercentShorthand::Off)
        );
    }

    #[test]
    fn test_shorthands_are_exclusive() {
        let samples = ["20% of 50", "200 + 10%", "200 - 10%", "25% off 80"];
        for sample in samples {
            let matching = PERCENT_SHORTHANDS
                .iter()
                .filter(|s| s.captures(sample).is_some())
                .count();
            assert_eq!(matching, 1, "{sample}");
        }
    }

    #[test]
    fn test_non_shorthands() {
        assert_eq!(evaluate_percentage("x% of 50"), None);
        assert_eq!(evaluate_percentage("20% of x"), None);
        assert_eq!(evaluate_percentage("-20% of 50"), None);
        assert_eq!(evaluate_percentage("20%of 50"), None);
        assert_eq!(evaluate_percentage("1e2% of 50"), None);
        assert_eq!(evaluate_percentage("200 * 10%"), None);
        assert_eq!(evaluate_percentage("10%"), None);
        assert_eq!(evaluate_percentage("1 + 2"), None);
    }
}
