//! Rendering of a document's results for the terminal.

use calcsheet_core::Document;
use std::fmt::Write;

/// Separator between the input and result columns.
const COLUMN_SEPARATOR: &str = " │ ";

/// One rendered result per line.
pub fn render_results(doc: &Document) -> String {
    let mut out = String::new();
    for result in doc.result_strings() {
        let _ = writeln!(out, "{}", result);
    }
    out
}

/// `input │ result` columns, inputs padded to the widest line.
pub fn render_side_by_side(doc: &Document) -> String {
    let width = doc
        .lines()
        .iter()
        .map(|line| line.text.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (line, result) in doc.lines().iter().zip(doc.result_strings()) {
        let _ = writeln!(
            out,
            "{:<width$}{}{}",
            line.text,
            COLUMN_SEPARATOR,
            result,
            width = width
        );
    }
    out
}

/// Numbered listing used by interactive mode.
pub fn render_listing(doc: &Document) -> String {
    let width = doc
        .lines()
        .iter()
        .map(|line| line.text.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (idx, (line, result)) in doc.lines().iter().zip(doc.result_strings()).enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<width$}{}{}",
            idx + 1,
            line.text,
            COLUMN_SEPARATOR,
            result,
            width = width
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_are_one_per_line() {
        let doc = Document::from_texts(["x = 2", "", "x * 4"]);
        assert_eq!(render_results(&doc), "x = 2\n\n8\n");
    }

    #[test]
    fn side_by_side_pads_inputs() {
        let doc = Document::from_texts(["a = 1", "a + 10"]);
        assert_eq!(
            render_side_by_side(&doc),
            "a = 1  │ a = 1\na + 10 │ 11\n"
        );
    }

    #[test]
    fn listing_numbers_lines() {
        let doc = Document::from_texts(["1 + 1"]);
        assert_eq!(render_listing(&doc), "  1  1 + 1 │ 2\n");
    }
}
