//! Top-to-bottom recalculation of a sheet.
//!
//! A pass walks the lines in order with a fresh [`Scope`]. Assignments that
//! evaluate successfully bind their variable for every *later* line; nothing
//! is reordered and nothing carries over between passes. A failing line is
//! replaced by a fixed message and never stops the pass.

use std::fmt;

use super::{
    Evaluator, Line, LineId, LineKind, Scope, classify, evaluate_percentage, format_number,
    normalize_line,
};

/// Why a line produced no value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    InvalidAssignment,
    InvalidExpression,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::InvalidAssignment => write!(f, "Invalid assignment"),
            Failure::InvalidExpression => write!(f, "Invalid expression"),
        }
    }
}

/// What evaluating one line produced.
#[derive(Clone, Debug, PartialEq)]
pub enum EvaluationOutcome {
    Value(f64),
    Failure(Failure),
    /// The line is empty or whitespace only.
    Blank,
}

/// Result for one input line, in the same position as that line.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultLine {
    pub id: LineId,
    /// Variable bound by this line, if it was an assignment.
    pub assigned: Option<String>,
    pub outcome: EvaluationOutcome,
}

impl ResultLine {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, EvaluationOutcome::Failure(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self.outcome {
            EvaluationOutcome::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ResultLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.outcome, &self.assigned) {
            (EvaluationOutcome::Value(v), Some(name)) => write!(f, "{} = {}", name, format_number(*v)),
            (EvaluationOutcome::Value(v), None) => write!(f, "{}", format_number(*v)),
            (EvaluationOutcome::Failure(failure), _) => write!(f, "{}", failure),
            (EvaluationOutcome::Blank, _) => Ok(()),
        }
    }
}

/// Evaluate one line against the scope, binding its variable on success.
fn evaluate_line(line: &Line, scope: &mut Scope, evaluator: &dyn Evaluator) -> ResultLine {
    let normalized = normalize_line(&line.text);
    if normalized.is_empty() {
        return ResultLine {
            id: line.id,
            assigned: None,
            outcome: EvaluationOutcome::Blank,
        };
    }

    match classify(&normalized) {
        LineKind::Assignment { name, rest } => match evaluator.evaluate(&rest, scope) {
            Ok(value) => {
                scope.set(&name, value);
                ResultLine {
                    id: line.id,
                    assigned: Some(name),
                    outcome: EvaluationOutcome::Value(value),
                }
            }
            Err(err) => {
                log::debug!("line {}: assignment to {} failed: {}", line.id, name, err);
                // An unbound reference is an unresolved dependency, not a bad assignment.
                let failure = if err.is_unknown_variable() {
                    Failure::InvalidExpression
                } else {
                    Failure::InvalidAssignment
                };
                ResultLine {
                    id: line.id,
                    assigned: None,
                    outcome: EvaluationOutcome::Failure(failure),
                }
            }
        },
        LineKind::Expression(text) => {
            let outcome = match evaluate_percentage(&text) {
                Some(value) => EvaluationOutcome::Value(value),
                None => match evaluator.evaluate(&text, scope) {
                    Ok(value) => EvaluationOutcome::Value(value),
                    Err(err) => {
                        log::debug!("line {}: expression failed: {}", line.id, err);
                        EvaluationOutcome::Failure(Failure::InvalidExpression)
                    }
                },
            };
            ResultLine {
                id: line.id,
                assigned: None,
                outcome,
            }
        }
    }
}

/// Run one full pass over `lines`, returning exactly one result per line.
pub fn recalculate(lines: &[Line], evaluator: &dyn Evaluator) -> Vec<ResultLine> {
    let mut scope = Scope::new();
    let results: Vec<ResultLine> = lines
        .iter()
        .map(|line| evaluate_line(line, &mut scope, evaluator))
        .collect();
    log::debug!(
        "recalculated {} lines, {} variables bound",
        results.len(),
        scope.len()
    );
    results
}

/// Convenience pass over bare strings, returning the rendered results.
/// Lines get ids `1..=n`.
pub fn recalculate_texts<S: AsRef<str>>(texts: &[S], evaluator: &dyn Evaluator) -> Vec<String> {
    let lines: Vec<Line> = texts
        .iter()
        .enumerate()
        .map(|(idx, text)| Line::new(idx as LineId + 1, text.as_ref()))
        .collect();
    recalculate(&lines, evaluator)
        .iter()
        .map(ResultLine::to_string)
        .collect()
}
