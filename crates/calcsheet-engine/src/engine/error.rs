//! Evaluation errors reported by an [`Evaluator`](super::Evaluator).

use rhai::EvalAltResult;
use thiserror::Error;

use super::sheet_name;

/// Why an expression could not be turned into a number.
#[derive(Error, Debug)]
pub enum EvalError {
    /// The expression referenced a variable that is not bound in the scope.
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// The expression evaluated, but not to a number.
    #[error("Expression result is not a number: {0}")]
    NotANumber(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Rhai error: {0}")]
    Rhai(
        #[from]
        #[source]
        Box<EvalAltResult>,
    ),
}

impl EvalError {
    /// Map a Rhai runtime error, pulling out unbound variable references.
    pub(crate) fn from_rhai(err: Box<EvalAltResult>) -> Self {
        match *err {
            EvalAltResult::ErrorVariableNotFound(name, _) => {
                EvalError::UnknownVariable(sheet_name(&name).to_string())
            }
            other => EvalError::Rhai(Box::new(other)),
        }
    }

    pub fn is_unknown_variable(&self) -> bool {
        matches!(self, EvalError::UnknownVariable(_))
    }
}
