//! Calculation sheet engine API.
//!
//! This module provides the sequential evaluation engine for the sheet:
//!
//! - [`Line`], [`LineId`], [`LineKind`] - Sheet lines and their classification
//! - [`PercentShorthand`] - Literal-only percentage idioms (`20% of 50`)
//! - [`Scope`] - Per-pass variable bindings
//! - [`Evaluator`], [`RhaiEvaluator`] - Expression evaluation against a scope
//! - [`preprocess_expression`] - Transform sheet syntax for Rhai evaluation
//! - [`format_number`] - Format values for display
//! - [`recalculate`] - One full top-to-bottom pass over a sheet

mod error;
mod eval;
mod format;
mod line;
mod percent;
mod preprocess;
mod recalc;
mod scope;

pub use error::EvalError;
pub use eval::{Evaluator, RhaiEvaluator, create_engine};
pub use format::{SIGNIFICANT_DIGITS, format_number};
pub use line::{Line, LineId, LineKind, classify, normalize_line};
pub use percent::{PercentShorthand, evaluate_percentage};
pub use preprocess::{preprocess_expression, sheet_name, variable_name};
pub use recalc::{EvaluationOutcome, Failure, ResultLine, recalculate, recalculate_texts};
pub use scope::Scope;

pub use rhai::{AST, Dynamic};
