//! Rhai engine creation and expression evaluation.
//!
//! Creates the Rhai scripting engine with the math built-ins registered and
//! evaluates sheet expressions against a [`Scope`]. Optional user-defined
//! functions compiled from an external script are callable from expressions.

use rhai::{Engine, Scope as RhaiScope};

use super::{AST, Dynamic, EvalError, Scope, preprocess_expression, variable_name};
use crate::builtins::{CONSTANTS, register_builtins};

/// Upper bound on Rhai operations per expression, so a runaway custom
/// function cannot stall a pass.
const MAX_OPERATIONS: u64 = 1_000_000;

/// Nesting limits for expressions and function bodies. Each pair of
/// parentheses costs two levels.
const MAX_EXPR_DEPTH: usize = 256;
const MAX_FUNCTION_EXPR_DEPTH: usize = 64;

/// Anything that can turn an expression into a number given the variables
/// bound so far.
pub trait Evaluator {
    fn evaluate(&self, expression: &str, scope: &Scope) -> Result<f64, EvalError>;
}

/// Create a Rhai engine with built-ins registered.
pub fn create_engine() -> Engine {
    let mut engine = Engine::new();
    engine.set_max_operations(MAX_OPERATIONS);
    engine.set_max_expr_depths(MAX_EXPR_DEPTH, MAX_FUNCTION_EXPR_DEPTH);
    register_builtins(&mut engine);
    engine
}

/// Expression evaluator backed by Rhai.
pub struct RhaiEvaluator {
    engine: Engine,
    custom_ast: Option<AST>,
}

impl RhaiEvaluator {
    pub fn new() -> Self {
        RhaiEvaluator {
            engine: create_engine(),
            custom_ast: None,
        }
    }

    /// Create an evaluator, optionally compiling custom functions from the
    /// provided script. Returns the evaluator and any compile error message;
    /// on error the evaluator has no custom functions.
    ///
    /// Sheet lines are lower-cased before evaluation, so a function whose name
    /// has upper-case letters could never be called and is rejected.
    pub fn with_functions(custom_script: Option<&str>) -> (Self, Option<String>) {
        let mut evaluator = Self::new();

        let error = match custom_script {
            Some(script) => match evaluator.engine.compile(script) {
                Ok(ast) => match uncallable_function_names(&ast) {
                    names if names.is_empty() => {
                        evaluator.custom_ast = Some(ast.clone_functions_only());
                        None
                    }
                    names => Some(format!(
                        "Error in custom functions: function names must be lower case: {}",
                        names.join(", ")
                    )),
                },
                Err(e) => Some(format!("Error in custom functions: {}", e)),
            },
            None => None,
        };

        (evaluator, error)
    }

    pub fn has_custom_functions(&self) -> bool {
        self.custom_ast.is_some()
    }

    /// Build the Rhai scope for one evaluation. Sheet variables shadow
    /// constants of the same name.
    fn rhai_scope(scope: &Scope) -> RhaiScope<'static> {
        let mut rhai_scope = RhaiScope::new();
        for (name, value) in CONSTANTS {
            if !scope.contains(name) {
                rhai_scope.push_constant(variable_name(name), *value);
            }
        }
        for (name, value) in scope.iter() {
            rhai_scope.push(variable_name(name), value);
        }
        rhai_scope
    }
}

/// Script-defined function names that differ from their lower-cased form.
fn uncallable_function_names(ast: &AST) -> Vec<String> {
    let mut names: Vec<String> = ast
        .iter_functions()
        .filter(|f| f.name.chars().any(|c| c.is_uppercase()))
        .map(|f| f.name.to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

impl Default for RhaiEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for RhaiEvaluator {
    fn evaluate(&self, expression: &str, scope: &Scope) -> Result<f64, EvalError> {
        let processed = preprocess_expression(expression);
        let mut rhai_scope = Self::rhai_scope(scope);

        // Compiling as an expression rejects statements such as `let` or assignment.
        let ast = self
            .engine
            .compile_expression_with_scope(&rhai_scope, &processed)
            .map_err(|e| EvalError::Parse(e.to_string()))?;

        let value = match &self.custom_ast {
            Some(custom) => {
                let merged = custom.merge(&ast);
                self.engine
                    .eval_ast_with_scope::<Dynamic>(&mut rhai_scope, &merged)
            }
            None => self.engine.eval_ast_with_scope::<Dynamic>(&mut rhai_scope, &ast),
        }
        .map_err(EvalError::from_rhai)?;

        dynamic_to_number(&value)
    }
}

/// Accept floats and integers; everything else (and NaN) is not a sheet value.
fn dynamic_to_number(value: &Dynamic) -> Result<f64, EvalError> {
    let n = if let Ok(n) = value.as_float() {
        n
    } else if let Ok(n) = value.as_int() {
        n as f64
    } else {
        return Err(EvalError::NotANumber(value.type_name().to_string()));
    };

    if n.is_nan() {
        return Err(EvalError::NotANumber("NaN".to_string()));
    }
    Ok(n)
}
