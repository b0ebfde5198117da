//! Built-in math functions (Rust) and their metadata.
//!
//! Conventions:
//! - Sheet-facing built-in names are lower case (lines are lower-cased before
//!   evaluation, so `SQRT(4)` and `sqrt(4)` are the same call).
//! - Built-ins take and return floats; sheet literals are floats after preprocessing.
//! - If you add a new built-in, update `MATH_BUILTINS` and register its
//!   implementation in `register_builtins`.

use rhai::Engine;

pub struct MathBuiltin {
    pub name: &'static str,
    pub description: &'static str,
}

pub const MATH_BUILTINS: &[MathBuiltin] = &[
    MathBuiltin {
        name: "sqrt",
        description: "Square root",
    },
    MathBuiltin {
        name: "cbrt",
        description: "Cube root",
    },
    MathBuiltin {
        name: "abs",
        description: "Absolute value",
    },
    MathBuiltin {
        name: "exp",
        description: "e raised to a power",
    },
    MathBuiltin {
        name: "ln",
        description: "Natural logarithm",
    },
    MathBuiltin {
        name: "log",
        description: "Natural logarithm, or log(x, base)",
    },
    MathBuiltin {
        name: "log10",
        description: "Base-10 logarithm",
    },
    MathBuiltin {
        name: "log2",
        description: "Base-2 logarithm",
    },
    MathBuiltin {
        name: "pow",
        description: "pow(x, y) = x ^ y",
    },
    MathBuiltin {
        name: "floor",
        description: "Round down",
    },
    MathBuiltin {
        name: "ceil",
        description: "Round up",
    },
    MathBuiltin {
        name: "round",
        description: "Round to nearest, or round(x, digits)",
    },
    MathBuiltin {
        name: "sin",
        description: "Sine (radians)",
    },
    MathBuiltin {
        name: "cos",
        description: "Cosine (radians)",
    },
    MathBuiltin {
        name: "tan",
        description: "Tangent (radians)",
    },
    MathBuiltin {
        name: "asin",
        description: "Arcsine",
    },
    MathBuiltin {
        name: "acos",
        description: "Arccosine",
    },
    MathBuiltin {
        name: "atan",
        description: "Arctangent",
    },
    MathBuiltin {
        name: "atan2",
        description: "atan2(y, x)",
    },
    MathBuiltin {
        name: "hypot",
        description: "hypot(x, y) = sqrt(x^2 + y^2)",
    },
    MathBuiltin {
        name: "mod",
        description: "mod(x, y) = remainder of x / y",
    },
    MathBuiltin {
        name: "sign",
        description: "-1, 0 or 1",
    },
    MathBuiltin {
        name: "min",
        description: "Smaller of two values",
    },
    MathBuiltin {
        name: "max",
        description: "Larger of two values",
    },
];

/// Named constants visible to every expression. Sheet variables shadow them.
pub const CONSTANTS: &[(&str, f64)] = &[
    ("pi", std::f64::consts::PI),
    ("e", std::f64::consts::E),
    ("tau", std::f64::consts::TAU),
    ("phi", 1.618_033_988_749_895),
];

/// Round to a number of decimal places.
fn round_to(x: f64, digits: f64) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (x * factor).round() / factor
}

/// Sign of a number; zero stays zero.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// Register all math built-ins on the engine.
///
/// Registered functions take precedence over Rhai's package functions with the
/// same signature, which is how `log` becomes the natural logarithm here.
pub fn register_builtins(engine: &mut Engine) {
    engine.register_fn("sqrt", |x: f64| x.sqrt());
    engine.register_fn("cbrt", |x: f64| x.cbrt());
    engine.register_fn("abs", |x: f64| x.abs());
    engine.register_fn("exp", |x: f64| x.exp());
    engine.register_fn("ln", |x: f64| x.ln());
    engine.register_fn("log", |x: f64| x.ln());
    engine.register_fn("log", |x: f64, base: f64| x.log(base));
    engine.register_fn("log10", |x: f64| x.log10());
    engine.register_fn("log2", |x: f64| x.log2());
    engine.register_fn("pow", |x: f64, y: f64| x.powf(y));
    engine.register_fn("floor", |x: f64| x.floor());
    engine.register_fn("ceil", |x: f64| x.ceil());
    engine.register_fn("round", |x: f64| x.round());
    engine.register_fn("round", round_to);
    engine.register_fn("sin", |x: f64| x.sin());
    engine.register_fn("cos", |x: f64| x.cos());
    engine.register_fn("tan", |x: f64| x.tan());
    engine.register_fn("asin", |x: f64| x.asin());
    engine.register_fn("acos", |x: f64| x.acos());
    engine.register_fn("atan", |x: f64| x.atan());
    engine.register_fn("atan2", |y: f64, x: f64| y.atan2(x));
    engine.register_fn("hypot", |x: f64, y: f64| x.hypot(y));
    engine.register_fn("mod", |x: f64, y: f64| x % y);
    engine.register_fn("sign", sign);
    engine.register_fn("min", |x: f64, y: f64| x.min(y));
    engine.register_fn("max", |x: f64, y: f64| x.max(y));
}
