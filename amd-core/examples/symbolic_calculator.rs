//! Symbolic derivative calculator.
//!
//! Each command line argument is read as one expression over `X` (the
//! variable), `A..Z` (constant matrices), `I`, `Z` and lowercase scalars:
//!
//! ```text
//! cargo run --example symbolic_calculator -- "trace(A*X*B*X)" "logdet(inv(X))"
//! ```
//!
//! With no arguments a few sample expressions are differentiated.

use amd_core::{AmdError, Calculator, CalculatorConfig};
use std::env;

const SAMPLES: [&str; 4] = [
    "trace(X*A)",
    "trace(A*X*B*X)",
    "logdet(X)",
    "2*trace(inv(X))-logdet(X)",
];

fn main() -> Result<(), AmdError> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let expressions: Vec<&str> = if args.is_empty() {
        SAMPLES.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    let mut calc = Calculator::new(CalculatorConfig::default())?;
    for expr in expressions {
        match calc.compute(expr) {
            Ok(_) => {
                println!("Function:   {}", calc.function_str().unwrap_or_default());
                println!("Derivative: {}", calc.derivative_str().unwrap_or_default());
            }
            Err(e) => println!("Error in '{}': {}", expr, e),
        }
        println!();
    }
    Ok(())
}
