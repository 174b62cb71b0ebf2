//! Loads one matrix and prints it with its trace and log-determinant.
//!
//! ```text
//! cargo run -p amd-data --example load_matrix -- <path> <DENSE_TXT|DENSE_BIN|SPARSE_IJV> <n> [nnz]
//! ```

use amd_core::{AmdError, MatrixAdaptor};
use amd_data::{FileFormat, MatrixSpec};
use std::env;

fn parse_usize(arg: Option<&String>, what: &str) -> Result<usize, AmdError> {
    arg.ok_or_else(|| AmdError::InvalidArguments(format!("missing {}", what)))?
        .parse()
        .map_err(|_| AmdError::InvalidArguments(format!("{} must be a non-negative integer", what)))
}

fn main() -> Result<(), AmdError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let path = args
        .first()
        .ok_or_else(|| AmdError::InvalidArguments("missing path".to_string()))?;
    let format: FileFormat = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("DENSE_TXT")
        .parse()?;
    let n = parse_usize(args.get(2), "n")?;

    let spec = if format.is_dense() {
        MatrixSpec::dense(path.as_str(), path.as_str(), format, n)
    } else {
        MatrixSpec::sparse(path.as_str(), path.as_str(), n, parse_usize(args.get(3), "nnz")?)
    };
    let m = spec.load()?;
    println!("{}", m);
    println!("trace  = {}", m.trace()?);
    match m.logdet() {
        Ok(v) => println!("logdet = {}", v),
        Err(e) => println!("logdet unavailable: {}", e),
    }
    Ok(())
}
