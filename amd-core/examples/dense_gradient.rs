//! Numeric gradients of matrix functions on random SPD matrices, checked
//! against finite differences.

use amd_core::autograd::{check_grad, GradCheckConfig};
use amd_core::matrix::random::{rand_psd_dense, RandomPsdConfig};
use amd_core::{AmdError, DenseMatrix, MatrixMatrixFunc, ScalarMatrixFunc};

type Var = MatrixMatrixFunc<DenseMatrix>;
type Func<'a> = Box<dyn Fn(&Var) -> Result<ScalarMatrixFunc<DenseMatrix>, AmdError> + 'a>;

fn main() -> Result<(), AmdError> {
    env_logger::init();

    let n = 4;
    let mut rng = RandomPsdConfig::with_seed(2024).rng();
    let a = MatrixMatrixFunc::constant(rand_psd_dense(n, &mut rng));
    let b = MatrixMatrixFunc::constant(rand_psd_dense(n, &mut rng));
    let x0 = rand_psd_dense(n, &mut rng);

    let functions: Vec<(&str, Func)> = vec![
        ("trace(A*X)", Box::new(|x: &Var| a.matmul(x)?.trace())),
        ("trace(A*X*B*X)", Box::new(|x: &Var| a.matmul(x)?.matmul(&b)?.matmul(x)?.trace())),
        ("logdet(X)", Box::new(|x: &Var| x.logdet())),
        ("norm(A*X-B,'fro')", Box::new(|x: &Var| a.matmul(x)?.sub(&b)?.fnorm())),
    ];

    let config = GradCheckConfig::default();
    for (name, f) in &functions {
        let result = f(&MatrixMatrixFunc::variable(x0.clone()))?;
        println!("{} = {:.6}", name, result.value());
        println!("d/dX =\n{}", result.derivative());
        match check_grad(f, &x0, &config) {
            Ok(()) => println!("finite differences agree\n"),
            Err(e) => println!("finite differences disagree: {}\n", e),
        }
    }
    Ok(())
}
