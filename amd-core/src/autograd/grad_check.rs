use crate::autograd::matrix_func::MatrixMatrixFunc;
use crate::autograd::scalar_func::ScalarMatrixFunc;
use crate::error::AmdError;
use crate::matrix::{DenseMatrix, MatrixAdaptor};
use log::debug;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed at ({row}, {col}): analytical {analytical:?} != numerical {numerical:?}. Difference: {difference:?}")]
    GradientMismatch {
        row: usize,
        col: usize,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite at ({row}, {col}). f(X+h): {loss_plus:?}, f(X-h): {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        row: usize,
        col: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Derivative has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Function execution failed during gradient check: {0}")]
    ForwardPassError(AmdError),

    #[error("Matrix error during gradient check: {0}")]
    Amd(AmdError),
}

impl From<AmdError> for GradCheckError {
    fn from(err: AmdError) -> Self {
        GradCheckError::Amd(err)
    }
}

/// Finite difference settings for [`check_grad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    /// Perturbation applied to one entry at a time.
    pub epsilon: f64,
    /// Allowed difference, scaled by `max(1, |analytical|, |numerical|)`.
    pub tolerance: f64,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        GradCheckConfig {
            epsilon: 1e-6,
            tolerance: 1e-4,
        }
    }
}

/// Checks the derivative computed by the graph against central finite
/// differences `(f(X + eE_ij) - f(X - eE_ij)) / 2e`, entry by entry.
pub fn check_grad<F>(func: F, x: &DenseMatrix, config: &GradCheckConfig) -> Result<(), GradCheckError>
where
    F: Fn(&MatrixMatrixFunc<DenseMatrix>) -> Result<ScalarMatrixFunc<DenseMatrix>, AmdError>,
{
    let eval = |point: DenseMatrix| -> Result<ScalarMatrixFunc<DenseMatrix>, GradCheckError> {
        func(&MatrixMatrixFunc::variable(point)).map_err(GradCheckError::ForwardPassError)
    };

    let analytical = eval(x.clone())?.derivative().clone();
    if analytical.shape() != x.shape() {
        return Err(GradCheckError::ShapeMismatch {
            expected: x.shape(),
            actual: analytical.shape(),
        });
    }

    let (rows, cols) = x.shape();
    debug!("Checking {}x{} gradient, epsilon = {}", rows, cols, config.epsilon);
    for row in 0..rows {
        for col in 0..cols {
            let mut plus = x.clone();
            plus[(row, col)] += config.epsilon;
            let mut minus = x.clone();
            minus[(row, col)] -= config.epsilon;

            let loss_plus = *eval(plus)?.value();
            let loss_minus = *eval(minus)?.value();
            let numerical = (loss_plus - loss_minus) / (2.0 * config.epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    row,
                    col,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical = analytical[(row, col)];
            let difference = (analytical - numerical).abs();
            let scale = 1.0_f64.max(analytical.abs()).max(numerical.abs());
            if difference > config.tolerance * scale {
                return Err(GradCheckError::GradientMismatch {
                    row,
                    col,
                    analytical,
                    numerical,
                    difference,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::random::{rand_psd_dense, RandomPsdConfig};
    use crate::utils::testing::init_logger;

    #[test]
    fn test_check_grad_trace_product() {
        init_logger();
        let mut rng = RandomPsdConfig::with_seed(11).rng();
        let a = MatrixMatrixFunc::constant(rand_psd_dense(4, &mut rng));
        let x = rand_psd_dense(4, &mut rng);
        let result = check_grad(|x| a.matmul(x)?.matmul(x)?.trace(), &x, &GradCheckConfig::default());
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_check_grad_logdet_inverse() {
        let mut rng = RandomPsdConfig::with_seed(12).rng();
        let a = MatrixMatrixFunc::constant(rand_psd_dense(3, &mut rng));
        let x = rand_psd_dense(3, &mut rng);
        let config = GradCheckConfig::default();
        assert!(check_grad(|x| a.add(&x.inv()?)?.logdet(), &x, &config).is_ok());
    }

    #[test]
    fn test_check_grad_detects_mismatch() {
        let x = DenseMatrix::eye(2);
        let result = check_grad(
            |x| {
                let f = x.trace()?;
                Ok(ScalarMatrixFunc::new(*f.value(), f.derivative().scale(&2.0)))
            },
            &x,
            &GradCheckConfig::default(),
        );
        assert!(matches!(
            result,
            Err(GradCheckError::GradientMismatch { row: 0, col: 0, .. })
        ));
    }

    #[test]
    fn test_check_grad_forward_error() {
        let x = DenseMatrix::zeros(2, 3);
        let result = check_grad(|x| x.trace(), &x, &GradCheckConfig::default());
        assert!(matches!(
            result,
            Err(GradCheckError::ForwardPassError(AmdError::NonSquare { .. }))
        ));
    }

    #[test]
    fn test_check_grad_shape_mismatch() {
        let x = DenseMatrix::eye(2);
        let result = check_grad(
            |_| Ok(ScalarMatrixFunc::new(1.0, DenseMatrix::eye(3))),
            &x,
            &GradCheckConfig::default(),
        );
        assert_eq!(
            result,
            Err(GradCheckError::ShapeMismatch {
                expected: (2, 2),
                actual: (3, 3)
            })
        );
    }
}
