use crate::error::AmdError;
use crate::matrix::dense::DenseMatrix;
#[cfg(feature = "sparse")]
use crate::matrix::sparse::SparseMatrix;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
#[cfg(feature = "sparse")]
use rand_distr::{Bernoulli, Uniform};

/// Seeding for the random matrix generators.
///
/// A fixed `seed` makes the generated matrices reproducible; `None` draws the
/// seed from the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomPsdConfig {
    pub seed: Option<u64>,
}

impl RandomPsdConfig {
    pub fn with_seed(seed: u64) -> Self {
        RandomPsdConfig { seed: Some(seed) }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Random dense symmetric positive definite matrix.
///
/// Draws `A` with entries uniform in `[0, 1)` and returns `A + A' + n*I`,
/// which is symmetric and strictly diagonally dominant.
pub fn rand_psd_dense<R: Rng + ?Sized>(n: usize, rng: &mut R) -> DenseMatrix {
    debug!("Creating random dense {}x{} PSD matrix", n, n);
    let a = DenseMatrix::from_fn(n, n, |_, _| rng.gen::<f64>());
    let mut sym = DenseMatrix::from_fn(n, n, |r, c| a[(r, c)] + a[(c, r)]);
    for i in 0..n {
        sym[(i, i)] += n as f64;
    }
    sym
}

/// Random dense matrix with standard normal entries.
pub fn randn_dense<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> DenseMatrix {
    DenseMatrix::from_fn(rows, cols, |_, _| StandardNormal.sample(rng))
}

/// Random sparse symmetric positive definite matrix with about `nnz` entries.
///
/// Every diagonal entry is `n + u` with `u` uniform in `[0, 1)`. Each pair of
/// off-diagonal entries is kept with probability
/// `p = (nnz - n) / (n^2 - n)` and mirrored.
///
/// # Errors
/// `InvalidArguments` when `nnz < n` or `nnz > n^2`.
#[cfg(feature = "sparse")]
pub fn rand_psd_sparse<R: Rng + ?Sized>(
    n: usize,
    nnz: usize,
    rng: &mut R,
) -> Result<SparseMatrix, AmdError> {
    if nnz < n {
        return Err(AmdError::InvalidArguments(format!(
            "nnz ({}) < n ({}) is not supported",
            nnz, n
        )));
    }
    if nnz > n * n {
        return Err(AmdError::InvalidArguments(format!(
            "nnz ({}) > n^2 ({})",
            nnz,
            n * n
        )));
    }
    let p = if n > 1 {
        ((nnz - n) as f64 / (n * n - n) as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let toss = Bernoulli::new(p)
        .map_err(|e| AmdError::InvalidArguments(format!("keep probability {}: {}", p, e)))?;
    let unit = Uniform::new(0.0_f64, 1.0);

    debug!("Creating random sparse {}x{} PSD triplets (p = {})", n, n, p);
    let mut triplets = Vec::with_capacity(nnz + n);
    for j in 0..n {
        for i in j..n {
            if i == j {
                triplets.push((i, j, n as f64 + unit.sample(rng)));
            } else if toss.sample(rng) {
                let v = unit.sample(rng);
                triplets.push((i, j, v));
                triplets.push((j, i, v));
            }
        }
    }
    SparseMatrix::from_triplets(n, n, &triplets)
}

/// Convenience wrapper building the generator from a [`RandomPsdConfig`].
pub fn rand_psd(n: usize, config: &RandomPsdConfig) -> DenseMatrix {
    let mut rng = config.rng();
    rand_psd_dense(n, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixAdaptor;

    #[test]
    fn test_rand_psd_dense_is_symmetric_and_positive_definite() {
        let mut rng = RandomPsdConfig::with_seed(7).rng();
        let a = rand_psd_dense(12, &mut rng);
        assert_eq!(a.shape(), (12, 12));
        assert!(a.is_symmetric());
        assert!(a.cholesky().is_ok());
        for i in 0..12 {
            assert!(a[(i, i)] >= 12.0);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = rand_psd(5, &RandomPsdConfig::with_seed(42));
        let b = rand_psd(5, &RandomPsdConfig::with_seed(42));
        let c = rand_psd(5, &RandomPsdConfig::with_seed(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_randn_dense_shape() {
        let mut rng = RandomPsdConfig::with_seed(1).rng();
        let a = randn_dense(3, 4, &mut rng);
        assert_eq!(a.shape(), (3, 4));
        assert!(a.data().iter().all(|v| v.is_finite()));
    }

    #[cfg(feature = "sparse")]
    #[test]
    fn test_rand_psd_sparse() {
        let mut rng = RandomPsdConfig::with_seed(3).rng();
        let a = rand_psd_sparse(30, 200, &mut rng).unwrap();
        assert_eq!(a.shape(), (30, 30));
        assert!(a.nnz() >= 30);
        let dense = a.to_dense();
        assert!(dense.is_symmetric());
        assert!(dense.cholesky().is_ok());
    }

    #[cfg(feature = "sparse")]
    #[test]
    fn test_rand_psd_sparse_only_diagonal() {
        let mut rng = RandomPsdConfig::with_seed(3).rng();
        let a = rand_psd_sparse(10, 10, &mut rng).unwrap();
        assert_eq!(a.nnz(), 10);
    }

    #[cfg(feature = "sparse")]
    #[test]
    fn test_rand_psd_sparse_invalid_nnz() {
        let mut rng = RandomPsdConfig::with_seed(3).rng();
        assert!(matches!(
            rand_psd_sparse(10, 5, &mut rng),
            Err(AmdError::InvalidArguments(_))
        ));
        assert!(rand_psd_sparse(3, 10, &mut rng).is_err());
    }
}
