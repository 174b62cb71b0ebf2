//! Loading matrices from files.
//!
//! [`load_dense`] and [`load_sparse`] read the `DENSE_TXT`, `DENSE_BIN` and
//! `SPARSE_IJV` layouts; [`MatrixDataset`] gathers several named matrices
//! behind the [`Dataset`] trait.

pub mod datasets;
pub mod format;
pub mod loader;

pub use datasets::{Dataset, MatrixDataset, MatrixSpec};
pub use format::FileFormat;
pub use loader::{load_dense, load_sparse};
