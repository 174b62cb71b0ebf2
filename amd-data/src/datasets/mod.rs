pub mod matrix_dataset;
pub mod traits;

pub use matrix_dataset::{MatrixDataset, MatrixSpec};
pub use traits::Dataset;
