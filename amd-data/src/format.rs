use amd_core::AmdError;
use std::fmt;
use std::str::FromStr;

/// On-disk matrix layouts understood by the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Whitespace separated `f64` values, column-major.
    DenseTxt,
    /// Little-endian `f64` values, column-major.
    DenseBin,
    /// One `i j v` triplet per line, 0-based indices.
    SparseIjv,
}

impl FileFormat {
    pub fn tag(&self) -> &'static str {
        match self {
            FileFormat::DenseTxt => "DENSE_TXT",
            FileFormat::DenseBin => "DENSE_BIN",
            FileFormat::SparseIjv => "SPARSE_IJV",
        }
    }

    pub fn is_dense(&self) -> bool {
        !matches!(self, FileFormat::SparseIjv)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FileFormat {
    type Err = AmdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DENSE_TXT" => Ok(FileFormat::DenseTxt),
            "DENSE_BIN" => Ok(FileFormat::DenseBin),
            "SPARSE_IJV" => Ok(FileFormat::SparseIjv),
            other => Err(AmdError::InvalidArguments(format!(
                "unknown file format '{}'",
                other
            ))),
        }
    }
}
