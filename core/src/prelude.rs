use serde::{Deserialize, Serialize};

/// How the product cells are scheduled across threads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    Sequential,
    #[default]
    Parallel,
}

/// Shared configuration for the multiply-and-reduce step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ComputeConfig {
    pub schedule: Schedule,
    /// Worker count for a dedicated pool. `None` runs on the global rayon pool.
    pub threads: Option<usize>,
    /// Build the whole product matrix before scanning it.
    pub materialize: bool,
}

impl ComputeConfig {
    pub fn sequential() -> Self {
        Self {
            schedule: Schedule::Sequential,
            ..Default::default()
        }
    }
}

/// Common error type for matrix construction, I/O and reduction.
#[derive(thiserror::Error, Debug)]
pub enum MatrixError {
    #[error("allocation failure for {rows}x{cols} matrix")]
    AllocationFailure { rows: usize, cols: usize },
    #[error("dimension mismatch: [{lhs_rows}x{lhs_cols}] x [{rhs_rows}x{rhs_cols}]")]
    DimensionMismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },
    #[error("empty product: [{rows}x{inner}] x [{inner}x{cols}] has no cells")]
    EmptyProduct {
        rows: usize,
        inner: usize,
        cols: usize,
    },
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("shape mismatch: {rows}x{cols} matrix cannot hold {len} elements")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("none of {cells} product cells is ordered above the sentinel")]
    NoOrderedMaximum { cells: usize },
    #[error("worker pool: {0}")]
    ThreadPool(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type MatrixResult<T> = Result<T, MatrixError>;
