use crate::io::ElementPosition;
use crate::math::matrix::Matrix;
use crate::math::stats::{MaxTracker, StatsHelper};
use crate::math::transpose::transpose;
use crate::prelude::{ComputeConfig, MatrixError, MatrixResult, Schedule};
use crate::telemetry::log::LogManager;
use rayon::prelude::*;

/// Multiply-and-reduce driver: finds the largest cell of `lhs * rhs`.
///
/// The right operand is transposed once so every cell is a dot product of
/// two contiguous rows. Cells are independent; with [`Schedule::Parallel`]
/// each worker reduces whole rows to a local [`MaxTracker`] and the
/// per-row results are merged sequentially in row order, which keeps the
/// first row-major occurrence of the maximum regardless of thread timing.
pub struct MaxProduct {
    config: ComputeConfig,
    logger: LogManager,
}

impl MaxProduct {
    pub fn new(config: ComputeConfig) -> Self {
        Self {
            config,
            logger: LogManager::new(),
        }
    }

    /// Position and value of the maximum cell of `lhs * rhs`.
    pub fn run(&self, lhs: &Matrix, rhs: &Matrix) -> MatrixResult<ElementPosition> {
        check_inner(lhs, rhs)?;
        if lhs.is_empty() || rhs.is_empty() {
            return Err(MatrixError::EmptyProduct {
                rows: lhs.n_rows(),
                inner: lhs.n_cols(),
                cols: rhs.n_cols(),
            });
        }

        self.logger.dump_matrix("lhs", lhs);
        self.logger.dump_matrix("rhs", rhs);

        if self.config.materialize {
            let full = self.product(lhs, rhs)?;
            return argmax(&full);
        }

        let rhs_t = transpose(rhs)?;
        let tracker = self.install(|| reduce_rows(lhs, &rhs_t, self.config.schedule))?;
        log::debug!(
            "reduced {} cells of [{}x{}] product",
            tracker.cells(),
            lhs.n_rows(),
            rhs.n_cols()
        );
        tracker
            .best()
            .ok_or(MatrixError::NoOrderedMaximum {
                cells: tracker.cells(),
            })
    }

    /// Full product matrix. Each worker writes a disjoint output row.
    pub fn product(&self, lhs: &Matrix, rhs: &Matrix) -> MatrixResult<Matrix> {
        check_inner(lhs, rhs)?;
        let mut out = Matrix::allocate(lhs.n_rows(), rhs.n_cols())?;
        if out.is_empty() {
            return Ok(out);
        }

        let rhs_t = transpose(rhs)?;
        let width = out.n_cols();
        let fill_row = |(row, cells): (usize, &mut [f64])| {
            let a = lhs.row(row);
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = StatsHelper::dot(a, rhs_t.row(col));
            }
        };

        let schedule = self.config.schedule;
        let slots = out.as_mut_slice();
        self.install(|| match schedule {
            Schedule::Sequential => slots.chunks_mut(width).enumerate().for_each(fill_row),
            Schedule::Parallel => slots.par_chunks_mut(width).enumerate().for_each(fill_row),
        })?;

        Ok(out)
    }

    fn install<T, F>(&self, job: F) -> MatrixResult<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match (self.config.schedule, self.config.threads) {
            (Schedule::Parallel, Some(threads)) => {
                let pool = checked_pool(
                    rayon::ThreadPoolBuilder::new()
                        .num_threads(threads)
                        .build(),
                )?;
                Ok(pool.install(job))
            }
            _ => Ok(job()),
        }
    }
}

impl Default for MaxProduct {
    fn default() -> Self {
        Self::new(ComputeConfig::default())
    }
}

fn checked_pool(
    built: Result<rayon::ThreadPool, rayon::ThreadPoolBuildError>,
) -> MatrixResult<rayon::ThreadPool> {
    built.map_err(|err| MatrixError::ThreadPool(err.to_string()))
}

fn check_inner(lhs: &Matrix, rhs: &Matrix) -> MatrixResult<()> {
    if lhs.n_cols() != rhs.n_rows() {
        return Err(MatrixError::DimensionMismatch {
            lhs_rows: lhs.n_rows(),
            lhs_cols: lhs.n_cols(),
            rhs_rows: rhs.n_rows(),
            rhs_cols: rhs.n_cols(),
        });
    }
    Ok(())
}

fn reduce_rows(lhs: &Matrix, rhs_t: &Matrix, schedule: Schedule) -> MaxTracker {
    let row_max = |row: usize| {
        let a = lhs.row(row);
        let mut tracker = MaxTracker::new();
        for col in 0..rhs_t.n_rows() {
            tracker.offer(row, col, StatsHelper::dot(a, rhs_t.row(col)));
        }
        tracker
    };

    let partials: Vec<MaxTracker> = match schedule {
        Schedule::Sequential => (0..lhs.n_rows()).map(row_max).collect(),
        Schedule::Parallel => (0..lhs.n_rows()).into_par_iter().map(row_max).collect(),
    };

    // Partials are in row order; merge must not be reordered.
    partials.into_iter().fold(MaxTracker::new(), MaxTracker::merge)
}

/// Maximum of `lhs * rhs` with the default parallel configuration.
pub fn max_product_element(lhs: &Matrix, rhs: &Matrix) -> MatrixResult<ElementPosition> {
    MaxProduct::default().run(lhs, rhs)
}

/// `lhs * rhs` with the default parallel configuration.
pub fn product(lhs: &Matrix, rhs: &Matrix) -> MatrixResult<Matrix> {
    MaxProduct::default().product(lhs, rhs)
}

/// Row-major scan for the largest element, first occurrence wins.
pub fn argmax(matrix: &Matrix) -> MatrixResult<ElementPosition> {
    if matrix.is_empty() {
        return Err(MatrixError::EmptyProduct {
            rows: matrix.n_rows(),
            inner: 0,
            cols: matrix.n_cols(),
        });
    }

    let mut tracker = MaxTracker::new();
    for row in 0..matrix.n_rows() {
        for (col, &value) in matrix.row(row).iter().enumerate() {
            tracker.offer(row, col, value);
        }
    }
    tracker.best().ok_or(MatrixError::NoOrderedMaximum {
        cells: tracker.cells(),
    })
}
