use crate::math::matrix::Matrix;
use log::{debug, info, log_enabled, Level};

pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    /// Pretty-prints a matrix at debug level. Formatting is skipped unless
    /// debug logging is enabled.
    pub fn dump_matrix(&self, label: &str, matrix: &Matrix) {
        if log_enabled!(Level::Debug) {
            debug!("{}: {}", label, matrix);
        }
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
