use std::sync::Mutex;

/// Counters for one driver session, safe to share across threads.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub matrices_loaded: usize,
    pub products: usize,
    pub cells: usize,
    pub errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_loaded(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.matrices_loaded += 1;
        }
    }

    pub fn record_product(&self, cells: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.products += 1;
            metrics.cells += cells;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner.lock().map(|metrics| *metrics).unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
