use crate::io::ElementPosition;

pub struct StatsHelper;

impl StatsHelper {
    /// Sum of pairwise products over the common prefix of both slices.
    ///
    /// Zipped iteration keeps the inner loop free of per-element bounds checks.
    pub fn dot(lhs: &[f64], rhs: &[f64]) -> f64 {
        lhs.iter().zip(rhs).map(|(a, b)| a * b).sum()
    }
}

/// Running maximum over cells offered in row-major order.
///
/// A cell replaces the current best only when its value is strictly greater,
/// so the first occurrence of the maximum wins. The starting bound is
/// `f64::MIN`; NaN never compares greater and is never selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxTracker {
    best: Option<ElementPosition>,
    cells: usize,
}

impl MaxTracker {
    pub const SENTINEL: f64 = f64::MIN;

    pub fn new() -> Self {
        Self {
            best: None,
            cells: 0,
        }
    }

    fn bound(&self) -> f64 {
        self.best.map_or(Self::SENTINEL, |best| best.value)
    }

    pub fn offer(&mut self, row: usize, col: usize, value: f64) {
        self.cells += 1;
        if value > self.bound() {
            self.best = Some(ElementPosition::new(row, col, value));
        }
    }

    /// Folds in a tracker that covered cells strictly after this one's in
    /// row-major order. Ties keep this tracker's winner.
    pub fn merge(mut self, later: MaxTracker) -> MaxTracker {
        self.cells += later.cells;
        if let Some(candidate) = later.best {
            if candidate.value > self.bound() {
                self.best = Some(candidate);
            }
        }
        self
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn best(&self) -> Option<ElementPosition> {
        self.best
    }
}

impl Default for MaxTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_of_empty_slices_is_zero() {
        assert_eq!(StatsHelper::dot(&[], &[]), 0.0);
    }

    #[test]
    fn dot_sums_pairwise_products() {
        assert_eq!(StatsHelper::dot(&[1.0, 2.0, 3.0], &[4.0, -5.0, 6.0]), 12.0);
    }

    #[test]
    fn tracker_keeps_first_of_equal_values() {
        let mut tracker = MaxTracker::new();
        tracker.offer(0, 0, 1.0);
        tracker.offer(0, 1, 3.0);
        tracker.offer(1, 0, 3.0);
        assert_eq!(tracker.best(), Some(ElementPosition::new(0, 1, 3.0)));
        assert_eq!(tracker.cells(), 3);
    }

    #[test]
    fn tracker_accepts_negative_values() {
        let mut tracker = MaxTracker::new();
        tracker.offer(0, 0, -1e300);
        assert_eq!(tracker.best().map(|p| p.value), Some(-1e300));
    }

    #[test]
    fn tracker_skips_nan_and_sentinel() {
        let mut tracker = MaxTracker::new();
        tracker.offer(0, 0, f64::NAN);
        tracker.offer(0, 1, f64::MIN);
        tracker.offer(0, 2, f64::NEG_INFINITY);
        assert_eq!(tracker.best(), None);
        tracker.offer(0, 3, -2.0);
        assert_eq!(tracker.best(), Some(ElementPosition::new(0, 3, -2.0)));
    }

    #[test]
    fn merge_prefers_earlier_block_on_ties() {
        let mut early = MaxTracker::new();
        early.offer(0, 1, 5.0);
        let mut late = MaxTracker::new();
        late.offer(1, 0, 5.0);
        let merged = early.merge(late);
        assert_eq!(merged.best(), Some(ElementPosition::new(0, 1, 5.0)));
        assert_eq!(merged.cells(), 2);
    }

    #[test]
    fn merge_takes_strictly_greater_later_value() {
        let mut early = MaxTracker::new();
        early.offer(0, 0, 1.0);
        let mut late = MaxTracker::new();
        late.offer(3, 2, 1.5);
        assert_eq!(
            early.merge(late).best(),
            Some(ElementPosition::new(3, 2, 1.5))
        );
        assert_eq!(MaxTracker::new().merge(late).best(), late.best());
    }
}
