use serde::Serialize;
use std::fmt;

/// Position and value of the maximal cell of a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementPosition {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

impl ElementPosition {
    pub fn new(row: usize, col: usize, value: f64) -> Self {
        Self { row, col, value }
    }
}

/// Result record format: `<value> <row> <col>` with six fractional digits.
impl fmt::Display for ElementPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} {} {}", self.value, self.row, self.col)
    }
}
