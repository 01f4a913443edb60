//! Dense matrix product and max-element reduction.
//!
//! Two matrices are parsed from text, multiplied, and the position and value
//! of the largest product cell is reported. The core never touches files or
//! terminates the process; every failure surfaces as a [`MatrixError`].

pub mod io;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use io::{parse_matrix, write_position, ElementPosition};
pub use math::{argmax, max_product_element, product, transpose, Matrix, MaxProduct};
pub use prelude::{ComputeConfig, MatrixError, MatrixResult, Schedule};
