pub mod matrix;
pub mod reduce;
pub mod stats;
pub mod transpose;

pub use matrix::Matrix;
pub use reduce::{argmax, max_product_element, product, MaxProduct};
pub use stats::{MaxTracker, StatsHelper};
pub use transpose::transpose;
