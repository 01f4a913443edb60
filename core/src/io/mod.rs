pub mod position;
pub mod reader;
pub mod writer;

pub use position::ElementPosition;
pub use reader::{parse_matrix, parse_str};
pub use writer::write_position;
