use crate::io::position::ElementPosition;
use crate::prelude::MatrixResult;
use std::io::Write;

/// Writes the result record `<value> <row> <col>` with no trailing newline.
pub fn write_position<W: Write>(position: &ElementPosition, mut writer: W) -> MatrixResult<()> {
    write!(writer, "{}", position)?;
    writer.flush()?;
    Ok(())
}
