use crate::math::matrix::Matrix;
use crate::prelude::{MatrixError, MatrixResult};
use std::io::{ErrorKind, Read};

/// Reads a matrix in the text format `n_rows n_cols v0 v1 ...`.
///
/// Tokens are whitespace separated, values fill the matrix in row-major
/// order. A missing, negative or non-numeric token is
/// [`MatrixError::MalformedInput`]; tokens past the last value are ignored.
pub fn parse_matrix<R: Read>(mut reader: R) -> MatrixResult<Matrix> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|err| match err.kind() {
            ErrorKind::InvalidData => MatrixError::MalformedInput("input is not UTF-8 text".into()),
            _ => MatrixError::Io(err),
        })?;
    parse_str(&text)
}

pub fn parse_str(text: &str) -> MatrixResult<Matrix> {
    let mut tokens = text.split_whitespace();
    let rows = read_dimension(tokens.next(), "row count")?;
    let cols = read_dimension(tokens.next(), "column count")?;

    // No stream holds more than usize::MAX values, so an overflowing shape
    // is always a short read.
    let expected = rows.checked_mul(cols).ok_or_else(|| {
        MatrixError::MalformedInput(format!("{}x{} matrix is too large", rows, cols))
    })?;

    // Count before allocating so a bogus header cannot reserve memory the
    // input never fills.
    let values: Vec<&str> = tokens.by_ref().take(expected).collect();
    if values.len() < expected {
        return Err(MatrixError::MalformedInput(format!(
            "{}x{} matrix needs {} values, found {}",
            rows,
            cols,
            expected,
            values.len()
        )));
    }

    let mut matrix = Matrix::allocate(rows, cols)?;
    for (index, (slot, token)) in matrix.as_mut_slice().iter_mut().zip(values).enumerate() {
        *slot = token.parse::<f64>().map_err(|_| {
            MatrixError::MalformedInput(format!(
                "value at ({}, {}) is not a number: {:?}",
                index / cols,
                index % cols,
                token
            ))
        })?;
    }

    if tokens.next().is_some() {
        log::debug!("ignoring trailing tokens after {}x{} matrix", rows, cols);
    }

    Ok(matrix)
}

fn read_dimension(token: Option<&str>, what: &str) -> MatrixResult<usize> {
    let token = token.ok_or_else(|| MatrixError::MalformedInput(format!("missing {}", what)))?;
    token.parse::<usize>().map_err(|_| {
        MatrixError::MalformedInput(format!(
            "{} must be a non-negative integer, got {:?}",
            what, token
        ))
    })
}
