use crate::math::matrix::Matrix;
use crate::prelude::MatrixResult;

/// Returns a new matrix with rows and columns swapped.
///
/// After transposing, column `j` of `src` is the contiguous row `j` of the
/// result, which lets the product walk both operands row-wise. The input is
/// left untouched.
pub fn transpose(src: &Matrix) -> MatrixResult<Matrix> {
    let (rows, cols) = (src.n_rows(), src.n_cols());
    let mut dst = Matrix::allocate(cols, rows)?;

    let from = src.as_slice();
    let to = dst.as_mut_slice();
    for row in 0..rows {
        for col in 0..cols {
            to[col * rows + row] = from[row * cols + col];
        }
    }

    Ok(dst)
}

impl Matrix {
    pub fn transposed(&self) -> MatrixResult<Matrix> {
        transpose(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_swaps_shape_and_elements() {
        let m = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        let t = transpose(&m).unwrap();
        let expected = Matrix::from_rows(&[&[1.0, 4.0], &[2.0, 5.0], &[3.0, 6.0]]).unwrap();
        assert_eq!(t, expected);
    }

    #[test]
    fn transpose_twice_is_identity() {
        let m = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.transposed().unwrap().transposed().unwrap(), m);
    }

    #[test]
    fn transpose_handles_degenerate_shapes() {
        let m = Matrix::allocate(0, 4).unwrap();
        let t = transpose(&m).unwrap();
        assert_eq!((t.n_rows(), t.n_cols()), (4, 0));
    }
}
