use core::fmt;

use crate::tensor::write_row;

use super::Matrix;

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "matrix([], shape={:?})", self.shape());
        }
        writeln!(f, "matrix([")?;
        let last = self.nrow() - 1;
        for (r, row) in self.rows().enumerate() {
            write!(f, "  [")?;
            write_row(f, row)?;
            if r < last {
                writeln!(f, "],")?;
            } else {
                writeln!(f, "]")?;
            }
        }
        write!(f, "])")
    }
}
