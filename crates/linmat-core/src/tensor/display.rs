//! `Display` formatting for [`Tensor`].

use core::fmt;

use super::Tensor;

impl<T: fmt::Display> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "tensor([], dims={:?})", self.dims);
        }

        match self.ndim() {
            0 => write!(f, "tensor({})", self.data[0]),
            1 => {
                write!(f, "tensor([")?;
                write_row(f, &self.data)?;
                write!(f, "])")
            }
            2 => {
                let cols = self.dims[1];
                writeln!(f, "tensor([")?;
                let rows = self.data.chunks(cols);
                let last = self.dims[0] - 1;
                for (r, row) in rows.enumerate() {
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
            _ => {
                // 3-D and up: shape plus a flat data summary
                let n = self.data.len();
                write!(f, "tensor(dims={:?}, data=[{}", self.dims, self.data[0])?;
                if n > 2 {
                    write!(f, ", ..., {}", self.data[n - 1])?;
                } else if n == 2 {
                    write!(f, ", {}", self.data[1])?;
                }
                write!(f, "])")
            }
        }
    }
}

pub(crate) fn write_row<T: fmt::Display>(f: &mut fmt::Formatter<'_>, row: &[T]) -> fmt::Result {
    for (i, v) in row.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}
