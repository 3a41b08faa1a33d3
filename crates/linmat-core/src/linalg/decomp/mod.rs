//! Matrix decompositions.
//!
//! | Decomposition | Module  | Factorization |
//! |---------------|---------|---------------|
//! | LU            | [`lu`]  | `PA = LU`     |
//! | QR            | [`qr`]  | `A = QR`      |

pub mod lu;
pub mod qr;
mod triangular;

pub use lu::LuDecomposition;
pub use qr::{QrDecomposition, lstsq};
