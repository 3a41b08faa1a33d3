//! # linmat
//!
//! Matrices over arbitrary element types with dense linear algebra on top.
//!
//! One `use linmat::prelude::*;` gives you [`Matrix`](core::Matrix),
//! the [`Matrices`](core::Matrices) facade, `PA = LU`, `A = QR` and linear
//! solves.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Tensors, matrices, LU, QR, solves |
//! | `serde` | `Serialize`/`Deserialize` for matrices, tensors and tolerances |

pub use linmat_core as core;

/// Glob-import convenience: `use linmat::prelude::*;`
pub mod prelude {
    pub use linmat_core::prelude::*;
}
