//! Element coercion to floating point.
//!
//! Matrices are generic over any element type, but arithmetic and the
//! factorizations work in `f64`. The [`Numeric`] trait is the single bridge:
//!
//! ```text
//! Numeric::to_f64
//!   ├── integers, f32, f64    -> the value itself
//!   ├── bool                  -> 1.0 / 0.0
//!   ├── str, String           -> parsed numeric text (trimmed)
//!   ├── SystemTime            -> milliseconds since the Unix epoch
//!   ├── Duration              -> milliseconds
//!   └── Option<T>             -> None is "missing"
//! ```
//!
//! `None` from [`Numeric::to_f64`] means "not convertible"; callers decide
//! whether that becomes a default (lenient arithmetic) or a
//! [`CoreError::CoercionFailure`](crate::CoreError::CoercionFailure).

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A value that may be interpreted as an `f64`.
pub trait Numeric {
    /// Convert to `f64`, or `None` when the value has no numeric reading.
    fn to_f64(&self) -> Option<f64>;

    /// Convert to `f64`, substituting `default` for non-convertible values.
    #[inline]
    fn to_f64_or(&self, default: f64) -> f64 {
        self.to_f64().unwrap_or(default)
    }
}

// ===========================================================================
// Macro implementations
// ===========================================================================

macro_rules! impl_numeric_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                #[inline]
                #[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
                fn to_f64(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_numeric_primitive!(i8, i16, i32, i64, i128, isize);
impl_numeric_primitive!(u8, u16, u32, u64, u128, usize);
impl_numeric_primitive!(f32, f64);

impl Numeric for bool {
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(if *self { 1.0 } else { 0.0 })
    }
}

impl Numeric for str {
    fn to_f64(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()
    }
}

impl Numeric for String {
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        self.as_str().to_f64()
    }
}

impl Numeric for SystemTime {
    fn to_f64(&self) -> Option<f64> {
        match self.duration_since(UNIX_EPOCH) {
            Ok(since) => Some(since.as_secs_f64() * 1e3),
            // Instants before the epoch map to negative milliseconds.
            Err(before) => Some(-before.duration().as_secs_f64() * 1e3),
        }
    }
}

impl Numeric for Duration {
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(self.as_secs_f64() * 1e3)
    }
}

impl<T: Numeric> Numeric for Option<T> {
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        self.as_ref().and_then(Numeric::to_f64)
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        (**self).to_f64()
    }
}

impl<T: Numeric + ?Sized> Numeric for Box<T> {
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        (**self).to_f64()
    }
}
