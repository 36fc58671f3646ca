//! Conversion of Rust numeric primitives into JSON values.

use serde_json::Value;

/// A Rust numeric primitive that can be written as a JSON number.
///
/// Implemented for every integer width and for `f32`/`f64`. Non-finite
/// floats (`NaN`, `±inf`) have no JSON representation and convert to `null`.
pub trait JsonNumber: Copy {
    fn to_json(self) -> Value;
}

macro_rules! impl_json_number {
    ($($ty:ty),*) => {
        $(
            impl JsonNumber for $ty {
                #[inline]
                fn to_json(self) -> Value {
                    Value::from(self)
                }
            }
        )*
    };
}

impl_json_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
