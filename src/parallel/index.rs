//! Integer types usable as `parallel_for` loop counters.

mod sealed {
    pub trait Sealed {}
}

/// A primitive integer that can drive [`Pool::parallel_for`](super::Pool::parallel_for).
///
/// Implemented for every primitive integer up to 64 bits plus `usize`/`isize`.
/// Loop bounds are widened to `i128` for partition arithmetic, so no range of
/// these types can overflow.
pub trait LoopIndex: Copy + Send + Sync + sealed::Sealed {
    #[doc(hidden)]
    fn to_i128(self) -> i128;

    /// Narrow a value known to lie between two values of `Self`.
    #[doc(hidden)]
    fn from_i128(value: i128) -> Self;
}

macro_rules! impl_loop_index {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl LoopIndex for $t {
                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_i128(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_loop_index!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widening_is_lossless() {
        assert_eq!(u64::from_i128(u64::MAX.to_i128()), u64::MAX);
        assert_eq!(i64::from_i128(i64::MIN.to_i128()), i64::MIN);
        assert_eq!(usize::MAX.to_i128(), usize::MAX as i128);
    }
}
