use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::Add;

/// Numeric type usable as an edge cost, a cost-so-far and a queue priority.
///
/// Floats are ordered with `total_cmp`, so a NaN produced by a caller's
/// heuristic sorts after every finite value instead of breaking the heap.
pub trait Cost: Copy + Debug + PartialOrd + Add<Output = Self> {
    const ZERO: Self;

    fn cost_cmp(&self, other: &Self) -> Ordering;

    /// `None` when the sum does not fit. Floats never fail (they go to infinity).
    fn checked_add(self, other: Self) -> Option<Self>;

    /// Negative costs are a precondition violation for the search.
    fn is_negative(&self) -> bool {
        *self < Self::ZERO
    }
}

macro_rules! impl_int_cost {
    ($($t:ty),*) => {$(
        impl Cost for $t {
            const ZERO: Self = 0;
            #[inline]
            fn cost_cmp(&self, other: &Self) -> Ordering { self.cmp(other) }
            #[inline]
            fn checked_add(self, other: Self) -> Option<Self> { <$t>::checked_add(self, other) }
        }
    )*};
}

macro_rules! impl_float_cost {
    ($($t:ty),*) => {$(
        impl Cost for $t {
            const ZERO: Self = 0.0;
            #[inline]
            fn cost_cmp(&self, other: &Self) -> Ordering { self.total_cmp(other) }
            #[inline]
            fn checked_add(self, other: Self) -> Option<Self> { Some(self + other) }
        }
    )*};
}

impl_int_cost!(i32, i64, u32, u64, usize);
impl_float_cost!(f32, f64);
