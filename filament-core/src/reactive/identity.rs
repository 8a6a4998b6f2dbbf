//! Identity Comparison
//!
//! Every signal write is gated by an identity check: if the incoming value
//! is identical to the stored one, the write is suppressed and no subscriber
//! is notified.
//!
//! # Semantics
//!
//! Identity is stricter than `PartialEq` for floats and looser for shared
//! pointers:
//!
//! - `NaN` is identical to `NaN` (a signal stuck at `NaN` stops notifying).
//! - `+0.0` and `-0.0` are *not* identical (they have different bit patterns
//!   and observably different behavior downstream).
//! - `Arc` compares by pointer, so two separately allocated but equal values
//!   still count as a change.
//!
//! Plain values (integers, booleans, strings, ...) compare by `==`.

use std::sync::Arc;

/// The equality rule used to decide whether a new value differs enough
/// from the old one to warrant notification.
pub trait Identity {
    /// Returns true when `other` should be considered the same value,
    /// suppressing notification on write.
    fn identical(&self, other: &Self) -> bool;
}

macro_rules! identity_by_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                #[inline]
                fn identical(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identity_by_eq!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    String,
    &'static str,
);

impl Identity for f32 {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        // All NaNs are one value, regardless of payload or sign bit; the
        // bit compare handles everything else, keeping +0.0 and -0.0 apart.
        (self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
    }
}

impl Identity for f64 {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        (self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    #[inline]
    fn identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Identity> Identity for Option<T> {
    fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.identical(b),
            _ => false,
        }
    }
}

impl<A: Identity, B: Identity> Identity for (A, B) {
    fn identical(&self, other: &Self) -> bool {
        self.0.identical(&other.0) && self.1.identical(&other.1)
    }
}

impl<A: Identity, B: Identity, C: Identity> Identity for (A, B, C) {
    fn identical(&self, other: &Self) -> bool {
        self.0.identical(&other.0) && self.1.identical(&other.1) && self.2.identical(&other.2)
    }
}
