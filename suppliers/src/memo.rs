mod config;
mod expiring;
mod permanent;

pub use self::config::{Memo, MemoBuilder, MemoConfig};
pub use self::expiring::Expiring;
pub use self::permanent::Memoized;

use crate::Supplier;
use std::time::Duration;

/// Turns a [`Supplier`] into one that caches its result.
///
/// [`Memoize::Memoized`] names the resulting type. For suppliers this module already produced
/// ([`Memoized`], [`Expiring`], [`Memo`]) it is the same type, and
/// [`memoize()`](Memoize::memoize) hands the wrapper back untouched instead of nesting another
/// cache around it. An expiring wrapper keeps its time to live.
pub trait Memoize
where
    Self: Supplier + Sized,
{
    type Memoized: Supplier<Output = Self::Output, Error = Self::Error>;

    fn memoize(self) -> Self::Memoized;

    fn memoize_for(self, time_to_live: Duration) -> Expiring<Self> {
        Expiring::new(self, time_to_live)
    }
}

impl<F, R, E> Memoize for F
where
    F: Fn() -> Result<R, E>,
    R: Clone,
{
    type Memoized = Memoized<F>;

    fn memoize(self) -> Self::Memoized {
        Memoized::new(self)
    }
}

/// Memoizes `supplier` forever.
///
/// Nothing is computed until the first call to [`Supplier::get()`] on the result. A supplier that
/// is already memoized comes back as is.
pub fn memoize<S>(supplier: S) -> S::Memoized
where
    S: Memoize,
{
    supplier.memoize()
}

/// Memoizes `supplier` for `time_to_live`, recomputing on the first call after it elapses.
///
/// A zero `time_to_live` recomputes on every call.
pub fn memoize_for<S>(supplier: S, time_to_live: Duration) -> Expiring<S>
where
    S: Supplier,
{
    Expiring::new(supplier, time_to_live)
}

/// Same as [`memoize_for()`] with the duration given in nanoseconds.
pub fn memoize_for_nanos<S>(supplier: S, nanos: u64) -> Expiring<S>
where
    S: Supplier,
{
    Expiring::from_nanos(supplier, nanos)
}
