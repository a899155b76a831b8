#![doc = include_str!("../README.md")]
pub mod bind;
pub mod clock;
pub mod error;
pub mod memo;
#[cfg(test)]
mod test;

pub use self::bind::{bind_to, Bound};
pub use self::clock::{Clock, Instant, MonotonicClock};
pub use self::error::{Error, Result};
pub use self::memo::{
    memoize, memoize_for, memoize_for_nanos, Expiring, Memo, MemoBuilder, MemoConfig, Memoize,
    Memoized,
};

/// A zero-argument computation producing a value or an error.
///
/// Every closure of the shape `Fn() -> Result<R, E>` is a [`Supplier`], and so is every
/// memoizing wrapper in this crate, which lets wrappers stand in for the computation they wrap.
pub trait Supplier {
    type Output;
    type Error;

    fn get(&self) -> core::result::Result<Self::Output, Self::Error>;
}

impl<F, R, E> Supplier for F
where
    F: Fn() -> core::result::Result<R, E>,
{
    type Output = R;
    type Error = E;

    fn get(&self) -> core::result::Result<R, E> {
        self()
    }
}
