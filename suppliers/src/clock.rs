//! Time sources for expiring memoizers.
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

/// A monotonic source of [`Instant`]s.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The platform's monotonic clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C> Clock for &C
where
    C: Clock + ?Sized,
{
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C> Clock for std::sync::Arc<C>
where
    C: Clock + ?Sized,
{
    fn now(&self) -> Instant {
        (**self).now()
    }
}
