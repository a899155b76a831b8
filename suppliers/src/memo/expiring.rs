use super::Memoize;
use crate::clock::{Clock, Instant, MonotonicClock};
use crate::Supplier;
use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A [`Supplier`] that caches its value for a fixed duration.
///
/// The value and its deadline are published together as one atomically swapped entry, so a
/// reader never pairs a value with a deadline from another computation and a cache hit takes no
/// lock. When the entry has expired, one caller recomputes it while holding the refresh lock;
/// callers that were waiting on the lock find the entry already replaced and return the new
/// value. An instant equal to the deadline counts as
/// expired.
///
/// A failed recomputation returns the error as-is and leaves the previous entry in place. That
/// entry is expired, so the next call recomputes again.
///
/// Clones share the same entry.
pub struct Expiring<S, C = MonotonicClock>
where
    S: Supplier,
{
    inner: Arc<Inner<S, C>>,
}

struct Inner<S, C>
where
    S: Supplier,
{
    supplier: S,
    time_to_live: Duration,
    clock: C,
    entry: ArcSwapOption<Entry<S::Output>>,
    refresh: Mutex<()>,
}

struct Entry<T> {
    value: T,
    // `None` when the deadline does not fit in an `Instant`.
    expires_at: Option<Instant>,
}

impl<T> Entry<T> {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

impl<S> Expiring<S>
where
    S: Supplier,
{
    pub fn new(supplier: S, time_to_live: Duration) -> Self {
        Self::with_clock(supplier, time_to_live, MonotonicClock)
    }
    pub fn from_nanos(supplier: S, nanos: u64) -> Self {
        Self::new(supplier, Duration::from_nanos(nanos))
    }
}

impl<S, C> Expiring<S, C>
where
    S: Supplier,
{
    pub fn with_clock(supplier: S, time_to_live: Duration, clock: C) -> Self {
        Self {
            inner: Arc::new(Inner {
                supplier,
                time_to_live,
                clock,
                entry: ArcSwapOption::empty(),
                refresh: Mutex::new(()),
            }),
        }
    }
    pub fn time_to_live(&self) -> Duration {
        self.inner.time_to_live
    }
    /// Whether both handles share one cache.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }
    fn load(&self) -> Option<Arc<Entry<S::Output>>> {
        self.inner.entry.load_full()
    }
    fn store(&self, entry: Entry<S::Output>) {
        self.inner.entry.store(Some(Arc::new(entry)));
    }
}

impl<S, C> Clone for Expiring<S, C>
where
    S: Supplier,
{
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S, C> fmt::Debug for Expiring<S, C>
where
    S: Supplier,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expiring")
            .field("time_to_live", &self.inner.time_to_live)
            .field("expires_at", &self.load().map(|entry| entry.expires_at))
            .finish_non_exhaustive()
    }
}

impl<S, C> Supplier for Expiring<S, C>
where
    S: Supplier,
    S::Output: Clone,
    C: Clock,
{
    type Output = S::Output;
    type Error = S::Error;

    fn get(&self) -> Result<Self::Output, Self::Error> {
        let observed = self.load();
        let now = self.inner.clock.now();
        if let Some(entry) = observed.as_deref().filter(|entry| entry.is_fresh(now)) {
            return Ok(entry.value.clone());
        }

        let _guard = self.inner.refresh.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = self.load() {
            if !observed.as_ref().is_some_and(|observed| Arc::ptr_eq(observed, &current)) {
                tracing::trace!("expiring value refreshed by a concurrent caller");
                return Ok(current.value.clone());
            }
        }

        tracing::debug!(time_to_live = ?self.inner.time_to_live, "computing expiring value");
        let value = self.inner.supplier.get().map_err(|error| {
            tracing::debug!("expiring computation failed, retrying on next call");
            error
        })?;
        self.store(Entry {
            value: value.clone(),
            expires_at: now.checked_add(self.inner.time_to_live),
        });
        Ok(value)
    }
}

impl<S, C> Memoize for Expiring<S, C>
where
    S: Supplier,
    S::Output: Clone,
    C: Clock,
{
    type Memoized = Self;

    fn memoize(self) -> Self {
        self
    }
}
