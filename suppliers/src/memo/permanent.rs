use super::Memoize;
use crate::Supplier;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// A [`Supplier`] that computes its value once and returns it forever after.
///
/// The first call to [`get()`](Supplier::get) runs the wrapped supplier while holding the
/// cell's lock, so concurrent first callers wait for it and then share its value. Once a value
/// is stored, reads don't lock.
///
/// An error is returned to the caller as-is and leaves the cell empty: the next call runs the
/// wrapped supplier again. Callers that were waiting behind a failed attempt make their own.
///
/// Clones share the same cell.
pub struct Memoized<S>
where
    S: Supplier,
{
    inner: Arc<Inner<S>>,
}

struct Inner<S>
where
    S: Supplier,
{
    supplier: S,
    value: OnceCell<S::Output>,
}

impl<S> Memoized<S>
where
    S: Supplier,
{
    pub fn new(supplier: S) -> Self {
        Self { inner: Arc::new(Inner { supplier, value: OnceCell::new() }) }
    }
    /// Whether a value has been computed and stored.
    pub fn is_computed(&self) -> bool {
        self.inner.value.get().is_some()
    }
    /// Whether both handles share one cache.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }
}

impl<S> Clone for Memoized<S>
where
    S: Supplier,
{
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S> fmt::Debug for Memoized<S>
where
    S: Supplier,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized").field("computed", &self.is_computed()).finish_non_exhaustive()
    }
}

impl<S> Supplier for Memoized<S>
where
    S: Supplier,
    S::Output: Clone,
{
    type Output = S::Output;
    type Error = S::Error;

    fn get(&self) -> Result<Self::Output, Self::Error> {
        self.inner
            .value
            .get_or_try_init(|| {
                tracing::debug!("computing memoized value");
                self.inner.supplier.get().map_err(|error| {
                    tracing::debug!("memoized computation failed, retrying on next call");
                    error
                })
            })
            .cloned()
    }
}

impl<S> Memoize for Memoized<S>
where
    S: Supplier,
    S::Output: Clone,
{
    type Memoized = Self;

    fn memoize(self) -> Self {
        self
    }
}
