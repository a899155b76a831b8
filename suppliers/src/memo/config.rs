use super::{Expiring, Memoize, Memoized};
use crate::error::{Error, Result};
use crate::Supplier;
use std::fmt;
use std::time::Duration;

/// Chooses how long a memoized value lives.
///
/// Without a `time_to_live` the value is kept forever.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MemoConfig {
    #[cfg_attr(feature = "serde", serde(with = "humantime_serde"))]
    pub time_to_live: Option<Duration>,
}

impl MemoConfig {
    pub fn permanent() -> Self {
        Self::default()
    }

    pub fn expiring(time_to_live: Duration) -> Self {
        Self { time_to_live: Some(time_to_live) }
    }

    /// Wraps `supplier` in the memo this config describes.
    pub fn memoize<S>(&self, supplier: S) -> Memo<S>
    where
        S: Supplier,
    {
        match self.time_to_live {
            Some(time_to_live) => Memo::Expiring(Expiring::new(supplier, time_to_live)),
            None => Memo::Permanent(Memoized::new(supplier)),
        }
    }
}

/// A memoized [`Supplier`] whose flavor was picked at runtime, usually from a [`MemoConfig`].
pub enum Memo<S>
where
    S: Supplier,
{
    Permanent(Memoized<S>),
    Expiring(Expiring<S>),
}

impl<S> Memo<S>
where
    S: Supplier,
{
    pub fn builder() -> MemoBuilder<S> {
        MemoBuilder::new()
    }

    pub fn time_to_live(&self) -> Option<Duration> {
        match self {
            Self::Permanent(_) => None,
            Self::Expiring(expiring) => Some(expiring.time_to_live()),
        }
    }
}

impl<S> Clone for Memo<S>
where
    S: Supplier,
{
    fn clone(&self) -> Self {
        match self {
            Self::Permanent(memoized) => Self::Permanent(memoized.clone()),
            Self::Expiring(expiring) => Self::Expiring(expiring.clone()),
        }
    }
}

impl<S> fmt::Debug for Memo<S>
where
    S: Supplier,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permanent(memoized) => f.debug_tuple("Permanent").field(memoized).finish(),
            Self::Expiring(expiring) => f.debug_tuple("Expiring").field(expiring).finish(),
        }
    }
}

impl<S> Supplier for Memo<S>
where
    S: Supplier,
    S::Output: Clone,
{
    type Output = S::Output;
    type Error = S::Error;

    fn get(&self) -> core::result::Result<Self::Output, Self::Error> {
        match self {
            Self::Permanent(memoized) => memoized.get(),
            Self::Expiring(expiring) => expiring.get(),
        }
    }
}

impl<S> Memoize for Memo<S>
where
    S: Supplier,
    S::Output: Clone,
{
    type Memoized = Self;

    fn memoize(self) -> Self {
        self
    }
}

/// Builds a [`Memo`] step by step.
///
/// ```
/// use std::time::Duration;
/// use suppliers::{Memo, Supplier};
///
/// let memo = Memo::builder()
///     .supplier(|| Ok::<_, std::io::Error>(7))
///     .time_to_live(Duration::from_secs(30))
///     .build()
///     .expect("supplier is set");
/// assert_eq!(memo.get().unwrap(), 7);
/// ```
pub struct MemoBuilder<S> {
    supplier: Option<S>,
    config: MemoConfig,
}

impl<S> Default for MemoBuilder<S> {
    fn default() -> Self {
        Self { supplier: None, config: MemoConfig::default() }
    }
}

impl<S> MemoBuilder<S>
where
    S: Supplier,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supplier(mut self, supplier: S) -> Self {
        self.supplier = Some(supplier);
        self
    }

    pub fn time_to_live(mut self, time_to_live: Duration) -> Self {
        self.config.time_to_live = Some(time_to_live);
        self
    }

    pub fn time_to_live_nanos(self, nanos: u64) -> Self {
        self.time_to_live(Duration::from_nanos(nanos))
    }

    /// Replaces everything set so far except the supplier.
    pub fn config(mut self, config: MemoConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds a permanent or expiring memo depending on whether a time to live was set.
    ///
    /// Fails with [`Error::InvalidArgument`] when no supplier was given.
    pub fn build(self) -> Result<Memo<S>> {
        let supplier = self.supplier.ok_or(Error::InvalidArgument("supplier"))?;
        Ok(self.config.memoize(supplier))
    }

    /// Builds an expiring memo, failing with `InvalidArgument("duration")` when no time to live
    /// was set and `InvalidArgument("supplier")` when no supplier was.
    pub fn build_expiring(self) -> Result<Expiring<S>> {
        let supplier = self.supplier.ok_or(Error::InvalidArgument("supplier"))?;
        let time_to_live = self.config.time_to_live.ok_or(Error::InvalidArgument("duration"))?;
        Ok(Expiring::new(supplier, time_to_live))
    }
}
