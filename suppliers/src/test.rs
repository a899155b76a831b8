//! Helpers shared by the unit tests.
use crate::clock::{Clock, Instant};
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// Installs a `tracing` subscriber that writes through the test harness, once per process.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn setup() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn setup() {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("computation failed on attempt {0}")]
pub(crate) struct Failure(pub(crate) usize);

/// Counts attempts across every supplier it hands out; each attempt yields its own index.
#[derive(Clone, Default)]
pub(crate) struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub(crate) fn calls(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
    fn next(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
    pub(crate) fn supplier(
        &self,
    ) -> impl Fn() -> Result<usize, Infallible> + Clone + Send + Sync + 'static {
        let counter = self.clone();
        move || Ok(counter.next())
    }
    /// Fails the first `failures` attempts.
    pub(crate) fn failing(
        &self,
        failures: usize,
    ) -> impl Fn() -> Result<usize, Failure> + Clone + Send + Sync + 'static {
        let counter = self.clone();
        move || match counter.next() {
            attempt if attempt < failures => Err(Failure(attempt)),
            attempt => Ok(attempt),
        }
    }
    /// Fails only the attempt numbered `failure`.
    pub(crate) fn failing_at(
        &self,
        failure: usize,
    ) -> impl Fn() -> Result<usize, Failure> + Clone + Send + Sync + 'static {
        let counter = self.clone();
        move || match counter.next() {
            attempt if attempt == failure => Err(Failure(attempt)),
            attempt => Ok(attempt),
        }
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub(crate) struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self { origin: Instant::now(), elapsed: Mutex::new(Duration::ZERO) }
    }
}

impl ManualClock {
    pub(crate) fn advance(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock().unwrap()
    }
}
