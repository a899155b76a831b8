//! Binding a function's leading argument to a [`Supplier`].
use crate::memo::{Memoize, Memoized};
use crate::Supplier;

/// A function whose first argument is produced by a [`Supplier`] on every call.
///
/// Nothing is cached: each call runs the supplier again. Memoize the supplier (or the bound
/// function) when that is not wanted.
#[derive(Clone, Debug)]
pub struct Bound<F, S> {
    f: F,
    supplier: S,
}

/// Returns `f` with its first argument supplied by `supplier.get()`, evaluated fresh per call.
///
/// ```
/// use suppliers::{bind_to, Supplier};
///
/// let greeting = bind_to(|name: &str| format!("hello, {name}"), || Ok::<_, std::io::Error>("world"));
/// assert_eq!(greeting.get().unwrap(), "hello, world");
/// ```
pub fn bind_to<F, S>(f: F, supplier: S) -> Bound<F, S>
where
    S: Supplier,
{
    Bound { f, supplier }
}

impl<F, S> Bound<F, S>
where
    S: Supplier,
{
    /// Calls the bound function with a fresh leading argument followed by `args`.
    pub fn call<A, O>(&self, args: A) -> Result<O, S::Error>
    where
        F: Fn(S::Output, A) -> O,
    {
        let leading = self.supplier.get()?;
        Ok((self.f)(leading, args))
    }

    /// Takes the binding apart, giving back the function and the supplier of its first argument.
    pub fn into_parts(self) -> (F, S) {
        (self.f, self.supplier)
    }
}

impl<F, S, O> Supplier for Bound<F, S>
where
    S: Supplier,
    F: Fn(S::Output) -> O,
{
    type Output = O;
    type Error = S::Error;

    fn get(&self) -> Result<O, S::Error> {
        self.supplier.get().map(&self.f)
    }
}

impl<F, S, O> Memoize for Bound<F, S>
where
    S: Supplier,
    F: Fn(S::Output) -> O,
    O: Clone,
{
    type Memoized = Memoized<Self>;

    fn memoize(self) -> Self::Memoized {
        Memoized::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memoize;
    use crate::test::{Counter, Failure};
    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::wasm_bindgen_test;

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn test_bound_supplier_is_evaluated_every_call() {
        let counter = Counter::default();
        let bound = bind_to(|n: usize| n.to_string(), counter.supplier());
        assert_eq!(bound.get().as_deref(), Ok("0"));
        assert_eq!(bound.get().as_deref(), Ok("1"));
        assert_eq!(counter.calls(), 2);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn test_call_with_trailing_arguments() {
        let counter = Counter::default();
        let bound = bind_to(|n: usize, (a, b): (usize, usize)| n * a + b, counter.supplier());
        assert_eq!(bound.call((10, 1)), Ok(1));
        assert_eq!(bound.call((10, 1)), Ok(11));
        assert_eq!(bound.call((100, 0)), Ok(200));
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn test_supplier_error_propagates() {
        let counter = Counter::default();
        let calls = std::cell::Cell::new(0);
        let bound = bind_to(
            |n: usize| {
                calls.set(calls.get() + 1);
                n
            },
            counter.failing(1),
        );
        assert_eq!(bound.get(), Err(Failure(0)));
        assert_eq!(calls.get(), 0);
        assert_eq!(bound.get(), Ok(1));
        assert_eq!(calls.get(), 1);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn test_bound_to_memoized_supplier() {
        let counter = Counter::default();
        let bound = bind_to(|n: usize| n + 1, memoize(counter.supplier()));
        assert_eq!(bound.get(), Ok(1));
        assert_eq!(bound.get(), Ok(1));
        assert_eq!(counter.calls(), 1);

        let memoized = memoize(bind_to(|n: usize| n * 2, counter.supplier()));
        assert_eq!(memoized.get(), Ok(2));
        assert_eq!(memoized.get(), Ok(2));
        assert_eq!(counter.calls(), 2);

        let (_, supplier) = bind_to(|n: usize| n, counter.supplier()).into_parts();
        assert_eq!(supplier.get(), Ok(2));
    }
}
