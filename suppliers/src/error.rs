use thiserror::Error;

/// Errors raised while constructing a memoizer.
///
/// Failures of the wrapped computation are never translated into this type: a memoizer returns
/// its supplier's own `Error` unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {0} must be provided")]
    InvalidArgument(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
