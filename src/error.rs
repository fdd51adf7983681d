//! Error types for store construction and behavior dispatch.

use thiserror::Error;

/// Boxed error produced by caller-supplied code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by stores and their behaviors.
#[derive(Debug, Error)]
pub enum Error {
    /// The initializer passed to store construction failed.
    #[error("store initializer failed: {0}")]
    Initialization(#[source] BoxError),

    /// The initializer returned something other than an object.
    #[error("store initializer must return an object, got {found}")]
    InvalidStateShape { found: &'static str },

    /// A behavior field was invoked and returned an error.
    #[error("behavior `{field}` failed")]
    Action {
        field: String,
        #[source]
        source: Box<Error>,
    },

    /// The named field is missing or is not callable.
    #[error("field `{field}` is not callable")]
    NotCallable { field: String },

    /// Error returned from a caller-supplied action closure.
    #[error(transparent)]
    Callback(BoxError),
}

impl Error {
    /// Wrap an arbitrary error coming out of user code.
    pub fn callback<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Callback(err.into())
    }
}
