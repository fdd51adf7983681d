//! Stores that can reset themselves to their initial state.
//!
//! [`create_with_reset`] wraps [`Store::create`](crate::Store::create): it
//! captures the initial data fields and adds `resetStore` and `resetState`
//! behaviors to the state.

mod factory;
mod keys;
mod snapshot;

pub use factory::{create_with_reset, RESET_STATE, RESET_STORE};
pub use keys::KeySet;
pub use snapshot::InitialSnapshot;
