//! The reactive store engine.
//!
//! A [`Store`] holds a [`State`](crate::State) record, applies shallow-merge
//! writes and notifies listeners after each write. It is the primitive that
//! [`create_with_reset`](crate::create_with_reset) builds on.

mod store;

pub use store::{Store, Subscription, WeakStore};
