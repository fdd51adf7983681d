//! # Tincan Reset
//!
//! Reactive stores that remember how they started.
//!
//! A store holds a record of named fields. Some fields are data, some are
//! behaviors (callable [`Action`]s). [`create_with_reset`] builds a store,
//! captures its initial data fields, and adds two behaviors to its state:
//!
//! - `resetStore()` - put every initial data field back
//! - `resetState(names...)` - put only the named fields back
//!
//! Both are ordinary state fields, so a store can supply its own versions.
//!
//! ```
//! use tincan_reset::{create_with_reset, State, Value};
//!
//! let store = create_with_reset(|store| {
//!     let weak = store.downgrade();
//!     Ok(State::new()
//!         .with("count", 0)
//!         .with_action("increment", move |_| {
//!             if let Some(store) = weak.upgrade() {
//!                 store.update(|s| {
//!                     let count = s.get("count").and_then(Value::as_i64).unwrap_or(0);
//!                     State::new().with("count", count + 1)
//!                 });
//!             }
//!         })
//!         .into())
//! })
//! .unwrap();
//!
//! store.call("increment", &[]).unwrap();
//! assert_eq!(store.field("count"), Some(Value::Int(1)));
//!
//! store.reset_store().unwrap();
//! assert_eq!(store.field("count"), Some(Value::Int(0)));
//! ```

pub mod error;
pub mod reset;
pub mod store;
pub mod value;

// Re-export main types for convenience
pub use error::{BoxError, Error, Result};
pub use reset::{create_with_reset, InitialSnapshot, KeySet, RESET_STATE, RESET_STORE};
pub use store::{Store, Subscription, WeakStore};
pub use value::{Action, State, Value};
