//! Dynamic values held in store state.
//!
//! State is a record of named fields. Each field holds a [`Value`]: either
//! plain data or an [`Action`], a callable behavior. Cloning a value never
//! deep-copies: strings, lists, objects and actions are shared by reference.

mod state;
mod value;

pub use state::State;
pub use value::{Action, Value};
