use crate::error::{Error, Result};
use crate::reset::keys::{flatten_names, KeySet};
use crate::reset::InitialSnapshot;
use crate::store::{Store, WeakStore};
use crate::value::{Action, State, Value};
use std::sync::Arc;

/// Field holding the reset-everything behavior.
pub const RESET_STORE: &str = "resetStore";

/// Field holding the reset-named-fields behavior.
pub const RESET_STATE: &str = "resetState";

/// Create a store whose state can be reset to its initial values.
///
/// `initializer` runs once with the new store handle and must return an
/// object. Its non-callable fields are captured as the initial snapshot, and
/// two behaviors are added to the state:
///
/// - `resetStore()` writes every captured field back in one merge.
/// - `resetState(names...)` writes back only the named fields. Each argument
///   is a field name or a list of names. Unknown names are ignored.
///
/// If the initializer already defines a callable under either name, that
/// callable is kept and the default is never built.
///
/// # Errors
///
/// Returns [`Error::Initialization`] if the initializer fails, and
/// [`Error::InvalidStateShape`] if it returns anything but an object.
///
/// # Examples
///
/// ```
/// use tincan_reset::{create_with_reset, State, Value};
///
/// let store = create_with_reset(|_| {
///     Ok(State::new().with("count", 0).with("secondaryCount", 10).into())
/// })
/// .unwrap();
///
/// store.set_state(State::new().with("count", 2).with("secondaryCount", 15));
/// store.reset_state(["count"]).unwrap();
/// assert_eq!(store.field("count"), Some(Value::Int(0)));
/// assert_eq!(store.field("secondaryCount"), Some(Value::Int(15)));
///
/// store.reset_store().unwrap();
/// assert_eq!(store.field("secondaryCount"), Some(Value::Int(10)));
/// ```
pub fn create_with_reset<F>(initializer: F) -> Result<Store>
where
    F: FnOnce(&Store) -> Result<Value>,
{
    Store::create(|store| {
        let raw = match initializer(store) {
            Ok(Value::Object(state)) => {
                Arc::try_unwrap(state).unwrap_or_else(|shared| (*shared).clone())
            }
            Ok(other) => {
                return Err(Error::InvalidStateShape {
                    found: other.kind(),
                })
            }
            Err(err) => return Err(Error::Initialization(Box::new(err))),
        };
        Ok(with_resets(raw, store.downgrade()))
    })
}

fn with_resets(mut raw: State, store: WeakStore) -> State {
    let keep_reset_store = raw.action(RESET_STORE).is_some();
    let keep_reset_state = raw.action(RESET_STATE).is_some();

    // Reserved names that get a default no longer hold data after construction.
    let injected: Vec<&str> = [
        (RESET_STORE, keep_reset_store),
        (RESET_STATE, keep_reset_state),
    ]
    .into_iter()
    .filter(|(_, keep)| !keep)
    .map(|(name, _)| name)
    .collect();

    let snapshot = Arc::new(InitialSnapshot::capture(&raw, &injected));
    tracing::debug!(
        data = snapshot.len(),
        behaviors = raw.behavior_fields().count(),
        "captured initial snapshot"
    );

    let mut defaults = State::new();
    if keep_reset_store {
        tracing::trace!("keeping caller-provided {RESET_STORE}");
    } else {
        defaults.insert(
            RESET_STORE,
            default_reset_store(Arc::clone(&snapshot), store.clone()),
        );
    }
    if keep_reset_state {
        tracing::trace!("keeping caller-provided {RESET_STATE}");
    } else {
        defaults.insert(RESET_STATE, default_reset_state(snapshot, store));
    }

    // `defaults` only holds names the caller did not make callable.
    raw.merge(defaults);
    raw
}

fn default_reset_store(snapshot: Arc<InitialSnapshot>, store: WeakStore) -> Action {
    Action::infallible(move |_| {
        let Some(store) = store.upgrade() else {
            return;
        };
        tracing::debug!(fields = snapshot.len(), "resetting store");
        store.set_state(snapshot.to_partial());
    })
}

fn default_reset_state(snapshot: Arc<InitialSnapshot>, store: WeakStore) -> Action {
    Action::infallible(move |args| {
        let Some(store) = store.upgrade() else {
            return;
        };
        let names = flatten_names(args);
        let partial = snapshot.select(names.iter().map(|name| &**name));
        if partial.is_empty() {
            tracing::trace!("no captured field named in resetState call");
        }
        tracing::debug!(
            requested = names.len(),
            staged = partial.len(),
            "resetting fields"
        );
        store.set_state(partial);
    })
}

impl Store {
    /// Invoke the state's `resetStore` behavior.
    pub fn reset_store(&self) -> Result<()> {
        self.call(RESET_STORE, &[])
    }

    /// Invoke the state's `resetState` behavior with the given names.
    ///
    /// ```
    /// use tincan_reset::{create_with_reset, KeySet, State};
    ///
    /// let store = create_with_reset(|_| {
    ///     Ok(State::new().with("a", 1).with("b", 2).with("c", 3).into())
    /// })
    /// .unwrap();
    ///
    /// store.reset_state(["a", "b"]).unwrap();
    /// store.reset_state([vec!["a", "b"]]).unwrap();
    /// store.reset_state([KeySet::from("a"), KeySet::from(["b"])]).unwrap();
    /// ```
    pub fn reset_state<I>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<KeySet>,
    {
        let args: Vec<Value> = keys
            .into_iter()
            .map(|keys| Value::from(keys.into()))
            .collect();
        self.call(RESET_STATE, &args)
    }
}
