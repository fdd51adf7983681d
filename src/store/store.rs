use crate::error::{Error, Result};
use crate::value::{State, Value};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

type Listener = Arc<dyn Fn(&State, &State) + Send + Sync>;

struct StoreInner {
    state: RwLock<Arc<State>>,
    initial: RwLock<Arc<State>>,
    listeners: RwLock<Vec<(usize, Listener)>>,
    next_listener: AtomicUsize,
}

/// A thread-safe reactive store holding a [`State`] record.
///
/// Writes are shallow merges: the fields of the partial record replace the
/// fields of the same name and everything else is left alone. Every write
/// notifies all listeners with the new and the previous state.
///
/// Handles are cheap to clone and all point at the same state.
///
/// # Examples
///
/// ```
/// use tincan_reset::{State, Store, Value};
///
/// let store = Store::create(|_| Ok(State::new().with("count", 0))).unwrap();
///
/// store.set_state(State::new().with("count", 5));
/// assert_eq!(store.get_state().get("count"), Some(&Value::Int(5)));
/// ```
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Create a store, letting `init` build the initial state.
    ///
    /// `init` runs exactly once, before this function returns. It receives the
    /// store handle itself so that behaviors can capture it (preferably as a
    /// [`WeakStore`]) and write to the store later. While `init` runs the
    /// store holds an empty state. Writes made from inside `init` still
    /// notify listeners, but are then replaced by the state `init` returns.
    pub fn create<F>(init: F) -> Result<Self>
    where
        F: FnOnce(&Store) -> Result<State>,
    {
        let store = Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Arc::new(State::new())),
                initial: RwLock::new(Arc::new(State::new())),
                listeners: RwLock::new(Vec::new()),
                next_listener: AtomicUsize::new(0),
            }),
        };

        let state = Arc::new(init(&store)?);
        *store.inner.initial.write() = Arc::clone(&state);
        *store.inner.state.write() = state;

        tracing::trace!(fields = store.inner.state.read().len(), "store created");
        Ok(store)
    }

    /// Get the current state.
    pub fn get_state(&self) -> Arc<State> {
        Arc::clone(&self.inner.state.read())
    }

    /// Get the state exactly as the initializer produced it.
    pub fn get_initial_state(&self) -> Arc<State> {
        Arc::clone(&self.inner.initial.read())
    }

    /// Read a single field of the current state.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.inner.state.read().get(name).cloned()
    }

    /// Read state without cloning the record.
    ///
    /// `f` sees the state as of the call and runs with no lock held, so it
    /// may write to the store.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&State) -> R,
    {
        let state = self.get_state();
        f(&state)
    }

    /// Shallow-merge `partial` into the current state.
    pub fn set_state(&self, partial: State) {
        self.write(|current| current.merged(partial));
    }

    /// Merge a partial record computed from the current state.
    ///
    /// Read and merge happen under the write lock, so concurrent updates are
    /// never lost. `f` must not touch the store itself or it deadlocks.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&State) -> State,
    {
        self.write(|current| current.merged(f(current)));
    }

    /// Replace the whole state.
    pub fn replace_state(&self, state: State) {
        self.write(|_| state);
    }

    fn write<F>(&self, f: F)
    where
        F: FnOnce(&State) -> State,
    {
        let (next, previous) = {
            let mut state = self.inner.state.write();
            let next = Arc::new(f(&state));
            let previous = std::mem::replace(&mut *state, Arc::clone(&next));
            (next, previous)
        };
        tracing::trace!(fields = next.len(), "store written");
        self.notify(&next, &previous);
    }

    /// Subscribe to state changes.
    ///
    /// The listener is called after every write with the new and the previous
    /// state. It stays registered until the returned [`Subscription`] is
    /// dropped.
    #[must_use = "dropping the subscription unsubscribes the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&State, &State) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener.fetch_add(1, Ordering::SeqCst);
        self.inner.listeners.write().push((id, Arc::new(listener)));
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.read().len()
    }

    // Locks are released before listeners run so they may write back.
    fn notify(&self, next: &State, previous: &State) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(next, previous);
        }
    }

    /// Invoke the behavior stored under `name`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<()> {
        let action = self
            .read(|state| state.action(name).cloned())
            .ok_or_else(|| Error::NotCallable {
                field: name.to_string(),
            })?;
        action.call(args).map_err(|source| Error::Action {
            field: name.to_string(),
            source: Box::new(source),
        })
    }

    /// Create a handle that does not keep the store alive.
    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Returns true if both handles refer to the same store.
    pub fn ptr_eq(&self, other: &Store) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state.read())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Non-owning store handle.
///
/// Behaviors stored inside a store's own state should capture this instead of
/// a [`Store`], otherwise the store keeps itself alive.
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<StoreInner>,
}

impl WeakStore {
    /// Get a strong handle if the store is still alive.
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

/// RAII guard for store listeners.
pub struct Subscription {
    id: usize,
    store: Weak<StoreInner>,
}

impl Subscription {
    /// Keep the listener registered for as long as the store lives.
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.write().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_store() -> Store {
        Store::create(|_| Ok(State::new().with("count", 0).with("name", "test"))).unwrap()
    }

    #[test]
    fn store_get_set() {
        let store = counter_store();

        assert_eq!(store.field("count"), Some(Value::Int(0)));

        store.set_state(State::new().with("count", 42));

        assert_eq!(store.field("count"), Some(Value::Int(42)));
        assert_eq!(store.field("name").as_ref().and_then(Value::as_str), Some("test"));
    }

    #[test]
    fn store_update() {
        let store = counter_store();

        store.update(|state| {
            let count = state.get("count").and_then(Value::as_i64).unwrap_or(0);
            State::new().with("count", count + 10)
        });

        assert_eq!(store.field("count"), Some(Value::Int(10)));
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let store = counter_store();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        store.update(|state| {
                            let count = state.get("count").and_then(Value::as_i64).unwrap_or(0);
                            State::new().with("count", count + 1)
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.field("count"), Some(Value::Int(4000)));
    }

    #[test]
    fn read_closure_may_write() {
        let store = counter_store();
        let seen = store.read(|state| {
            store.set_state(State::new().with("count", 7));
            state.get("count").cloned()
        });

        assert_eq!(seen, Some(Value::Int(0)));
        assert_eq!(store.field("count"), Some(Value::Int(7)));
    }

    #[test]
    fn initializer_writes_are_replaced() {
        let store = Store::create(|store| {
            store.set_state(State::new().with("count", 99));
            Ok(State::new().with("count", 0))
        })
        .unwrap();

        assert_eq!(store.field("count"), Some(Value::Int(0)));
    }

    #[test]
    fn store_replace_drops_missing_fields() {
        let store = counter_store();
        store.replace_state(State::new().with("other", true));

        assert_eq!(store.field("count"), None);
        assert_eq!(store.field("other"), Some(Value::Bool(true)));
        assert_eq!(store.get_initial_state().get("count"), Some(&Value::Int(0)));
    }

    #[test]
    fn store_subscribe() {
        let store = counter_store();

        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let _subscription = store.subscribe(move |next, previous| {
            assert_ne!(next.get("count"), previous.get("count"));
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(call_count.load(Ordering::SeqCst), 0);

        store.set_state(State::new().with("count", 1));
        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        store.set_state(State::new().with("count", 2));
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = counter_store();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let subscription = store.subscribe(move |_, _| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });
        store.set_state(State::new());
        drop(subscription);
        store.set_state(State::new());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn listener_can_write_back() {
        let store = counter_store();
        let weak = store.downgrade();

        store
            .subscribe(move |next, _| {
                if next.get("count") == Some(&Value::Int(1)) {
                    if let Some(store) = weak.upgrade() {
                        store.set_state(State::new().with("count", 2));
                    }
                }
            })
            .detach();

        store.set_state(State::new().with("count", 1));
        assert_eq!(store.field("count"), Some(Value::Int(2)));
    }

    #[test]
    fn initializer_error_propagates() {
        let err = Store::create(|_| Err(Error::callback("nope"))).unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn call_reports_missing_and_data_fields() {
        let store = counter_store();
        assert!(matches!(
            store.call("missing", &[]),
            Err(Error::NotCallable { field }) if field == "missing"
        ));
        assert!(matches!(
            store.call("count", &[]),
            Err(Error::NotCallable { .. })
        ));
    }

    #[test]
    fn weak_handle_does_not_keep_store_alive() {
        let store = counter_store();
        let weak = store.downgrade();
        assert!(weak.upgrade().is_some_and(|s| s.ptr_eq(&store)));
        drop(store);
        assert!(weak.upgrade().is_none());
    }
}
