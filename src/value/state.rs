use crate::value::{Action, Value};
use indexmap::IndexMap;

/// An insertion-ordered record of named fields.
///
/// Used both for the whole state of a store and for the partial records
/// passed to merge writes.
///
/// # Examples
///
/// ```
/// use tincan_reset::{State, Value};
///
/// let state = State::new()
///     .with("count", 0)
///     .with_action("noop", |_| {});
///
/// assert_eq!(state.get("count"), Some(&Value::Int(0)));
/// assert_eq!(state.data_fields().count(), 1);
/// assert_eq!(state.behavior_fields().count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    fields: IndexMap<String, Value>,
}

impl State {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder-style insert of an infallible behavior.
    pub fn with_action<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.with(name, Action::infallible(func))
    }

    /// Insert or overwrite a field, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The field under `name` if it holds an action.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.get(name).and_then(Value::as_action)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Fields whose value is not callable.
    pub fn data_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(_, value)| !value.is_callable())
    }

    /// Fields whose value is callable.
    pub fn behavior_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(_, value)| value.is_callable())
    }

    /// Shallow overlay: every field of `partial` replaces the field of the
    /// same name, other fields are left as they are. New names are appended.
    pub fn merge(&mut self, partial: State) {
        for (name, value) in partial.fields {
            self.fields.insert(name, value);
        }
    }

    /// Merge into a copy, leaving `self` untouched.
    pub fn merged(&self, partial: State) -> State {
        let mut next = self.clone();
        next.merge(partial);
        next
    }
}

impl<K, V> FromIterator<(K, V)> for State
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for State {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_shallow_overlay() {
        let mut state = State::new().with("a", 1).with("b", 2);
        state.merge(State::new().with("b", 20).with("c", 30));

        assert_eq!(state.get("a"), Some(&Value::Int(1)));
        assert_eq!(state.get("b"), Some(&Value::Int(20)));
        assert_eq!(state.get("c"), Some(&Value::Int(30)));
        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn merge_empty_partial_keeps_everything() {
        let state = State::new().with("a", 1);
        assert_eq!(state.merged(State::new()), state);
    }

    #[test]
    fn partition_by_callability() {
        let state = State::new()
            .with("count", 0)
            .with("name", Value::Null)
            .with_action("increment", |_| {});

        let data: Vec<_> = state.data_fields().map(|(name, _)| name).collect();
        let behaviors: Vec<_> = state.behavior_fields().map(|(name, _)| name).collect();
        assert_eq!(data, vec!["count", "name"]);
        assert_eq!(behaviors, vec!["increment"]);
        assert!(state.action("increment").is_some());
        assert!(state.action("count").is_none());
    }

    #[test]
    fn collects_from_pairs() {
        let state: State = [("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(state.len(), 2);
        assert_eq!(state.get("y").and_then(Value::as_i64), Some(2));
    }
}
