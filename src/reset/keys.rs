use crate::value::Value;
use std::sync::Arc;

/// One field name or a list of field names.
///
/// `resetState` accepts any sequence of these and treats them as one flat
/// list, so `["a", "b"]`, `[vec!["a", "b"]]` and a mix of both name the
/// same fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySet {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for KeySet {
    fn from(name: &str) -> Self {
        KeySet::One(name.to_string())
    }
}

impl From<String> for KeySet {
    fn from(name: String) -> Self {
        KeySet::One(name)
    }
}

impl From<Vec<String>> for KeySet {
    fn from(names: Vec<String>) -> Self {
        KeySet::Many(names)
    }
}

impl From<Vec<&str>> for KeySet {
    fn from(names: Vec<&str>) -> Self {
        KeySet::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for KeySet {
    fn from(names: &[&str]) -> Self {
        KeySet::Many(names.iter().map(|name| name.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeySet {
    fn from(names: [&str; N]) -> Self {
        KeySet::Many(names.iter().map(|name| name.to_string()).collect())
    }
}

impl From<KeySet> for Value {
    fn from(keys: KeySet) -> Self {
        match keys {
            KeySet::One(name) => Value::from(name),
            KeySet::Many(names) => {
                Value::from(names.into_iter().map(Value::from).collect::<Vec<_>>())
            }
        }
    }
}

/// Flatten `resetState` arguments into field names.
///
/// Strings name a field and lists contribute their string elements. Anything
/// else cannot name a field and is dropped.
pub(crate) fn flatten_names(args: &[Value]) -> Vec<Arc<str>> {
    let mut names = Vec::new();
    for arg in args {
        match arg {
            Value::Str(name) => names.push(Arc::clone(name)),
            Value::List(items) => names.extend(items.iter().filter_map(|item| match item {
                Value::Str(name) => Some(Arc::clone(name)),
                _ => None,
            })),
            _ => {}
        }
    }
    names
}
