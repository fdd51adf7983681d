use crate::value::{State, Value};

/// The data fields of a store captured at construction time.
///
/// Values are captured by reference: a list or object field is restored as
/// the very same allocation, not as a copy. The key set never changes after
/// capture.
#[derive(Clone, Debug, Default)]
pub struct InitialSnapshot {
    fields: State,
}

impl InitialSnapshot {
    /// Capture every non-callable field of `raw`, except the names in `skip`.
    pub fn capture(raw: &State, skip: &[&str]) -> Self {
        Self {
            fields: raw
                .data_fields()
                .filter(|(name, _)| !skip.contains(name))
                .map(|(name, value)| (name, value.clone()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }

    /// A partial record restoring every captured field.
    pub fn to_partial(&self) -> State {
        self.fields.clone()
    }

    /// A partial record restoring only the named fields.
    ///
    /// Names that were not captured are skipped. Duplicates collapse.
    pub fn select<'a, I>(&self, names: I) -> State
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter_map(|name| self.get(name).map(|value| (name, value.clone())))
            .collect()
    }
}
