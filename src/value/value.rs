use crate::error::Result;
use crate::value::State;
use std::fmt;
use std::sync::Arc;

type ActionFn = dyn Fn(&[Value]) -> Result<()> + Send + Sync;

/// A callable behavior stored in a state field.
///
/// Actions are shared by reference: cloning one yields a handle to the same
/// closure, and two actions compare equal only if they are the same closure.
#[derive(Clone)]
pub struct Action {
    func: Arc<ActionFn>,
}

impl Action {
    /// Create an action from a fallible closure.
    ///
    /// # Examples
    ///
    /// ```
    /// use tincan_reset::{Action, Value};
    ///
    /// let greet = Action::new(|args| {
    ///     assert_eq!(args.len(), 1);
    ///     Ok(())
    /// });
    /// greet.call(&[Value::from("hi")]).unwrap();
    /// ```
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Create an action from a closure that cannot fail.
    pub fn infallible<F>(func: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        Self::new(move |args| {
            func(args);
            Ok(())
        })
    }

    /// Invoke the action with the given arguments.
    pub fn call(&self, args: &[Value]) -> Result<()> {
        (self.func)(args)
    }

    /// Returns true if both handles point at the same closure.
    pub fn ptr_eq(&self, other: &Action) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action({:p})", Arc::as_ptr(&self.func) as *const ())
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// A dynamically typed field value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Arc<Vec<Value>>),
    Object(Arc<State>),
    Action(Action),
}

impl Value {
    /// Returns true if this value is a behavior rather than data.
    ///
    /// This is the only predicate used to split state into data and
    /// behavior fields.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Action(_))
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Identity comparison.
    ///
    /// Scalars compare by value. Strings, lists, objects and actions compare
    /// by the reference they share, so a structurally equal copy is not the
    /// same value.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Action(a), Value::Action(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Action(_) => "action",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&State> {
        match self {
            Value::Object(state) => Some(&**state),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&Action> {
        match self {
            Value::Action(action) => Some(action),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Action(a), Value::Action(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(Arc::new(value))
    }
}

impl From<State> for Value {
    fn from(value: State) -> Self {
        Value::Object(Arc::new(value))
    }
}

impl From<Arc<State>> for Value {
    fn from(value: Arc<State>) -> Self {
        Value::Object(value)
    }
}

impl From<Action> for Value {
    fn from(value: Action) -> Self {
        Value::Action(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
