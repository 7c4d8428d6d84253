//! Actions carried by transition records and entry/exit lists.

use crate::core::guard::Guard;
use crate::core::node::Delay;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Wire `type` tag of state-mutation actions.
pub const ASSIGN_TYPE: &str = "xstate.assign";
/// Wire `type` tag of send actions.
pub const SEND_TYPE: &str = "xstate.send";
/// Wire `type` tag of choose actions.
pub const CHOOSE_TYPE: &str = "xstate.choose";
/// Wire `type` tag of pure actions.
pub const PURE_TYPE: &str = "xstate.pure";

/// Type alias for side-effecting functions over `(context, event)`.
pub type EffectFn = dyn Fn(&Value, &Value) + Send + Sync;

/// Type alias for value-computing functions over `(context, event)`.
pub type ExprFn = dyn Fn(&Value, &Value) -> Value + Send + Sync;

/// Type alias for action-producing functions over `(context, event)`.
pub type PureFn = dyn Fn(&Value, &Value) -> Vec<Action> + Send + Sync;

macro_rules! named_fn {
    ($(#[$meta:meta])* $name:ident, $alias:ty) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            name: String,
            func: Arc<$alias>,
        }

        impl $name {
            pub fn name(&self) -> &str {
                &self.name
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("name", &self.name)
                    .finish()
            }
        }

        // Functions compare by identity: clones are equal, rebuilt closures are not.
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.name == other.name && Arc::ptr_eq(&self.func, &other.func)
            }
        }
    };
}

named_fn!(
    /// Inline executable action.
    Effect,
    EffectFn
);

named_fn!(
    /// Function computing a value from `(context, event)`.
    Expr,
    ExprFn
);

named_fn!(
    /// Function computing the actions to run from `(context, event)`.
    PureAction,
    PureFn
);

impl Effect {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value, &Value) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn exec(&self, context: &Value, event: &Value) {
        (self.func)(context, event)
    }
}

impl Expr {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value, &Value) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn eval(&self, context: &Value, event: &Value) -> Value {
        (self.func)(context, event)
    }
}

impl PureAction {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value, &Value) -> Vec<Action> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn resolve(&self, context: &Value, event: &Value) -> Vec<Action> {
        (self.func)(context, event)
    }
}

/// Functions are referenced on the wire by name only.
fn serialize_fn_ref<S: Serializer>(name: &str, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("type", name)?;
    map.end()
}

impl Serialize for Effect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_fn_ref(&self.name, serializer)
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_fn_ref(&self.name, serializer)
    }
}

/// One property of a property mapping: a literal or a computed value.
#[derive(Clone, Debug, PartialEq)]
pub enum AssignValue {
    Value(Value),
    Expr(Expr),
}

impl From<Value> for AssignValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Expr> for AssignValue {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl Serialize for AssignValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Expr(expr) => expr.serialize(serializer),
        }
    }
}

/// Key → value mapping, or one function producing the whole mapping.
///
/// Used for `assign` payloads and for invocation/final-state `data`.
#[derive(Clone, Debug, PartialEq)]
pub enum Mapping {
    /// Properties in declaration order.
    Properties(IndexMap<String, AssignValue>),
    Function(Expr),
    /// Any non-object JSON value, carried to the interpreter untouched.
    Value(Value),
}

impl Mapping {
    /// Build a property mapping from a JSON object. Any other value is
    /// kept as [`Mapping::Value`] and is never merged.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(object) => Self::Properties(
                object
                    .into_iter()
                    .map(|(key, value)| (key, AssignValue::Value(value)))
                    .collect(),
            ),
            other => Self::Value(other),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Properties(properties) => properties.serialize(serializer),
            Self::Function(expr) => expr.serialize(serializer),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

/// Send an event, optionally to another actor and/or after a delay.
#[derive(Clone, Debug, PartialEq)]
pub struct SendAction {
    pub event: Value,
    pub to: Option<String>,
    pub delay: Option<Delay>,
    pub id: Option<String>,
}

/// One branch of a `choose` action: run `actions` when `cond` passes.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ChooseCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cond: Option<Guard>,
    pub actions: Vec<Action>,
}

/// An action attached to a transition, or to entry/exit of a state.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Action implemented by the interpreter under this name.
    Named(String),
    /// Inline side effect.
    Effect(Effect),
    /// State mutation ("assign").
    Assign(Mapping),
    Send(SendAction),
    /// First branch whose guard passes runs.
    Choose(Vec<ChooseCondition>),
    Pure(PureAction),
    /// Ordered list of actions, flattened one level by action extraction.
    Composed(Vec<Action>),
}

impl Action {
    /// Assigns whose payload is a plain mapping can be merged structurally;
    /// function assigners cannot.
    pub fn is_mergeable_assign(&self) -> bool {
        matches!(self, Self::Assign(Mapping::Properties(_)))
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<Effect> for Action {
    fn from(effect: Effect) -> Self {
        Self::Effect(effect)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(name) => serializer.serialize_str(name),
            Self::Effect(effect) => effect.serialize(serializer),
            Self::Assign(assignment) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", ASSIGN_TYPE)?;
                map.serialize_entry("assignment", assignment)?;
                map.end()
            }
            Self::Send(send) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", SEND_TYPE)?;
                map.serialize_entry("event", &send.event)?;
                if let Some(to) = &send.to {
                    map.serialize_entry("to", to)?;
                }
                if let Some(delay) = &send.delay {
                    map.serialize_entry("delay", delay)?;
                }
                if let Some(id) = &send.id {
                    map.serialize_entry("id", id)?;
                }
                map.end()
            }
            Self::Choose(conds) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", CHOOSE_TYPE)?;
                map.serialize_entry("conds", conds)?;
                map.end()
            }
            Self::Pure(pure) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", PURE_TYPE)?;
                map.serialize_entry("get", pure.name())?;
                map.end()
            }
            Self::Composed(actions) => actions.serialize(serializer),
        }
    }
}
