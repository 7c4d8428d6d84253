//! Configuration nodes: the assembled, canonical shape of a state.
//!
//! Field names and nesting follow the interpreter's configuration schema
//! exactly; this is the crate's only wire contract.

use crate::core::action::{Action, Effect, Mapping};
use crate::core::transition::TransitionRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use serde_json::Value;
use indexmap::IndexMap;
use std::fmt;

/// Event name → ordered transition records, in declaration order.
pub type EventTable = IndexMap<String, Vec<TransitionRecord>>;

/// Delay key → ordered transition records, in declaration order.
pub type DelayTable = IndexMap<String, Vec<TransitionRecord>>;

/// State name → nested configuration node, in document order.
///
/// The interpreter enters parallel regions in this order.
pub type StatesMap = IndexMap<String, StateNode>;

/// State kind discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateType {
    Atomic,
    Compound,
    Parallel,
    Final,
    History,
}

/// History mode of a state. `Disabled` is written as `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HistoryMode {
    Disabled,
    #[default]
    Shallow,
    Deep,
}

impl Serialize for HistoryMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Shallow => serializer.serialize_str("shallow"),
            Self::Deep => serializer.serialize_str("deep"),
        }
    }
}

/// Delay of an `after` transition or a delayed send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delay {
    Millis(u64),
    /// Delay resolved by name from the interpreter's options.
    Named(String),
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(ms) => write!(f, "{}", ms),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<u64> for Delay {
    fn from(ms: u64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for Delay {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl Serialize for Delay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Millis(ms) => serializer.serialize_u64(*ms),
            Self::Named(name) => serializer.serialize_str(name),
        }
    }
}

/// Long-running activity of a state.
#[derive(Clone, Debug, PartialEq)]
pub enum Activity {
    Named(String),
    Effect(Effect),
}

impl From<&str> for Activity {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<Effect> for Activity {
    fn from(effect: Effect) -> Self {
        Self::Effect(effect)
    }
}

impl Serialize for Activity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(name) => serializer.serialize_str(name),
            Self::Effect(effect) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("id", effect.name())?;
                map.serialize_entry("type", effect.name())?;
                map.end()
            }
        }
    }
}

/// Invoked service descriptor.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeConfig {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Mapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_done: Option<Vec<TransitionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_error: Option<Vec<TransitionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_forward: Option<bool>,
}

/// One configuration node: a state, or the machine root.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<StateType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryMode>,
    /// Default target of a history state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<StatesMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<EventTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<Action>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit: Option<Vec<Action>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoke: Option<InvokeConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_done: Option<Vec<TransitionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_error: Option<Vec<TransitionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DelayTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always: Option<Vec<TransitionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<Activity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Mapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

impl StateNode {
    /// Node with only a `type` set.
    pub fn of_kind(kind: StateType) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Child state by name, if this node has nested states.
    pub fn state(&self, name: &str) -> Option<&StateNode> {
        self.states.as_ref().and_then(|states| states.get(name))
    }

    /// Transition records for an event in the generic event table.
    pub fn transitions(&self, event: &str) -> Option<&[TransitionRecord]> {
        self.on
            .as_ref()
            .and_then(|on| on.get(event))
            .map(Vec::as_slice)
    }
}
