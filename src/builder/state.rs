//! Builders for states and nested-states fragments.

use crate::assemble::{assemble, AssemblyError};
use crate::core::{Fragment, HistoryMode, StateNode, StateType, StatesMap};

/// A named state ready to be placed in [`states`] or [`parallel_states`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateEntry {
    pub name: String,
    pub node: StateNode,
    /// Marks the parent's initial state; not part of the node itself.
    pub is_initial: bool,
}

impl StateEntry {
    pub fn new(name: impl Into<String>, node: StateNode) -> Self {
        Self {
            name: name.into(),
            node,
            is_initial: false,
        }
    }

    /// Return the entry marked as its parent's initial state.
    pub fn initial(mut self) -> Self {
        self.is_initial = true;
        self
    }
}

/// A bare name is an empty atomic state.
impl From<&str> for StateEntry {
    fn from(name: &str) -> Self {
        Self::new(name, StateNode::default())
    }
}

/// Assemble a named state from its fragments.
///
/// # Example
///
/// ```
/// use xsfp::builder::{action, entry, state};
/// use xsfp::core::Action;
/// use xsfp::fragments;
///
/// let entry_state = state("loading", fragments![entry(fragments![action("spin")])?])?;
///
/// assert_eq!(entry_state.name, "loading");
/// assert_eq!(entry_state.node.entry, Some(vec![Action::from("spin")]));
/// # Ok::<(), xsfp::AssemblyError>(())
/// ```
pub fn state(name: impl Into<String>, fragments: Vec<Fragment>) -> Result<StateEntry, AssemblyError> {
    Ok(StateEntry::new(name, assemble(fragments)?))
}

/// Like [`state`], marked as the parent's initial state.
pub fn initial_state(
    name: impl Into<String>,
    fragments: Vec<Fragment>,
) -> Result<StateEntry, AssemblyError> {
    Ok(state(name, fragments)?.initial())
}

/// `{type: final}` state.
pub fn final_state(name: impl Into<String>) -> StateEntry {
    StateEntry::new(name, StateNode::of_kind(StateType::Final))
}

/// `{type: history}` state; shallow unless a mode is given.
pub fn history_state(
    name: impl Into<String>,
    mode: Option<HistoryMode>,
    target: Option<&str>,
) -> StateEntry {
    let node = StateNode {
        kind: Some(StateType::History),
        history: Some(mode.unwrap_or_default()),
        target: target.map(str::to_string),
        ..StateNode::default()
    };
    StateEntry::new(name, node)
}

fn states_map(entries: Vec<StateEntry>) -> StatesMap {
    entries
        .into_iter()
        .fold(StatesMap::new(), |mut states, entry| {
            if states.insert(entry.name.clone(), entry.node).is_some() {
                tracing::warn!(state = %entry.name, "duplicate state name; later state wins");
            }
            states
        })
}

/// Nested-states fragment for a compound state.
///
/// The initial state is the first entry marked initial, or else the first
/// entry. An empty list sets no initial state.
pub fn states(entries: Vec<StateEntry>) -> Fragment {
    let initial = entries
        .iter()
        .find(|entry| entry.is_initial)
        .or_else(|| entries.first())
        .map(|entry| Fragment::Initial(entry.name.clone()));

    let mut contents = vec![Fragment::States(states_map(entries))];
    contents.extend(initial);
    Fragment::Nested(contents)
}

/// Nested-states fragment for a parallel state: every child is active.
pub fn parallel_states(entries: Vec<StateEntry>) -> Fragment {
    Fragment::Nested(vec![
        Fragment::States(states_map(entries)),
        Fragment::Type(StateType::Parallel),
    ])
}
