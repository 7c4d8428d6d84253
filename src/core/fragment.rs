//! Tagged fragments: the input vocabulary of the assembly engine.

use crate::core::action::{Action, Mapping};
use crate::core::guard::Guard;
use crate::core::node::{
    Activity, DelayTable, EventTable, HistoryMode, InvokeConfig, StateType, StatesMap,
};
use crate::core::transition::TransitionRecord;
use serde_json::Value;
use std::fmt;

/// Closed set of fragment kinds, named as they appear on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FacetKey {
    Id,
    Initial,
    Type,
    Context,
    History,
    Target,
    States,
    On,
    OnDone,
    OnError,
    Entry,
    Exit,
    Invoke,
    Always,
    After,
    Activities,
    Meta,
    Data,
    Delimiter,
    AutoForward,
    Actions,
    Cond,
    Transition,
}

impl FacetKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Initial => "initial",
            Self::Type => "type",
            Self::Context => "context",
            Self::History => "history",
            Self::Target => "target",
            Self::States => "states",
            Self::On => "on",
            Self::OnDone => "onDone",
            Self::OnError => "onError",
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Invoke => "invoke",
            Self::Always => "always",
            Self::After => "after",
            Self::Activities => "activities",
            Self::Meta => "meta",
            Self::Data => "data",
            Self::Delimiter => "delimiter",
            Self::AutoForward => "autoForward",
            Self::Actions => "actions",
            Self::Cond => "cond",
            Self::Transition => "transition",
        }
    }
}

impl fmt::Display for FacetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tagged `(facet, value)` pair describing an aspect of a node.
///
/// Order matters: the assembler preserves it except where it explicitly
/// folds (nested states last, event tables merged).
#[derive(Clone, Debug, PartialEq)]
pub enum Fragment {
    Id(String),
    Initial(String),
    Type(StateType),
    Context(Value),
    History(HistoryMode),
    /// A bare string: a transition target, or a history state's default.
    Target(String),
    States(StatesMap),
    /// Nested-states fragment; its contents fold after everything else.
    Nested(Vec<Fragment>),
    On(EventTable),
    OnDone(Vec<TransitionRecord>),
    OnError(Vec<TransitionRecord>),
    Entry(Vec<Action>),
    Exit(Vec<Action>),
    Invoke(InvokeConfig),
    Always(Vec<TransitionRecord>),
    After(DelayTable),
    Activities(Vec<Activity>),
    Meta(Value),
    Data(Mapping),
    Delimiter(String),
    AutoForward(bool),
    Actions(Action),
    Cond(Guard),
    /// Pre-built transition record.
    Transition(TransitionRecord),
}

impl Fragment {
    pub fn facet(&self) -> FacetKey {
        match self {
            Self::Id(_) => FacetKey::Id,
            Self::Initial(_) => FacetKey::Initial,
            Self::Type(_) => FacetKey::Type,
            Self::Context(_) => FacetKey::Context,
            Self::History(_) => FacetKey::History,
            Self::Target(_) => FacetKey::Target,
            Self::States(_) | Self::Nested(_) => FacetKey::States,
            Self::On(_) => FacetKey::On,
            Self::OnDone(_) => FacetKey::OnDone,
            Self::OnError(_) => FacetKey::OnError,
            Self::Entry(_) => FacetKey::Entry,
            Self::Exit(_) => FacetKey::Exit,
            Self::Invoke(_) => FacetKey::Invoke,
            Self::Always(_) => FacetKey::Always,
            Self::After(_) => FacetKey::After,
            Self::Activities(_) => FacetKey::Activities,
            Self::Meta(_) => FacetKey::Meta,
            Self::Data(_) => FacetKey::Data,
            Self::Delimiter(_) => FacetKey::Delimiter,
            Self::AutoForward(_) => FacetKey::AutoForward,
            Self::Actions(_) => FacetKey::Actions,
            Self::Cond(_) => FacetKey::Cond,
            Self::Transition(_) => FacetKey::Transition,
        }
    }

    pub fn is_nested_states(&self) -> bool {
        matches!(self, Self::Nested(_))
    }
}

impl From<&str> for Fragment {
    fn from(target: &str) -> Self {
        Self::Target(target.to_string())
    }
}

impl From<String> for Fragment {
    fn from(target: String) -> Self {
        Self::Target(target)
    }
}

impl From<TransitionRecord> for Fragment {
    fn from(record: TransitionRecord) -> Self {
        Self::Transition(record)
    }
}

/// Token of a transition run, the input of transition grouping.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionToken {
    Record(TransitionRecord),
    Target(String),
    Actions(Action),
    Cond(Guard),
}

impl TransitionToken {
    /// Whether this token is folded into the open record rather than
    /// appended as-is.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Record(_))
    }
}

/// Fragments that cannot appear in a transition run are handed back.
impl TryFrom<Fragment> for TransitionToken {
    type Error = Fragment;

    fn try_from(fragment: Fragment) -> Result<Self, Self::Error> {
        match fragment {
            Fragment::Transition(record) => Ok(Self::Record(record)),
            Fragment::Target(target) => Ok(Self::Target(target)),
            Fragment::Actions(action) => Ok(Self::Actions(action)),
            Fragment::Cond(guard) => Ok(Self::Cond(guard)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_keys_use_wire_names() {
        assert_eq!(FacetKey::OnDone.to_string(), "onDone");
        assert_eq!(FacetKey::AutoForward.as_str(), "autoForward");
        assert_eq!(Fragment::Nested(vec![]).facet(), FacetKey::States);
        assert_eq!(Fragment::States(StatesMap::new()).facet(), FacetKey::States);
    }

    #[test]
    fn strings_become_targets() {
        assert_eq!(Fragment::from("idle"), Fragment::Target("idle".to_string()));
        assert_eq!(
            Fragment::from(String::from("busy")),
            Fragment::Target("busy".to_string())
        );
    }

    #[test]
    fn transition_run_fragments_convert_to_tokens() {
        let token = TransitionToken::try_from(Fragment::Cond(Guard::from("ok"))).unwrap();
        assert_eq!(token, TransitionToken::Cond(Guard::from("ok")));
        assert!(token.is_primitive());

        let record = TransitionToken::try_from(Fragment::from(TransitionRecord::to("a"))).unwrap();
        assert!(!record.is_primitive());
    }

    #[test]
    fn other_fragments_are_rejected_as_tokens() {
        let rejected = TransitionToken::try_from(Fragment::Id("root".to_string()));
        assert_eq!(rejected, Err(Fragment::Id("root".to_string())));
    }

    #[test]
    fn only_nested_fragment_is_nested_states() {
        assert!(Fragment::Nested(vec![]).is_nested_states());
        assert!(!Fragment::States(StatesMap::new()).is_nested_states());
    }
}
