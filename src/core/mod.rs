//! Core configuration types.
//!
//! This module contains the data model shared by the assembly engine and
//! the builder functions:
//! - Fragments, the tagged input vocabulary
//! - Actions and guards, carried opaquely for the interpreter
//! - Transition records and configuration nodes, the assembled output
//!
//! All types are plain values; executable parts (effects, predicates,
//! expressions) are immutable and shared through `Arc`.

mod action;
mod fragment;
mod guard;
mod node;
mod transition;

pub use action::{
    Action, AssignValue, ChooseCondition, Effect, Expr, Mapping, PureAction, SendAction,
    ASSIGN_TYPE, CHOOSE_TYPE, PURE_TYPE, SEND_TYPE,
};
pub use fragment::{FacetKey, Fragment, TransitionToken};
pub use guard::{Guard, Predicate, GUARD_TYPE};
pub use node::{
    Activity, Delay, DelayTable, EventTable, HistoryMode, InvokeConfig, StateNode, StateType,
    StatesMap,
};
pub use transition::TransitionRecord;
