//! Builder API for fragment-based machine construction.
//!
//! Each function wraps one primitive into a tagged [`Fragment`]; lists of
//! fragments are turned into nodes by the assembly engine. The
//! [`fragments!`](crate::fragments) macro stands in for variadic calls.
//!
//! # Example
//!
//! ```
//! use xsfp::builder::*;
//! use xsfp::fragments;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), xsfp::AssemblyError> {
//! let machine = create_machine(fragments![
//!     id("counter"),
//!     context(json!({"count": 0})),
//!     states(vec![state(
//!         "active",
//!         fragments![on("INC", fragments!["active", assign(json!({"count": 1}))])?],
//!     )?]),
//! ])?;
//!
//! let config = machine.to_json().unwrap();
//! assert_eq!(config["states"]["active"]["on"]["INC"][0]["target"], "active");
//! # Ok(())
//! # }
//! ```

pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;

pub use crate::assemble::{merge_actions, merge_event_tables};
pub use machine::{create_machine, create_machine_with, MachineBuilder, MachineConfig};
pub use state::{
    final_state, history_state, initial_state, parallel_states, state, states, StateEntry,
};
pub use transition::{
    after, always, choice, choose, delay, on, on_done, on_error, transition, DelayedTransitions,
};

use crate::assemble::{flatten_actions, Assembler, AssemblyError};
use crate::core::{
    Action, Activity, Delay, Effect, Expr, Fragment, Guard, HistoryMode, InvokeConfig, Mapping,
    Predicate, PureAction, SendAction,
};
use serde_json::Value;

/// Optional settings of a [`send`] action.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SendOptions {
    pub to: Option<String>,
    pub delay: Option<Delay>,
    pub id: Option<String>,
}

/// Named action implemented by the interpreter.
pub fn action(name: impl Into<String>) -> Fragment {
    Fragment::Actions(Action::Named(name.into()))
}

/// Inline side-effect action.
pub fn effect<F>(name: impl Into<String>, func: F) -> Fragment
where
    F: Fn(&Value, &Value) + Send + Sync + 'static,
{
    Fragment::Actions(Action::Effect(Effect::new(name, func)))
}

/// State mutation from a JSON object of literal values.
pub fn assign(properties: Value) -> Fragment {
    assign_mapping(Mapping::from_json(properties))
}

/// State mutation from an explicit mapping (literal or computed values).
pub fn assign_mapping(mapping: Mapping) -> Fragment {
    Fragment::Actions(Action::Assign(mapping))
}

/// State mutation computed by one function; never merged by
/// [`merge_actions`].
pub fn assign_with<F>(name: impl Into<String>, func: F) -> Fragment
where
    F: Fn(&Value, &Value) -> Value + Send + Sync + 'static,
{
    assign_mapping(Mapping::Function(Expr::new(name, func)))
}

/// Send `event` (a name or an event object).
pub fn send(event: impl Into<Value>, options: SendOptions) -> Fragment {
    Fragment::Actions(Action::Send(SendAction {
        event: event.into(),
        to: options.to,
        delay: options.delay,
        id: options.id,
    }))
}

/// Actions computed at execution time.
pub fn pure<F>(name: impl Into<String>, func: F) -> Fragment
where
    F: Fn(&Value, &Value) -> Vec<Action> + Send + Sync + 'static,
{
    Fragment::Actions(Action::Pure(PureAction::new(name, func)))
}

/// Named guard implemented by the interpreter.
pub fn guard(name: impl Into<String>) -> Fragment {
    Fragment::Cond(Guard::Named(name.into()))
}

/// Inline guard predicate.
pub fn predicate<F>(name: impl Into<String>, func: F) -> Fragment
where
    F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
{
    Fragment::Cond(Guard::Predicate(Predicate::new(name, func)))
}

pub fn id(name: impl Into<String>) -> Fragment {
    Fragment::Id(name.into())
}

pub fn context(context: Value) -> Fragment {
    Fragment::Context(context)
}

pub fn meta(meta: Value) -> Fragment {
    Fragment::Meta(meta)
}

/// Done data of a final state, or input of an invocation.
pub fn data(data: Value) -> Fragment {
    Fragment::Data(Mapping::from_json(data))
}

/// Like [`data`], computed by a function.
pub fn data_with<F>(name: impl Into<String>, func: F) -> Fragment
where
    F: Fn(&Value, &Value) -> Value + Send + Sync + 'static,
{
    Fragment::Data(Mapping::Function(Expr::new(name, func)))
}

pub fn delimiter(delimiter: impl Into<String>) -> Fragment {
    Fragment::Delimiter(delimiter.into())
}

pub fn history(mode: HistoryMode) -> Fragment {
    Fragment::History(mode)
}

pub fn activities(activities: Vec<Activity>) -> Fragment {
    Fragment::Activities(activities)
}

pub fn auto_forward() -> Fragment {
    Fragment::AutoForward(true)
}

fn collect_actions(
    fragments: Vec<Fragment>,
    context: &'static str,
) -> Result<Vec<Action>, AssemblyError> {
    let actions = fragments
        .into_iter()
        .enumerate()
        .map(|(position, fragment)| match fragment {
            Fragment::Actions(action) => Ok(action),
            other => Err(AssemblyError::unexpected(&other, position, context)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(flatten_actions(actions))
}

/// Actions run on entering the state.
pub fn entry(fragments: Vec<Fragment>) -> Result<Fragment, AssemblyError> {
    Ok(Fragment::Entry(collect_actions(fragments, "entry")?))
}

/// Actions run on leaving the state.
pub fn exit(fragments: Vec<Fragment>) -> Result<Fragment, AssemblyError> {
    Ok(Fragment::Exit(collect_actions(fragments, "exit")?))
}

/// Invoke the service `src` while the state is active.
///
/// Accepts `id`, `data`, `on_done`, `on_error`, `auto_forward` fragments,
/// and `on("done" | "error", ..)`.
pub fn invoke(src: impl Into<String>, fragments: Vec<Fragment>) -> Result<Fragment, AssemblyError> {
    let invoke: InvokeConfig = Assembler::default().assemble(fragments)?;
    Ok(Fragment::Invoke(InvokeConfig {
        src: src.into(),
        ..invoke
    }))
}
