//! Builders for transition records, event tables and choose actions.

use crate::assemble::{extract_actions, extract_guards, group_transitions, AssemblyError};
use crate::core::{Action, ChooseCondition, Delay, DelayTable, EventTable, Fragment, TransitionRecord};

/// Transition records for one delay, as produced by [`delay`].
pub type DelayedTransitions = (Delay, Vec<TransitionRecord>);

fn reject_other(
    fragments: &[Fragment],
    context: &'static str,
    allowed: fn(&Fragment) -> bool,
) -> Result<(), AssemblyError> {
    match fragments.iter().position(|fragment| !allowed(fragment)) {
        Some(position) => Err(AssemblyError::unexpected(
            &fragments[position],
            position,
            context,
        )),
        None => Ok(()),
    }
}

/// Event table entry for `event`, grouping the run into records.
///
/// # Example
///
/// ```
/// use xsfp::builder::{guard, on};
/// use xsfp::core::{Fragment, Guard, TransitionRecord};
/// use xsfp::fragments;
///
/// let fragment = on("SUBMIT", fragments!["sent", guard("isValid"), "invalid"]).unwrap();
///
/// let Fragment::On(table) = fragment else { unreachable!() };
/// assert_eq!(
///     table["SUBMIT"],
///     vec![
///         TransitionRecord::to("sent").with_cond(Guard::from("isValid")),
///         TransitionRecord::to("invalid"),
///     ]
/// );
/// ```
pub fn on(event: impl Into<String>, fragments: Vec<Fragment>) -> Result<Fragment, AssemblyError> {
    let mut table = EventTable::new();
    table.insert(event.into(), group_transitions(fragments)?);
    Ok(Fragment::On(table))
}

/// Transitions taken when the state's invocation or final child completes.
pub fn on_done(fragments: Vec<Fragment>) -> Result<Fragment, AssemblyError> {
    Ok(Fragment::OnDone(group_transitions(fragments)?))
}

/// Transitions taken when the state's invocation fails.
pub fn on_error(fragments: Vec<Fragment>) -> Result<Fragment, AssemblyError> {
    Ok(Fragment::OnError(group_transitions(fragments)?))
}

/// Eventless transitions, checked after every transition.
pub fn always(fragments: Vec<Fragment>) -> Result<Fragment, AssemblyError> {
    Ok(Fragment::Always(group_transitions(fragments)?))
}

/// Transitions taken after `delay`; combine several with [`after`].
pub fn delay(
    delay: impl Into<Delay>,
    fragments: Vec<Fragment>,
) -> Result<DelayedTransitions, AssemblyError> {
    Ok((delay.into(), group_transitions(fragments)?))
}

/// Delayed transitions keyed by delay. A repeated delay keeps the last entry.
pub fn after(delays: Vec<DelayedTransitions>) -> Fragment {
    let table: DelayTable = delays
        .into_iter()
        .map(|(delay, records)| (delay.to_string(), records))
        .collect();
    Fragment::After(table)
}

/// One pre-built transition record from a short fragment run.
///
/// The first target is used, every action is kept in order, and the last
/// guard wins.
///
/// # Errors
///
/// Only targets, actions and guards are accepted.
pub fn transition(fragments: Vec<Fragment>) -> Result<TransitionRecord, AssemblyError> {
    reject_other(&fragments, "transition", |fragment| {
        matches!(
            fragment,
            Fragment::Target(_) | Fragment::Actions(_) | Fragment::Cond(_)
        )
    })?;

    let actions = extract_actions(&fragments);
    let cond = extract_guards(&fragments).pop();
    let target = fragments.into_iter().find_map(|fragment| match fragment {
        Fragment::Target(target) => Some(target),
        _ => None,
    });

    Ok(TransitionRecord {
        target,
        actions: (!actions.is_empty()).then_some(actions),
        cond,
    })
}

/// One branch of a [`choose`] action: its actions and the last guard.
///
/// # Errors
///
/// Only actions and guards are accepted.
pub fn choice(fragments: Vec<Fragment>) -> Result<ChooseCondition, AssemblyError> {
    reject_other(&fragments, "choice", |fragment| {
        matches!(fragment, Fragment::Actions(_) | Fragment::Cond(_))
    })?;

    Ok(ChooseCondition {
        cond: extract_guards(&fragments).pop(),
        actions: extract_actions(&fragments),
    })
}

/// Action running the first branch whose guard passes.
pub fn choose(conditions: Vec<ChooseCondition>) -> Fragment {
    Fragment::Actions(Action::Choose(conditions))
}
