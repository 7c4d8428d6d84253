//! Action and guard extraction, assign merging, event table union.

use crate::assemble::error::AssemblyError;
use crate::core::{Action, EventTable, Fragment, Guard, Mapping};

/// Flatten composed actions one level, preserving order.
pub fn flatten_actions<I>(actions: I) -> Vec<Action>
where
    I: IntoIterator<Item = Action>,
{
    actions
        .into_iter()
        .flat_map(|action| match action {
            Action::Composed(inner) => inner,
            other => vec![other],
        })
        .collect()
}

/// Values of every `actions` fragment, in order, composed actions
/// flattened one level. Other fragments are ignored.
pub fn extract_actions(fragments: &[Fragment]) -> Vec<Action> {
    flatten_actions(fragments.iter().filter_map(|fragment| match fragment {
        Fragment::Actions(action) => Some(action.clone()),
        _ => None,
    }))
}

/// Values of every `cond` fragment, in order.
///
/// Callers building a single record use the last one; earlier guards are
/// superseded.
pub fn extract_guards(fragments: &[Fragment]) -> Vec<Guard> {
    fragments
        .iter()
        .filter_map(|fragment| match fragment {
            Fragment::Cond(guard) => Some(guard.clone()),
            _ => None,
        })
        .collect()
}

/// Shallow union of event tables; later tables win per event name.
pub fn union_event_tables<I>(tables: I) -> EventTable
where
    I: IntoIterator<Item = EventTable>,
{
    tables
        .into_iter()
        .fold(EventTable::new(), |mut merged, table| {
            merged.extend(table);
            merged
        })
}

/// Merge every plain-mapping assign into one assign placed first, followed
/// by all other actions in their original order.
///
/// Function assigners are left untouched: their effect cannot be combined
/// statically. No assign is synthesized when there is nothing to merge.
pub fn merge_assigns(actions: Vec<Action>) -> Vec<Action> {
    let (assigns, others): (Vec<Action>, Vec<Action>) = actions
        .into_iter()
        .partition(Action::is_mergeable_assign);

    let merged = assigns
        .into_iter()
        .filter_map(|action| match action {
            Action::Assign(Mapping::Properties(properties)) => Some(properties),
            _ => None,
        })
        .reduce(|mut merged, properties| {
            merged.extend(properties);
            merged
        });

    merged
        .map(|properties| Action::Assign(Mapping::Properties(properties)))
        .into_iter()
        .chain(others)
        .collect()
}

/// Merge `on` fragments into one `on` fragment.
///
/// # Errors
///
/// Any fragment other than `on` is reported with its position.
pub fn merge_event_tables(fragments: Vec<Fragment>) -> Result<Fragment, AssemblyError> {
    let tables = fragments
        .into_iter()
        .enumerate()
        .map(|(position, fragment)| match fragment {
            Fragment::On(table) => Ok(table),
            other => Err(AssemblyError::unexpected(&other, position, "event table merge")),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Fragment::On(union_event_tables(tables)))
}

/// Merge `actions` fragments into one composed `actions` fragment whose
/// plain-mapping assigns are combined into a single assign.
///
/// # Errors
///
/// Any fragment other than `actions` is reported with its position.
pub fn merge_actions(fragments: Vec<Fragment>) -> Result<Fragment, AssemblyError> {
    let actions = fragments
        .into_iter()
        .enumerate()
        .map(|(position, fragment)| match fragment {
            Fragment::Actions(action) => Ok(action),
            other => Err(AssemblyError::unexpected(&other, position, "action merge")),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let merged = merge_assigns(flatten_actions(actions));
    tracing::trace!(actions = merged.len(), "merged action fragments");
    Ok(Fragment::Actions(Action::Composed(merged)))
}
