//! Config assembly: fold one node's fragment list into a canonical node.

use crate::assemble::error::AssemblyError;
use crate::assemble::merge::union_event_tables;
use crate::assemble::options::{AssemblyOptions, DuplicatePolicy};
use crate::core::{FacetKey, Fragment, InvokeConfig, StateNode};
use std::collections::BTreeSet;

/// Reserved event relocated to `onDone`.
pub const DONE_EVENT: &str = "done";
/// Reserved event relocated to `onError`.
pub const ERROR_EVENT: &str = "error";

/// A fragment tagged with its position in the caller's input list.
type Positioned = (usize, Fragment);

/// A node the assembler can fold fragments into.
pub trait ConfigNode: Default {
    /// Node name used in diagnostics.
    const KIND: &'static str;

    /// Write one fragment into its facet, overwriting any earlier value.
    /// Fragments this node has no facet for are handed back.
    fn apply(&mut self, fragment: Fragment) -> Result<(), Fragment>;
}

impl ConfigNode for StateNode {
    const KIND: &'static str = "state";

    fn apply(&mut self, fragment: Fragment) -> Result<(), Fragment> {
        match fragment {
            Fragment::Id(id) => self.id = Some(id),
            Fragment::Initial(initial) => self.initial = Some(initial),
            Fragment::Type(kind) => self.kind = Some(kind),
            Fragment::Context(context) => self.context = Some(context),
            Fragment::History(history) => self.history = Some(history),
            Fragment::Target(target) => self.target = Some(target),
            Fragment::States(states) => self.states = Some(states),
            Fragment::On(on) => self.on = Some(on),
            Fragment::OnDone(records) => self.on_done = Some(records),
            Fragment::OnError(records) => self.on_error = Some(records),
            Fragment::Entry(actions) => self.entry = Some(actions),
            Fragment::Exit(actions) => self.exit = Some(actions),
            Fragment::Invoke(invoke) => self.invoke = Some(invoke),
            Fragment::Always(records) => self.always = Some(records),
            Fragment::After(delays) => self.after = Some(delays),
            Fragment::Activities(activities) => self.activities = Some(activities),
            Fragment::Meta(meta) => self.meta = Some(meta),
            Fragment::Data(data) => self.data = Some(data),
            Fragment::Delimiter(delimiter) => self.delimiter = Some(delimiter),
            other @ (Fragment::Nested(_)
            | Fragment::AutoForward(_)
            | Fragment::Actions(_)
            | Fragment::Cond(_)
            | Fragment::Transition(_)) => return Err(other),
        }
        Ok(())
    }
}

impl ConfigNode for InvokeConfig {
    const KIND: &'static str = "invocation";

    fn apply(&mut self, fragment: Fragment) -> Result<(), Fragment> {
        match fragment {
            Fragment::Id(id) => self.id = Some(id),
            Fragment::Data(data) => self.data = Some(data),
            Fragment::OnDone(records) => self.on_done = Some(records),
            Fragment::OnError(records) => self.on_error = Some(records),
            Fragment::AutoForward(enabled) => self.auto_forward = Some(enabled),
            other => return Err(other),
        }
        Ok(())
    }
}

/// Folds fragment lists into configuration nodes.
///
/// # Example
///
/// ```rust
/// use xsfp::core::{EventTable, Fragment, StateNode, TransitionRecord};
/// use xsfp::Assembler;
///
/// let mut on = EventTable::new();
/// on.insert("done".to_string(), vec![TransitionRecord::to("next")]);
///
/// let node: StateNode = Assembler::default()
///     .assemble(vec![Fragment::Id("step".into()), Fragment::On(on)])
///     .unwrap();
///
/// assert_eq!(node.on_done, Some(vec![TransitionRecord::to("next")]));
/// assert!(node.on.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Assembler {
    options: AssemblyOptions,
}

impl Assembler {
    pub fn new(options: AssemblyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    /// Fold an ordered fragment list into one node.
    ///
    /// 1. The nested-states fragment (at most one) moves to the end.
    /// 2. All `on` fragments merge, later events winning.
    /// 3. `done`/`error` events become `onDone`/`onError`; `on` is dropped
    ///    when nothing else remains.
    /// 4. Fragments fold by facet, later ones overwriting earlier ones.
    ///
    /// # Errors
    ///
    /// Returns an error for a second nested-states fragment, a fragment
    /// kind the node does not accept, or (under
    /// [`DuplicatePolicy::Reject`]) a repeated facet.
    pub fn assemble<N: ConfigNode>(&self, fragments: Vec<Fragment>) -> Result<N, AssemblyError> {
        let count = fragments.len();
        let ordered = hoist_nested_states(fragments)?;
        let ordered = self.fold_event_tables(ordered);
        let node = self.fold_facets(ordered)?;
        tracing::debug!(kind = N::KIND, fragments = count, "assembled configuration node");
        Ok(node)
    }

    fn fold_event_tables(&self, ordered: Vec<Positioned>) -> Vec<Positioned> {
        let (tables, mut rest): (Vec<Positioned>, Vec<Positioned>) = ordered
            .into_iter()
            .partition(|(_, fragment)| matches!(fragment, Fragment::On(_)));

        let Some(position) = tables.last().map(|(position, _)| *position) else {
            return rest;
        };

        let mut merged = union_event_tables(tables.into_iter().filter_map(|(_, fragment)| {
            match fragment {
                Fragment::On(table) => Some(table),
                _ => None,
            }
        }));

        if self.options.relocate_reserved_events {
            if let Some(records) = merged.shift_remove(DONE_EVENT) {
                rest.push((position, Fragment::OnDone(records)));
            }
            if let Some(records) = merged.shift_remove(ERROR_EVENT) {
                rest.push((position, Fragment::OnError(records)));
            }
        }

        if !merged.is_empty() {
            rest.push((position, Fragment::On(merged)));
        }
        rest
    }

    fn fold_facets<N: ConfigNode>(&self, ordered: Vec<Positioned>) -> Result<N, AssemblyError> {
        let mut seen = BTreeSet::new();
        ordered
            .into_iter()
            .try_fold(N::default(), |mut node, (position, fragment)| {
                let facet = fragment.facet();
                node.apply(fragment)
                    .map_err(|rejected| AssemblyError::unexpected(&rejected, position, N::KIND))?;
                if !seen.insert(facet) {
                    self.duplicate(facet, position, N::KIND)?;
                }
                Ok(node)
            })
    }

    fn duplicate(
        &self,
        facet: FacetKey,
        position: usize,
        context: &'static str,
    ) -> Result<(), AssemblyError> {
        match self.options.duplicate_facets {
            DuplicatePolicy::Overwrite => Ok(()),
            DuplicatePolicy::Warn => {
                tracing::warn!(
                    %facet,
                    position,
                    context,
                    "duplicate fragment; later value wins"
                );
                Ok(())
            }
            DuplicatePolicy::Reject => Err(AssemblyError::DuplicateFacet {
                facet,
                position,
                context,
            }),
        }
    }
}

/// Move the nested-states fragment's contents to the end of the list.
fn hoist_nested_states(fragments: Vec<Fragment>) -> Result<Vec<Positioned>, AssemblyError> {
    let mut nested: Option<(usize, Vec<Fragment>)> = None;
    let mut ordered = Vec::with_capacity(fragments.len());

    for (position, fragment) in fragments.into_iter().enumerate() {
        match fragment {
            Fragment::Nested(contents) => {
                if let Some((first, _)) = &nested {
                    return Err(AssemblyError::MultipleNestedStates {
                        first: *first,
                        second: position,
                    });
                }
                nested = Some((position, contents));
            }
            other => ordered.push((position, other)),
        }
    }

    if let Some((position, contents)) = nested {
        ordered.extend(contents.into_iter().map(|fragment| (position, fragment)));
    }
    Ok(ordered)
}

/// Assemble with default options.
pub fn assemble<N: ConfigNode>(fragments: Vec<Fragment>) -> Result<N, AssemblyError> {
    Assembler::default().assemble(fragments)
}
