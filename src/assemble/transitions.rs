//! Transition grouping.
//!
//! A flat run of target/action/guard tokens becomes an ordered list of
//! transition records. A guard closes its record: anything after it starts
//! a new one. This lets one flat list say "A if G1, else B if G2, else C".

use crate::assemble::error::AssemblyError;
use crate::core::{Fragment, TransitionRecord, TransitionToken};

/// Fold state: emitted records plus the record still accepting tokens.
#[derive(Default)]
struct Grouping {
    records: Vec<TransitionRecord>,
    open: Option<TransitionRecord>,
}

impl Grouping {
    fn close(self) -> Vec<TransitionRecord> {
        let Grouping { mut records, open } = self;
        records.extend(open);
        records
    }

    fn push(self, token: TransitionToken) -> Self {
        match token {
            TransitionToken::Record(record) => {
                let mut records = self.close();
                records.push(record);
                Grouping { records, open: None }
            }
            primitive => {
                let (records, current) = match self.open {
                    Some(open) if !open.is_guarded() => (self.records, open),
                    open => {
                        let mut records = self.records;
                        records.extend(open);
                        (records, TransitionRecord::default())
                    }
                };
                Grouping {
                    records,
                    open: Some(apply(current, primitive)),
                }
            }
        }
    }
}

fn apply(record: TransitionRecord, token: TransitionToken) -> TransitionRecord {
    match token {
        TransitionToken::Target(target) => TransitionRecord {
            target: Some(target),
            ..record
        },
        TransitionToken::Actions(action) => record.with_action(action),
        TransitionToken::Cond(guard) => record.with_cond(guard),
        TransitionToken::Record(_) => record,
    }
}

/// Group a token run into transition records.
///
/// Pre-built records are emitted as-is and never absorb later tokens.
pub fn group_tokens<I>(tokens: I) -> Vec<TransitionRecord>
where
    I: IntoIterator<Item = TransitionToken>,
{
    let records = tokens
        .into_iter()
        .fold(Grouping::default(), Grouping::push)
        .close();
    tracing::trace!(records = records.len(), "grouped transition tokens");
    records
}

/// Group a fragment run into transition records.
///
/// # Errors
///
/// Fails on the first fragment that is not a target, action, guard or
/// pre-built record, naming its position.
pub fn group_transitions(fragments: Vec<Fragment>) -> Result<Vec<TransitionRecord>, AssemblyError> {
    let tokens = fragments
        .into_iter()
        .enumerate()
        .map(|(position, fragment)| {
            TransitionToken::try_from(fragment)
                .map_err(|other| AssemblyError::unexpected(&other, position, "transition run"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(group_tokens(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, FacetKey, Guard};

    fn target(name: &str) -> TransitionToken {
        TransitionToken::Target(name.to_string())
    }

    fn cond(name: &str) -> TransitionToken {
        TransitionToken::Cond(Guard::from(name))
    }

    fn act(name: &str) -> TransitionToken {
        TransitionToken::Actions(Action::from(name))
    }

    #[test]
    fn empty_run_yields_no_records() {
        assert!(group_tokens(Vec::new()).is_empty());
    }

    #[test]
    fn target_and_guard_form_one_record() {
        let records = group_tokens(vec![target("A"), cond("G")]);
        assert_eq!(
            records,
            vec![TransitionRecord::to("A").with_cond(Guard::from("G"))]
        );
    }

    #[test]
    fn guard_closes_its_group() {
        let records = group_tokens(vec![target("A"), cond("G"), target("B")]);
        assert_eq!(
            records,
            vec![
                TransitionRecord::to("A").with_cond(Guard::from("G")),
                TransitionRecord::to("B"),
            ]
        );
    }

    #[test]
    fn guarded_clauses_chain_with_unconditional_fallback() {
        let records = group_tokens(vec![
            target("A"),
            act("logA"),
            cond("G1"),
            target("B"),
            cond("G2"),
            target("C"),
            act("logC"),
        ]);

        assert_eq!(
            records,
            vec![
                TransitionRecord::to("A")
                    .with_action(Action::from("logA"))
                    .with_cond(Guard::from("G1")),
                TransitionRecord::to("B").with_cond(Guard::from("G2")),
                TransitionRecord::to("C").with_action(Action::from("logC")),
            ]
        );
    }

    #[test]
    fn actions_accumulate_in_order() {
        let records = group_tokens(vec![target("A"), act("one"), act("two")]);
        assert_eq!(
            records[0].actions,
            Some(vec![Action::from("one"), Action::from("two")])
        );
    }

    #[test]
    fn later_target_overwrites_earlier_in_same_group() {
        let records = group_tokens(vec![target("A"), target("B")]);
        assert_eq!(records, vec![TransitionRecord::to("B")]);
    }

    #[test]
    fn consecutive_guards_open_new_records() {
        let records = group_tokens(vec![cond("G1"), cond("G2")]);
        assert_eq!(
            records,
            vec![
                TransitionRecord::default().with_cond(Guard::from("G1")),
                TransitionRecord::default().with_cond(Guard::from("G2")),
            ]
        );
    }

    #[test]
    fn prebuilt_record_is_emitted_as_is_and_not_extended() {
        let prebuilt = TransitionRecord::to("X");
        let records = group_tokens(vec![
            target("A"),
            TransitionToken::Record(prebuilt.clone()),
            act("after"),
        ]);

        assert_eq!(
            records,
            vec![
                TransitionRecord::to("A"),
                prebuilt,
                TransitionRecord::default().with_action(Action::from("after")),
            ]
        );
    }

    #[test]
    fn group_transitions_accepts_fragments() {
        let records = group_transitions(vec![
            Fragment::from("A"),
            Fragment::Cond(Guard::from("G")),
            Fragment::from("B"),
        ])
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1], TransitionRecord::to("B"));
    }

    #[test]
    fn group_transitions_rejects_foreign_fragment_with_position() {
        let err = group_transitions(vec![
            Fragment::from("A"),
            Fragment::Meta(serde_json::json!({})),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            AssemblyError::UnexpectedFragment {
                facet: FacetKey::Meta,
                position: 1,
                context: "transition run",
            }
        );
    }
}
