//! End-to-end tests: fragment-built machines against hand-written configs.

use serde_json::json;
use xsfp::builder::*;
use xsfp::core::{Action, Guard, HistoryMode, TransitionRecord};
use xsfp::{fragments, AssemblyError, DuplicatePolicy};

#[test]
fn toggle_machine_matches_hand_written_config() -> Result<(), AssemblyError> {
    let machine = create_machine(fragments![
        id("toggle"),
        activities(vec!["activity".into()]),
        states(vec![
            initial_state("inactive", fragments![on("TOGGLE", fragments!["active"])?])?,
            state(
                "active",
                fragments![
                    on(
                        "TOGGLE",
                        fragments![
                            "inactive",
                            assign(json!({"test": "test"})),
                            effect("noop", |_, _| {}),
                        ]
                    )?,
                    entry(fragments![action("test")])?,
                    exit(fragments![action("test")])?,
                    always(fragments!["inactive"])?,
                    parallel_states(vec![state("parallel1", fragments![])?, "parallel2".into()]),
                ]
            )?,
            history_state("hist", None, None),
            final_state("final"),
        ]),
    ])?;

    let expected = json!({
        "id": "toggle",
        "initial": "inactive",
        "activities": ["activity"],
        "states": {
            "inactive": {"on": {"TOGGLE": [{"target": "active"}]}},
            "active": {
                "type": "parallel",
                "on": {
                    "TOGGLE": [{
                        "target": "inactive",
                        "actions": [
                            {"type": "xstate.assign", "assignment": {"test": "test"}},
                            {"type": "noop"}
                        ]
                    }]
                },
                "entry": ["test"],
                "exit": ["test"],
                "always": [{"target": "inactive"}],
                "states": {"parallel1": {}, "parallel2": {}}
            },
            "hist": {"type": "history", "history": "shallow"},
            "final": {"type": "final"}
        }
    });

    assert_eq!(machine.to_json().unwrap(), expected);
    Ok(())
}

#[test]
fn toggle_machine_without_explicit_initial() -> Result<(), AssemblyError> {
    let machine = create_machine(fragments![states(vec![
        state("inactive", fragments![on("TOGGLE", fragments!["active"])?])?,
        state("active", fragments![on("TOGGLE", fragments!["inactive"])?])?,
    ])])?;

    let root = machine.root();
    assert_eq!(root.initial.as_deref(), Some("inactive"));
    assert_eq!(
        root.state("inactive").unwrap().transitions("TOGGLE"),
        Some(&[TransitionRecord::to("active")][..])
    );
    assert_eq!(
        root.state("active").unwrap().transitions("TOGGLE"),
        Some(&[TransitionRecord::to("inactive")][..])
    );
    Ok(())
}

#[test]
fn guarded_clauses_and_fallback() -> Result<(), AssemblyError> {
    let checkout = state(
        "checkout",
        fragments![on(
            "SUBMIT",
            fragments![
                "paid",
                action("charge"),
                guard("hasCard"),
                "invoiced",
                guard("hasAccount"),
                "rejected",
            ]
        )?],
    )?;

    assert_eq!(
        checkout.node.transitions("SUBMIT").unwrap(),
        &[
            TransitionRecord::to("paid")
                .with_action(Action::from("charge"))
                .with_cond(Guard::from("hasCard")),
            TransitionRecord::to("invoiced").with_cond(Guard::from("hasAccount")),
            TransitionRecord::to("rejected"),
        ][..]
    );
    Ok(())
}

#[test]
fn invocation_with_reserved_events() -> Result<(), AssemblyError> {
    let loading = state(
        "loading",
        fragments![
            invoke(
                "fetchUser",
                fragments![
                    data(json!({"userId": 42})),
                    on("done", fragments!["ready", assign(json!({"loaded": true}))])?,
                    on("error", fragments!["failed"])?,
                ]
            )?,
            on("CANCEL", fragments!["idle"])?,
        ],
    )?;

    assert_eq!(
        serde_json::to_value(&loading.node).unwrap(),
        json!({
            "invoke": {
                "src": "fetchUser",
                "data": {"userId": 42},
                "onDone": [{
                    "target": "ready",
                    "actions": [{"type": "xstate.assign", "assignment": {"loaded": true}}]
                }],
                "onError": [{"target": "failed"}]
            },
            "on": {"CANCEL": [{"target": "idle"}]}
        })
    );
    Ok(())
}

#[test]
fn state_level_done_event_moves_to_on_done() -> Result<(), AssemblyError> {
    let review = state(
        "review",
        fragments![
            on("done", fragments!["approved"])?,
            states(vec!["reading".into(), final_state("finished")]),
        ],
    )?;

    assert!(review.node.on.is_none());
    assert_eq!(review.node.on_done, Some(vec![TransitionRecord::to("approved")]));
    assert_eq!(review.node.initial.as_deref(), Some("reading"));
    Ok(())
}

#[test]
fn delayed_and_merged_behaviour() -> Result<(), AssemblyError> {
    let light = state(
        "green",
        fragments![
            after(vec![
                delay(30_000u64, fragments!["yellow"])?,
                delay("EMERGENCY", fragments!["red", guard("isEmergency")])?,
            ]),
            entry(fragments![merge_actions(vec![
                assign(json!({"color": "green"})),
                action("startTimer"),
                assign(json!({"cycles": 1})),
            ])?])?,
            merge_event_tables(vec![
                on("TICK", fragments!["green"])?,
                on("POWER_OUTAGE", fragments!["off"])?,
            ])?,
            meta(json!({"description": "go"})),
            history(HistoryMode::Deep),
        ],
    )?;

    assert_eq!(
        serde_json::to_value(&light.node).unwrap(),
        json!({
            "history": "deep",
            "on": {
                "TICK": [{"target": "green"}],
                "POWER_OUTAGE": [{"target": "off"}]
            },
            "entry": [
                {"type": "xstate.assign", "assignment": {"color": "green", "cycles": 1}},
                "startTimer"
            ],
            "after": {
                "30000": [{"target": "yellow"}],
                "EMERGENCY": [{"target": "red", "cond": "isEmergency"}]
            },
            "meta": {"description": "go"}
        })
    );
    Ok(())
}

#[test]
fn choose_and_send_actions_render() -> Result<(), AssemblyError> {
    let node = state(
        "idle",
        fragments![exit(fragments![
            choose(vec![
                choice(fragments![action("celebrate"), guard("isWinner")])?,
                choice(fragments![action("console")])?,
            ]),
            send("RESET", SendOptions { to: Some("scoreboard".into()), ..SendOptions::default() }),
        ])?],
    )?
    .node;

    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({
            "exit": [
                {
                    "type": "xstate.choose",
                    "conds": [
                        {"cond": "isWinner", "actions": ["celebrate"]},
                        {"actions": ["console"]}
                    ]
                },
                {"type": "xstate.send", "event": "RESET", "to": "scoreboard"}
            ]
        })
    );
    Ok(())
}

#[test]
fn malformed_input_reports_position() {
    let err = state("broken", fragments![id("ok"), action("misplaced")]).unwrap_err();
    assert_eq!(err.position(), 1);
    assert_eq!(
        err.to_string(),
        "unexpected `actions` fragment at position 1 in state"
    );

    let err = create_machine(fragments![
        states(vec!["a".into()]),
        parallel_states(vec!["b".into()]),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        AssemblyError::MultipleNestedStates {
            first: 0,
            second: 1
        }
    );
}

#[test]
fn reject_policy_surfaces_duplicate_ids() {
    let options = xsfp::AssemblyOptions::default().duplicate_facets(DuplicatePolicy::Reject);
    let result = create_machine_with(options, fragments![id("a"), id("b")]);
    assert!(result.is_err());

    let lenient = create_machine(fragments![id("a"), id("b")]).unwrap();
    assert_eq!(lenient.root().id.as_deref(), Some("b"));
}

#[test]
fn children_and_delays_keep_document_order() -> Result<(), AssemblyError> {
    let machine = create_machine(fragments![
        parallel_states(vec!["zeta".into(), "alpha".into()]),
        after(vec![
            delay(500u64, fragments!["zeta"])?,
            delay(1000u64, fragments!["alpha"])?,
        ]),
    ])?;

    assert_eq!(
        serde_json::to_string(&machine).unwrap(),
        r#"{"type":"parallel","states":{"zeta":{},"alpha":{}},"after":{"500":[{"target":"zeta"}],"1000":[{"target":"alpha"}]}}"#
    );
    Ok(())
}

#[test]
fn non_object_data_is_carried_verbatim() -> Result<(), AssemblyError> {
    let node = state(
        "fetching",
        fragments![invoke("svc", fragments![data(json!([1, 2, 3]))])?],
    )?
    .node;

    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({"invoke": {"src": "svc", "data": [1, 2, 3]}})
    );
    Ok(())
}

#[test]
fn assembling_twice_is_deep_equal() -> Result<(), AssemblyError> {
    let build = || -> Result<Vec<xsfp::Fragment>, AssemblyError> {
        Ok(fragments![
            id("door"),
            context(json!({"opened": 0})),
            states(vec![
                state("closed", fragments![on("OPEN", fragments!["open", guard("unlocked")])?])?,
                state("open", fragments![on("CLOSE", fragments!["closed"])?])?,
            ]),
        ])
    };

    let fragments = build()?;
    let first = create_machine(fragments.clone())?;
    let second = create_machine(fragments)?;

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    assert_eq!(
        first.root().state("closed").unwrap().transitions("OPEN"),
        Some(&[TransitionRecord::to("open").with_cond(Guard::from("unlocked"))][..])
    );
    Ok(())
}
