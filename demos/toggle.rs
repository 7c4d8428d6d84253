//! Toggle Machine
//!
//! This example builds the classic two-state toggle from fragments and
//! prints the assembled configuration.
//!
//! Key concepts:
//! - Bare strings as transition targets
//! - First listed state becomes the initial state
//! - Entry/exit actions and assign merging
//!
//! Run with: cargo run --example toggle

use serde_json::json;
use xsfp::builder::*;
use xsfp::fragments;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Toggle Machine ===\n");

    let machine = create_machine(fragments![
        id("toggle"),
        context(json!({"count": 0})),
        states(vec![
            state("inactive", fragments![on("TOGGLE", fragments!["active"])?])?,
            state(
                "active",
                fragments![
                    entry(fragments![merge_actions(vec![
                        assign(json!({"count": 1})),
                        action("notifyActive"),
                        assign(json!({"lastToggle": "on"})),
                    ])?])?,
                    exit(fragments![action("notifyInactive")])?,
                    on("TOGGLE", fragments!["inactive"])?,
                ]
            )?,
        ]),
    ])?;

    println!("Initial state: {:?}\n", machine.root().initial);

    println!("{:#}", machine.to_json()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
