//! Fetch User
//!
//! This example invokes a service and routes its completion through
//! `done`/`error` events.
//!
//! Key concepts:
//! - `on("done")` / `on("error")` relocated to `onDone` / `onError`
//! - Guarded alternatives in one flat transition run
//! - Delayed transitions with `after`
//!
//! Run with: cargo run --example fetch_user

use serde_json::json;
use xsfp::builder::*;
use xsfp::fragments;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Fetch User ===\n");

    let machine = create_machine(fragments![
        id("user"),
        context(json!({"user": null, "retries": 0})),
        states(vec![
            state("idle", fragments![on("FETCH", fragments!["loading"])?])?,
            state(
                "loading",
                fragments![
                    invoke(
                        "fetchUser",
                        fragments![
                            data(json!({"userId": 42})),
                            on("done", fragments!["success", action("storeUser")])?,
                            on("error", fragments!["failure"])?,
                        ]
                    )?,
                    after(vec![delay(5000u64, fragments!["failure"])?]),
                ]
            )?,
            state(
                "failure",
                fragments![on(
                    "RETRY",
                    fragments![
                        "loading",
                        action("countRetry"),
                        guard("canRetry"),
                        "idle",
                    ]
                )?]
            )?,
            final_state("success"),
        ]),
    ])?;

    let loading = machine.root().state("loading");
    println!(
        "loading.invoke: {}\n",
        serde_json::to_string(&loading.and_then(|node| node.invoke.as_ref()))?
    );

    println!("Full configuration:");
    println!("{:#}", machine.to_json()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
