//! xsfp: functional builders for statechart configurations
//!
//! Machines are described as flat, ordered lists of small tagged
//! [`Fragment`]s ("this is a target", "this is an action", "this is a
//! guard"). The assembly engine folds those lists into one canonical,
//! nested configuration tree that a statechart interpreter can consume.
//!
//! Everything in this crate is pure: no I/O, no timers, no interpretation.
//!
//! # Core Concepts
//!
//! - **Fragments**: a closed set of facet kinds, see [`core::Fragment`]
//! - **Transition grouping**: guards close a group of target/action tokens
//! - **Config assembly**: nested states fold last, event tables merge,
//!   `done`/`error` events move to `onDone`/`onError`
//!
//! # Example
//!
//! ```rust
//! use xsfp::builder::{create_machine, id, on, state, states};
//! use xsfp::fragments;
//!
//! # fn main() -> Result<(), xsfp::AssemblyError> {
//! let machine = create_machine(fragments![
//!     id("toggle"),
//!     states(vec![
//!         state("inactive", fragments![on("TOGGLE", fragments!["active"])?])?,
//!         state("active", fragments![on("TOGGLE", fragments!["inactive"])?])?,
//!     ]),
//! ])?;
//!
//! assert_eq!(machine.root().initial.as_deref(), Some("inactive"));
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod builder;
pub mod core;

// Re-export commonly used types
pub use assemble::{AssemblyError, AssemblyOptions, Assembler, DuplicatePolicy};
pub use builder::MachineConfig;
pub use crate::core::{Action, FacetKey, Fragment, Guard, StateNode, TransitionRecord};
