//! Fragment assembly engine.
//!
//! Three pure, synchronous steps turn fragment lists into configuration:
//! - [`merge`]: action/guard extraction and assign/event-table merging
//! - [`transitions`]: grouping target/action/guard runs into records
//! - [`config`]: folding a node's fragments into one canonical node
//!
//! No step validates semantics; only input the engine cannot interpret is
//! reported, as an [`AssemblyError`] naming the offending position.

pub mod config;
pub mod error;
pub mod merge;
pub mod options;
pub mod transitions;

pub use config::{assemble, Assembler, ConfigNode, DONE_EVENT, ERROR_EVENT};
pub use error::AssemblyError;
pub use merge::{
    extract_actions, extract_guards, flatten_actions, merge_actions, merge_assigns,
    merge_event_tables, union_event_tables,
};
pub use options::{AssemblyOptions, DuplicatePolicy};
pub use transitions::{group_tokens, group_transitions};
