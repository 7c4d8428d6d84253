//! Assembly options.

use serde::{Deserialize, Serialize};

/// What to do when one node receives the same facet twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Later fragment wins silently.
    Overwrite,
    /// Later fragment wins; a warning is logged.
    #[default]
    Warn,
    /// Fail with [`AssemblyError::DuplicateFacet`](crate::AssemblyError::DuplicateFacet).
    Reject,
}

/// Options controlling the config assembler.
///
/// Deserializable with defaults for every field, so it can be embedded in
/// a larger settings file:
///
/// ```rust
/// use xsfp::{AssemblyOptions, DuplicatePolicy};
///
/// let options: AssemblyOptions =
///     serde_json::from_str(r#"{"duplicate_facets": "reject"}"#).unwrap();
///
/// assert_eq!(options.duplicate_facets, DuplicatePolicy::Reject);
/// assert!(options.relocate_reserved_events);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    pub duplicate_facets: DuplicatePolicy,
    /// Move `done`/`error` events from `on` to `onDone`/`onError`.
    pub relocate_reserved_events: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            duplicate_facets: DuplicatePolicy::default(),
            relocate_reserved_events: true,
        }
    }
}

impl AssemblyOptions {
    pub fn duplicate_facets(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_facets = policy;
        self
    }

    pub fn relocate_reserved_events(mut self, enabled: bool) -> Self {
        self.relocate_reserved_events = enabled;
        self
    }
}
