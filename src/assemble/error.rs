//! Assembly errors.

use crate::core::{FacetKey, Fragment};
use thiserror::Error;

/// Errors raised on malformed fragment input.
///
/// Assembly performs no semantic validation; these only describe input
/// the engine cannot interpret at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("unexpected `{facet}` fragment at position {position} in {context}")]
    UnexpectedFragment {
        facet: FacetKey,
        position: usize,
        context: &'static str,
    },

    #[error("more than one nested-states fragment: positions {first} and {second}")]
    MultipleNestedStates { first: usize, second: usize },

    #[error("duplicate `{facet}` fragment at position {position} in {context}")]
    DuplicateFacet {
        facet: FacetKey,
        position: usize,
        context: &'static str,
    },
}

impl AssemblyError {
    pub(crate) fn unexpected(fragment: &Fragment, position: usize, context: &'static str) -> Self {
        Self::UnexpectedFragment {
            facet: fragment.facet(),
            position,
            context,
        }
    }

    /// Position of the offending fragment in its input list.
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedFragment { position, .. } | Self::DuplicateFacet { position, .. } => {
                *position
            }
            Self::MultipleNestedStates { second, .. } => *second,
        }
    }
}
