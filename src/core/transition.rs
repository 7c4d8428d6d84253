//! Transition records: the unit of an event table entry.

use crate::core::action::Action;
use crate::core::guard::Guard;
use serde::Serialize;

/// One candidate transition for an event.
///
/// Records for the same event are tried in order by the interpreter; the
/// first whose guard passes (or which has no guard) wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TransitionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cond: Option<Guard>,
}

impl TransitionRecord {
    /// Unguarded record with only a target.
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn is_guarded(&self) -> bool {
        self.cond.is_some()
    }

    /// Return the record with `action` appended to its action list.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.get_or_insert_with(Vec::new).push(action);
        self
    }

    /// Return the record guarded by `cond`.
    pub fn with_cond(mut self, cond: Guard) -> Self {
        self.cond = Some(cond);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_record_serializes_as_empty_object() {
        let record = TransitionRecord::default();
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({}));
    }

    #[test]
    fn record_serializes_set_fields_only() {
        let record = TransitionRecord::to("active")
            .with_action(Action::from("notify"))
            .with_cond(Guard::from("isReady"));

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"target": "active", "actions": ["notify"], "cond": "isReady"})
        );
        assert!(record.is_guarded());
    }

    #[test]
    fn actions_preserve_encounter_order() {
        let record = TransitionRecord::default()
            .with_action(Action::from("first"))
            .with_action(Action::from("second"));

        assert_eq!(
            record.actions,
            Some(vec![Action::from("first"), Action::from("second")])
        );
        assert!(!record.is_guarded());
    }
}
