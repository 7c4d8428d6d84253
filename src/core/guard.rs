//! Guard references attached to transition records.
//!
//! Guards select among competing transition records for one event. This
//! crate never evaluates them; it only carries them into the configuration
//! tree where the interpreter picks them up.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Wire `type` tag for inline predicate guards.
pub const GUARD_TYPE: &str = "xstate.guard";

/// Type alias for guard predicate functions over `(context, event)`.
pub type PredicateFn = dyn Fn(&Value, &Value) -> bool + Send + Sync;

/// Named, pure predicate evaluated by the interpreter at dispatch time.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use xsfp::core::Predicate;
///
/// let has_items = Predicate::new("hasItems", |ctx, _event| {
///     ctx["items"].as_array().is_some_and(|items| !items.is_empty())
/// });
///
/// assert!(has_items.check(&json!({"items": [1]}), &json!(null)));
/// assert!(!has_items.check(&json!({"items": []}), &json!(null)));
/// ```
#[derive(Clone)]
pub struct Predicate {
    name: String,
    predicate: Arc<PredicateFn>,
}

impl Predicate {
    /// Create a predicate from a pure function.
    ///
    /// The function must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the predicate against a context and an event.
    pub fn check(&self, context: &Value, event: &Value) -> bool {
        (self.predicate)(context, event)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("name", &self.name).finish()
    }
}

/// Two predicates are equal only when they share the same function.
impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

/// Opaque guard reference carried on a transition record.
#[derive(Clone, Debug, PartialEq)]
pub enum Guard {
    /// Guard implemented by the interpreter under this name.
    Named(String),
    /// Inline predicate.
    Predicate(Predicate),
}

impl Guard {
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Predicate(predicate) => predicate.name(),
        }
    }
}

impl From<&str> for Guard {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for Guard {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Predicate> for Guard {
    fn from(predicate: Predicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl Serialize for Guard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(name) => serializer.serialize_str(name),
            Self::Predicate(predicate) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", GUARD_TYPE)?;
                map.serialize_entry("name", predicate.name())?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn predicate_checks_context_and_event() {
        let guard = Predicate::new("isAdmin", |ctx, event| {
            ctx["role"] == "admin" && event["type"] == "DELETE"
        });

        assert!(guard.check(&json!({"role": "admin"}), &json!({"type": "DELETE"})));
        assert!(!guard.check(&json!({"role": "user"}), &json!({"type": "DELETE"})));
    }

    #[test]
    fn predicate_is_deterministic() {
        let guard = Predicate::new("positive", |ctx, _| ctx["n"].as_i64() > Some(0));
        let ctx = json!({"n": 3});

        assert_eq!(guard.check(&ctx, &Value::Null), guard.check(&ctx, &Value::Null));
    }

    #[test]
    fn predicate_equality_is_by_identity() {
        let a = Predicate::new("same", |_, _| true);
        let b = Predicate::new("same", |_, _| true);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn named_guard_serializes_as_string() {
        let guard = Guard::from("canSubmit");
        assert_eq!(serde_json::to_value(&guard).unwrap(), json!("canSubmit"));
    }

    #[test]
    fn predicate_guard_serializes_with_type_tag() {
        let guard = Guard::from(Predicate::new("isValid", |_, _| true));
        assert_eq!(
            serde_json::to_value(&guard).unwrap(),
            json!({"type": "xstate.guard", "name": "isValid"})
        );
        assert_eq!(guard.name(), "isValid");
    }
}
