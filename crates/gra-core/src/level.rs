//! Abstraction levels and their goals
//!
//! Static metadata only. A [`Level`] index is the weighting exponent and the
//! foam-grouping key; a [`Goal`] documents intent for that level.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One abstraction level of the multiverse
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Level {
    /// Weighting exponent and grouping key
    pub index: u32,
    /// Human-readable name
    pub name: String,
}

impl Level {
    /// Create new level
    #[inline]
    #[must_use]
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// Check if this is the local (level 0) tier
    #[inline]
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.index == 0
    }
}

/// Goal attached to a level
///
/// Carries no behavior in the engine. `payload` holds arbitrary
/// task-specific constraints for callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Level this goal belongs to
    pub level: Level,
    /// Free-form description
    pub description: String,
    /// Optional task-specific data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
}

impl Goal {
    /// Create goal without payload
    #[inline]
    #[must_use]
    pub fn new(level: Level, description: impl Into<String>) -> Self {
        Self {
            level,
            description: description.into(),
            payload: None,
        }
    }

    /// With payload
    #[inline]
    #[must_use]
    pub fn with_payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Look up one payload entry
    #[inline]
    #[must_use]
    pub fn payload_value(&self, key: &str) -> Option<&Value> {
        self.payload.as_ref().and_then(|p| p.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn level_new() {
        let level = Level::new(0, "local");
        assert!(level.is_local());
        assert!(!Level::new(2, "meta").is_local());
    }

    #[test]
    fn goal_payload_lookup() {
        let mut payload = Map::new();
        payload.insert("max_latency_ms".to_string(), json!(250));

        let goal = Goal::new(Level::new(1, "meta"), "stability").with_payload(payload);
        assert_eq!(goal.payload_value("max_latency_ms"), Some(&json!(250)));
        assert!(goal.payload_value("missing").is_none());
        assert!(Goal::new(Level::new(0, "l"), "d").payload_value("x").is_none());
    }

    #[test]
    fn goal_roundtrips_through_json() {
        let goal = Goal::new(Level::new(1, "meta"), "meta goal: max_consistency");
        let text = serde_json::to_string(&goal).unwrap();
        assert!(!text.contains("payload"));

        let back: Goal = serde_json::from_str(&text).unwrap();
        assert_eq!(back, goal);
    }
}
