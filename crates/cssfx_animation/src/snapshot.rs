//! Serializable animation snapshot
//!
//! The durable interchange shape:
//!
//! ```json
//! {
//!   "filters": [{ "name": "sepia", "type": "sepia", "active": true }],
//!   "keyframes": [{ "time": 0, "value": { "sepia": { "amount": 0 } } }],
//!   "duration": 1000
//! }
//! ```

use crate::config::DEFAULT_DURATION;
use crate::error::Result;
use cssfx_core::{FilterEntry, KeyframeValue};
use serde::{Deserialize, Serialize};

/// One stored keyframe
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyframeEntry {
    pub time: f32,
    #[serde(default)]
    pub value: KeyframeValue,
}

/// Everything needed to rebuild an animation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationSnapshot {
    #[serde(default)]
    pub filters: Vec<FilterEntry>,
    #[serde(default)]
    pub keyframes: Vec<KeyframeEntry>,
    #[serde(default = "default_duration")]
    pub duration: f32,
}

fn default_duration() -> f32 {
    DEFAULT_DURATION
}

impl Default for AnimationSnapshot {
    /// No filters, no keyframes, default duration
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            keyframes: Vec::new(),
            duration: DEFAULT_DURATION,
        }
    }
}

impl AnimationSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssfx_core::ParamValue;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = AnimationSnapshot::from_json(
            r#"{
                "filters": [{"name": "sepia", "type": "sepia", "active": true}],
                "keyframes": [
                    {"time": 0, "value": {"sepia": {"amount": 0}}},
                    {"time": 500, "value": {"sepia": {"amount": 80}}}
                ],
                "duration": 2000
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.filters.len(), 1);
        assert_eq!(snapshot.keyframes[1].time, 500.0);
        assert_eq!(
            snapshot.keyframes[1].value["sepia"]["amount"],
            ParamValue::Number(80.0)
        );
        assert_eq!(snapshot.duration, 2000.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let snapshot = AnimationSnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, AnimationSnapshot::default());
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = AnimationSnapshot::from_json(
            r#"{"filters": [{"name": "blur", "type": "blur", "active": false}],
                "keyframes": [{"time": 250, "value": {"blur": {"radius": 3.5}}}],
                "duration": 1000}"#,
        )
        .unwrap();

        let json = snapshot.to_json().unwrap();
        assert_eq!(AnimationSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(AnimationSnapshot::from_json("{\"filters\": 3}").is_err());
    }
}
