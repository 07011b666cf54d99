//! Data-driven game balance
//!
//! Knobs a designer can override from a JSON file without touching code.
//! Defaults match the shipped farm.

use serde::{Deserialize, Serialize};

/// Game balance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player walk speed in world units per second
    pub move_speed: f32,
    /// Length of an in-game day in seconds
    pub day_length: f32,
    /// Waterings in a freshly drawn can
    pub can_charges: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 40.0,
            day_length: 90.0,
            can_charges: 9,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; malformed input logs a warning and
    /// falls back to the defaults.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("could not parse tuning ({err}), using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let tuning = Tuning::from_json(r#"{ "day_length": 45.0 }"#);
        assert_eq!(tuning.day_length, 45.0);
        assert_eq!(tuning.move_speed, Tuning::default().move_speed);
        assert_eq!(tuning.can_charges, Tuning::default().can_charges);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let tuning = Tuning::from_json("not json at all");
        assert_eq!(tuning.move_speed, Tuning::default().move_speed);
    }

    #[test]
    fn test_round_trip() {
        let tuning = Tuning { move_speed: 55.0, day_length: 60.0, can_charges: 4 };
        let json = serde_json::to_string(&tuning).unwrap();
        let back = Tuning::from_json(&json);
        assert_eq!(back.move_speed, 55.0);
        assert_eq!(back.day_length, 60.0);
        assert_eq!(back.can_charges, 4);
    }
}
