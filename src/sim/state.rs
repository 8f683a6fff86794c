//! Simulation state and persisted snapshot types
//!
//! Everything that survives a page reload lives here.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::consts::{MAX_WEIGHT, MIN_WEIGHT};
use crate::error::SnapshotError;

/// An object resting on the plank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Weight in kg (1-10)
    pub weight: u8,
    /// Signed distance from the pivot (negative = left)
    pub distance: f64,
    /// Presentation fields (id, color, ...), carried verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlacedObject {
    pub fn new(weight: u8, distance: f64) -> Self {
        Self {
            weight,
            distance,
            extra: Map::new(),
        }
    }

    /// Attach a presentation id
    pub fn with_id(mut self, id: u64) -> Self {
        self.extra.insert("id".into(), Value::from(id));
        self
    }

    /// Attach a presentation color (any CSS color string)
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.extra.insert("color".into(), Value::String(color.into()));
        self
    }

    pub fn id(&self) -> Option<u64> {
        self.extra.get("id").and_then(Value::as_u64)
    }

    pub fn color(&self) -> Option<&str> {
        self.extra.get("color").and_then(Value::as_str)
    }

    /// Left of the pivot. Exactly zero counts as right.
    #[inline]
    pub fn is_left(&self) -> bool {
        self.distance < 0.0
    }

    /// Weight times absolute distance
    #[inline]
    pub fn torque(&self) -> f64 {
        f64::from(self.weight) * self.distance.abs()
    }
}

/// Serialized form of [`SimulationState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub objects: Vec<PlacedObject>,
    /// Missing in legacy saves. Anything that isn't a small non-negative
    /// integer reads as `None`; 0 and values above 10 are ignored on restore.
    #[serde(default, deserialize_with = "lenient_weight")]
    pub next_weight: Option<u8>,
}

/// Never fail the whole snapshot over a bad pending weight
fn lenient_weight<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|w| u8::try_from(w).ok()))
}

impl Snapshot {
    /// Parse a stored snapshot. Also accepts the legacy format, a bare
    /// array of objects.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let stored: StoredSnapshot = serde_json::from_str(json)?;
        Ok(stored.into())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSnapshot {
    Current(Snapshot),
    Legacy(Vec<PlacedObject>),
}

impl From<StoredSnapshot> for Snapshot {
    fn from(stored: StoredSnapshot) -> Self {
        match stored {
            StoredSnapshot::Current(snapshot) => snapshot,
            StoredSnapshot::Legacy(objects) => Snapshot {
                objects,
                next_weight: None,
            },
        }
    }
}

/// Objects on the plank plus the weight of the next drop
#[derive(Debug, Clone)]
pub struct SimulationState {
    objects: Vec<PlacedObject>,
    next_weight: u8,
    rng: Pcg32,
}

impl SimulationState {
    /// Empty plank with a freshly drawn next weight
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            objects: Vec::new(),
            next_weight: MIN_WEIGHT,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.generate_next_weight();
        state
    }

    /// Objects in drop order
    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn next_weight(&self) -> u8 {
        self.next_weight
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Append an object at `distance` and return it
    pub fn add_object(&mut self, weight: u8, distance: f64) -> PlacedObject {
        self.push(PlacedObject::new(weight, distance))
    }

    /// Append a pre-built object (with presentation fields) and return a copy
    pub fn push(&mut self, object: PlacedObject) -> PlacedObject {
        self.objects.push(object.clone());
        object
    }

    /// Draw a new pending weight uniformly from 1..=10
    pub fn generate_next_weight(&mut self) -> u8 {
        self.next_weight = self.rng.random_range(MIN_WEIGHT..=MAX_WEIGHT);
        self.next_weight
    }

    /// Clear the plank. The pending weight is kept.
    pub fn reset(&mut self) {
        self.objects.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            objects: self.objects.clone(),
            next_weight: Some(self.next_weight),
        }
    }

    /// Replace the objects wholesale. A valid `next_weight` replaces the
    /// pending weight; otherwise the current one is kept.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.objects = snapshot.objects;
        if let Some(weight) = snapshot
            .next_weight
            .filter(|w| (MIN_WEIGHT..=MAX_WEIGHT).contains(w))
        {
            self.next_weight = weight;
        }
    }

    /// Parse and restore. On error the state is left untouched.
    pub fn restore_json(&mut self, json: &str) -> Result<(), SnapshotError> {
        let snapshot = Snapshot::from_json(json)?;
        self.restore(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty_with_pending_weight() {
        let state = SimulationState::new(42);
        assert!(state.is_empty());
        assert!((1..=10).contains(&state.next_weight()));
    }

    #[test]
    fn test_add_object_appends_in_order() {
        let mut state = SimulationState::new(1);
        let a = state.add_object(5, -40.0);
        let b = state.add_object(3, 60.0);
        assert_eq!(a, PlacedObject::new(5, -40.0));
        assert_eq!(b.weight, 3);
        assert_eq!(state.objects(), &[a, b]);
    }

    #[test]
    fn test_generate_next_weight_range_and_coverage() {
        let mut state = SimulationState::new(7);
        let mut seen = [false; 11];
        for _ in 0..2000 {
            let w = state.generate_next_weight();
            assert!((1..=10).contains(&w));
            assert_eq!(w, state.next_weight());
            seen[w as usize] = true;
        }
        assert!(seen[1..].iter().all(|&s| s), "all weights 1-10 should appear");
    }

    #[test]
    fn test_same_seed_same_weights() {
        let mut a = SimulationState::new(99);
        let mut b = SimulationState::new(99);
        for _ in 0..20 {
            assert_eq!(a.generate_next_weight(), b.generate_next_weight());
        }
    }

    #[test]
    fn test_reset_keeps_next_weight() {
        let mut state = SimulationState::new(3);
        state.add_object(4, 10.0);
        let pending = state.next_weight();
        state.reset();
        assert!(state.is_empty());
        assert_eq!(state.next_weight(), pending);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut state = SimulationState::new(5);
        state.push(PlacedObject::new(2, -15.5).with_id(17).with_color("hsl(120, 65%, 50%)"));
        let json = state.snapshot().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["objects"][0]["weight"], 2);
        assert_eq!(value["objects"][0]["distance"], -15.5);
        assert_eq!(value["objects"][0]["id"], 17);
        assert_eq!(value["objects"][0]["color"], "hsl(120, 65%, 50%)");
        assert_eq!(value["nextWeight"], state.next_weight());
    }

    #[test]
    fn test_restore_is_verbatim() {
        let mut source = SimulationState::new(11);
        source.push(PlacedObject::new(9, 33.0).with_id(1).with_color("red"));
        source.add_object(1, -7.25);
        let json = source.snapshot().to_json().unwrap();

        let mut target = SimulationState::new(12);
        target.restore_json(&json).unwrap();
        assert_eq!(target.objects(), source.objects());
        assert_eq!(target.next_weight(), source.next_weight());
        assert_eq!(target.objects()[0].id(), Some(1));
        assert_eq!(target.objects()[0].color(), Some("red"));
    }

    #[test]
    fn test_restore_keeps_unknown_presentation_fields() {
        let json = r#"{"objects":[{"weight":4,"distance":12,"id":1700000000000,"shadow":true}],"nextWeight":6}"#;
        let mut state = SimulationState::new(0);
        state.restore_json(json).unwrap();
        let obj = &state.objects()[0];
        assert_eq!(obj.distance, 12.0);
        assert_eq!(obj.extra.get("shadow"), Some(&Value::Bool(true)));
        assert_eq!(state.next_weight(), 6);
    }

    #[test]
    fn test_restore_malformed_leaves_state_unchanged() {
        let mut state = SimulationState::new(8);
        let before_weight = state.next_weight();

        for bad in [
            r#"{"objects":"bad"}"#,
            r#"{"nextWeight":3}"#,
            r#"not json"#,
            r#"{"objects":[{"weight":"heavy","distance":1}]}"#,
            r#"42"#,
        ] {
            assert!(state.restore_json(bad).is_err(), "should reject {bad}");
            assert!(state.is_empty());
            assert_eq!(state.next_weight(), before_weight);
        }
    }

    #[test]
    fn test_restore_legacy_bare_array() {
        let mut state = SimulationState::new(2);
        let pending = state.next_weight();
        state
            .restore_json(r#"[{"weight":5,"distance":-40},{"weight":3,"distance":60}]"#)
            .unwrap();
        assert_eq!(state.objects().len(), 2);
        assert_eq!(state.next_weight(), pending);
    }

    #[test]
    fn test_restore_ignores_invalid_next_weight() {
        let mut state = SimulationState::new(4);
        let pending = state.next_weight();
        state.restore_json(r#"{"objects":[],"nextWeight":0}"#).unwrap();
        assert_eq!(state.next_weight(), pending);
        state.restore_json(r#"{"objects":[],"nextWeight":null}"#).unwrap();
        assert_eq!(state.next_weight(), pending);
        state.restore_json(r#"{"objects":[],"nextWeight":42}"#).unwrap();
        assert_eq!(state.next_weight(), pending);
    }

    #[test]
    fn test_out_of_range_next_weight_keeps_objects() {
        for bad in ["300", "-1", "5.5", "\"7\"", "true"] {
            let json = format!(
                r#"{{"objects":[{{"weight":5,"distance":-40}}],"nextWeight":{bad}}}"#
            );
            let mut state = SimulationState::new(13);
            let pending = state.next_weight();
            state.restore_json(&json).unwrap();
            assert_eq!(state.objects(), &[PlacedObject::new(5, -40.0)], "nextWeight {bad}");
            assert_eq!(state.next_weight(), pending);
        }
    }

    #[test]
    fn test_zero_distance_is_right() {
        let obj = PlacedObject::new(3, 0.0);
        assert!(!obj.is_left());
        assert_eq!(obj.torque(), 0.0);
        assert!(PlacedObject::new(3, -0.5).is_left());
    }
}
