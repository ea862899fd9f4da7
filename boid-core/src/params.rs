//! Flock-wide parameters and per-boid tuning.
//!
//! Both come with a patch type whose fields are all optional. Merging a patch
//! overwrites only the supplied fields, so an empty patch is a no-op. Values are
//! not validated: negative distances or weights are the caller's responsibility.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Neighbor radii and behavior weights shared by the whole flock
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlockParams {
    pub separation_distance: f32,
    pub alignment_distance: f32,
    pub cohesion_distance: f32,
    pub separation_force: f32,
    pub alignment_force: f32,
    pub cohesion_force: f32,
    pub boundary_radius: f32,
    pub boundary_force: f32,
    pub attraction_distance: f32,
    pub attraction_force: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            separation_distance: 0.8,
            alignment_distance: 1.5,
            cohesion_distance: 1.8,
            separation_force: 1.0,
            alignment_force: 0.6,
            cohesion_force: 0.5,
            boundary_radius: 5.0,
            boundary_force: 0.2,
            attraction_distance: 3.0,
            attraction_force: 1.5,
        }
    }
}

/// Partial update for [`FlockParams`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParamsPatch {
    pub separation_distance: Option<f32>,
    pub alignment_distance: Option<f32>,
    pub cohesion_distance: Option<f32>,
    pub separation_force: Option<f32>,
    pub alignment_force: Option<f32>,
    pub cohesion_force: Option<f32>,
    pub boundary_radius: Option<f32>,
    pub boundary_force: Option<f32>,
    pub attraction_distance: Option<f32>,
    pub attraction_force: Option<f32>,
}

impl ParamsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FlockParams {
    /// Overwrite the fields present in `patch`, leaving the rest untouched
    pub fn merge(&mut self, patch: &ParamsPatch) {
        merge_field(&mut self.separation_distance, patch.separation_distance);
        merge_field(&mut self.alignment_distance, patch.alignment_distance);
        merge_field(&mut self.cohesion_distance, patch.cohesion_distance);
        merge_field(&mut self.separation_force, patch.separation_force);
        merge_field(&mut self.alignment_force, patch.alignment_force);
        merge_field(&mut self.cohesion_force, patch.cohesion_force);
        merge_field(&mut self.boundary_radius, patch.boundary_radius);
        merge_field(&mut self.boundary_force, patch.boundary_force);
        merge_field(&mut self.attraction_distance, patch.attraction_distance);
        merge_field(&mut self.attraction_force, patch.attraction_force);
    }
}

/// Kinematic limits carried by every boid
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoidTuning {
    pub max_speed: f32,
    pub max_force: f32,
    /// Blend weight toward the previous velocity, in `[0, 1]`
    pub smoothing_factor: f32,
}

impl Default for BoidTuning {
    fn default() -> Self {
        Self {
            max_speed: 0.04,
            max_force: 0.005,
            smoothing_factor: 0.8,
        }
    }
}

/// Partial update for [`BoidTuning`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TuningPatch {
    pub max_speed: Option<f32>,
    pub max_force: Option<f32>,
    pub smoothing_factor: Option<f32>,
}

impl TuningPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl BoidTuning {
    pub fn merge(&mut self, patch: &TuningPatch) {
        merge_field(&mut self.max_speed, patch.max_speed);
        merge_field(&mut self.max_force, patch.max_force);
        merge_field(&mut self.smoothing_factor, patch.smoothing_factor);
    }
}

fn merge_field(field: &mut f32, value: Option<f32>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_is_noop() {
        let mut params = FlockParams::default();
        params.cohesion_force = 0.9;
        let before = params;

        params.merge(&ParamsPatch::default());
        assert_eq!(params, before);

        let mut tuning = BoidTuning::default();
        tuning.merge(&TuningPatch::default());
        assert_eq!(tuning, BoidTuning::default());
    }

    #[test]
    fn test_patch_overwrites_only_supplied_fields() {
        let mut params = FlockParams::default();
        params.merge(&ParamsPatch {
            boundary_radius: Some(8.0),
            attraction_force: Some(2.5),
            ..Default::default()
        });

        assert_eq!(params.boundary_radius, 8.0);
        assert_eq!(params.attraction_force, 2.5);
        assert_eq!(params.separation_distance, 0.8);
        assert_eq!(params.cohesion_force, 0.5);
    }

    #[test]
    fn test_negative_values_are_not_clamped() {
        let mut tuning = BoidTuning::default();
        tuning.merge(&TuningPatch {
            max_speed: Some(-1.0),
            ..Default::default()
        });
        assert_eq!(tuning.max_speed, -1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_patch_from_partial_json() {
        let patch: ParamsPatch = serde_json::from_str(r#"{"cohesion_distance": 2.2}"#).unwrap();
        assert_eq!(patch.cohesion_distance, Some(2.2));
        assert_eq!(patch.separation_force, None);

        let empty: ParamsPatch = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
