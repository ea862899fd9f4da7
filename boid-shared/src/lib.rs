use boid_core::{Boid, Flock, ParamsPatch, TuningPatch, Vec3};
use serde::{Deserialize, Serialize};

/// Represents a 3D position in world coordinates (meters)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Calculate distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        Vec3::from(*self).distance(Vec3::from(*other))
    }
}

impl From<Position> for Vec3 {
    fn from(position: Position) -> Self {
        Vec3::new(position.x, position.y, position.z)
    }
}

impl From<Vec3> for Position {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Which tracked hand produced an event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
}

impl std::str::FromStr for Handedness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(format!("unknown hand '{}'", other)),
        }
    }
}

/// Phase of an attraction gesture
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttractionEventKind {
    Start { position: Position },
    Move { position: Position },
    End,
}

/// Timestamped attraction update from an interaction source, e.g. a pinching hand
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AttractionEvent {
    pub source: Handedness,
    #[serde(default)]
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: AttractionEventKind,
}

/// Partial settings update, typically from a UI panel
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsUpdate {
    pub params: ParamsPatch,
    pub tuning: TuningPatch,
}

impl SettingsUpdate {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn apply(&self, flock: &mut Flock) {
        if !self.params.is_empty() {
            flock.set_parameters(&self.params);
        }
        if !self.tuning.is_empty() {
            flock.set_tuning(&self.tuning);
        }
    }
}

/// Render-facing state of one boid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoidState {
    pub position: Position,
    pub velocity: Position,
    /// Quaternion as `[x, y, z, w]`
    pub orientation: [f32; 4],
    pub attraction: Option<f32>,
}

impl From<&Boid> for BoidState {
    fn from(boid: &Boid) -> Self {
        Self {
            position: boid.position.into(),
            velocity: boid.velocity.into(),
            orientation: boid.orientation.to_array(),
            attraction: boid.attraction,
        }
    }
}

/// State of the whole flock after a frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub boids: Vec<BoidState>,
    pub attraction_points: Vec<Position>,
}

impl FrameSnapshot {
    pub fn capture(frame: u64, flock: &Flock) -> Self {
        Self {
            frame,
            boids: flock.boids().iter().map(BoidState::from).collect(),
            attraction_points: flock.attraction_points().iter().map(Position::from).collect(),
        }
    }
}

/// Aggregate flock statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlockStats {
    pub boid_count: usize,
    pub attraction_points: usize,
    /// Boids currently within range of an attraction point
    pub attracted: usize,
    pub mean_speed: f32,
    pub max_speed: f32,
}

impl FlockStats {
    pub fn from_flock(flock: &Flock) -> Self {
        let boids = flock.boids();
        let speeds = boids.iter().map(|boid| boid.velocity.length());
        let total: f32 = speeds.clone().sum();

        Self {
            boid_count: boids.len(),
            attraction_points: flock.attraction_points().len(),
            attracted: boids.iter().filter(|boid| boid.attraction.is_some()).count(),
            mean_speed: if boids.is_empty() {
                0.0
            } else {
                total / boids.len() as f32
            },
            max_speed: speeds.fold(0.0, f32::max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_distance() {
        let p1 = Position::new(0.0, 0.0, 0.0);
        let p2 = Position::new(2.0, 3.0, 6.0);
        assert_eq!(p1.distance_to(&p2), 7.0);
    }

    #[test]
    fn test_attraction_event_json() {
        let event: AttractionEvent = serde_json::from_str(
            r#"{"source":"left","timestamp_ms":120,"type":"start","position":{"x":0.1,"y":1.2,"z":-0.3}}"#,
        )
        .unwrap();

        assert_eq!(event.source, Handedness::Left);
        assert_eq!(event.timestamp_ms, 120);
        assert_eq!(
            event.kind,
            AttractionEventKind::Start {
                position: Position::new(0.1, 1.2, -0.3)
            }
        );

        let end: AttractionEvent = serde_json::from_str(r#"{"source":"right","type":"end"}"#).unwrap();
        assert_eq!(end.kind, AttractionEventKind::End);
        assert_eq!(end.timestamp_ms, 0);
    }

    #[test]
    fn test_handedness_from_str() {
        assert_eq!("Left".parse::<Handedness>(), Ok(Handedness::Left));
        assert_eq!("right".parse::<Handedness>(), Ok(Handedness::Right));
        assert!("both".parse::<Handedness>().is_err());
    }

    #[test]
    fn test_settings_update_partial() {
        let update = SettingsUpdate::from_json(r#"{"params":{"boundary_radius":7.5}}"#).unwrap();
        assert_eq!(update.params.boundary_radius, Some(7.5));
        assert!(update.tuning.is_empty());

        let mut flock = Flock::new(3);
        update.apply(&mut flock);
        assert_eq!(flock.params().boundary_radius, 7.5);
        assert_eq!(flock.params().separation_distance, 0.8);
    }

    #[test]
    fn test_empty_settings_change_nothing() {
        let mut flock = Flock::new(3);
        let params = *flock.params();
        let tuning = *flock.tuning();

        SettingsUpdate::from_json("{}").unwrap().apply(&mut flock);
        assert_eq!(*flock.params(), params);
        assert_eq!(*flock.tuning(), tuning);
    }

    #[test]
    fn test_snapshot_and_stats() {
        let mut flock = Flock::new(8);
        flock.add_attraction_point(Vec3::new(0.0, 2.0, 0.0));
        flock.update();

        let snapshot = FrameSnapshot::capture(1, &flock);
        assert_eq!(snapshot.boids.len(), 8);
        assert_eq!(snapshot.attraction_points, vec![Position::new(0.0, 2.0, 0.0)]);

        let stats = FlockStats::from_flock(&flock);
        assert_eq!(stats.boid_count, 8);
        assert_eq!(stats.attraction_points, 1);
        assert!(stats.max_speed <= flock.tuning().max_speed + 1e-6);
        assert!(stats.mean_speed <= stats.max_speed);
    }
}
