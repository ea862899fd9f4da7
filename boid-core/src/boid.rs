use glam::{Mat3, Quat, Vec3};
use rand::Rng;

use crate::behavior;
use crate::color::{Color, Highlight};
use crate::params::{BoidTuning, FlockParams};

/// Squared magnitude under which acceleration and velocity count as zero
pub const STILLNESS_EPSILON: f32 = 1e-5;

/// Speed given to freshly spawned boids
pub const INITIAL_SPEED: f32 = 0.02;

/// Default blend weight toward the previous orientation
pub const ROTATION_SMOOTHING: f32 = 0.85;

/// Axis-aligned box in which new boids are spawned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for SpawnVolume {
    fn default() -> Self {
        Self {
            min: Vec3::new(-3.0, 1.0, -3.0),
            max: Vec3::new(3.0, 4.0, 3.0),
        }
    }
}

impl SpawnVolume {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let t = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        self.min + (self.max - self.min) * t
    }
}

/// Net steering computed for one boid during the force phase
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steering {
    pub force: Vec3,
    /// Strength of the nearest attraction point in range, if any
    pub attraction: Option<f32>,
}

/// A single boid entity
#[derive(Debug, Clone)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub previous_velocity: Vec3,
    pub orientation: Quat,
    pub max_speed: f32,
    pub max_force: f32,
    pub smoothing_factor: f32,
    pub rotation_smoothing: f32,
    pub base_color: Color,
    pub attraction: Option<f32>,
}

impl Boid {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        let tuning = BoidTuning::default();
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            previous_velocity: velocity,
            orientation: Quat::IDENTITY,
            max_speed: tuning.max_speed,
            max_force: tuning.max_force,
            smoothing_factor: tuning.smoothing_factor,
            rotation_smoothing: ROTATION_SMOOTHING,
            base_color: Color::default(),
            attraction: None,
        }
    }

    /// Random position inside `volume`, random heading at [`INITIAL_SPEED`], random hue
    pub fn random<R: Rng + ?Sized>(rng: &mut R, volume: &SpawnVolume) -> Self {
        let position = volume.sample(rng);
        let heading = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let velocity = heading.try_normalize().unwrap_or(Vec3::Z) * INITIAL_SPEED;
        let color = Color::from_hsl(rng.gen(), 0.8, 0.5);

        Self::new(position, velocity).with_color(color)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    pub fn apply_tuning(&mut self, tuning: &BoidTuning) {
        self.max_speed = tuning.max_speed;
        self.max_force = tuning.max_force;
        self.smoothing_factor = tuning.smoothing_factor;
    }

    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// Weighted sum of every behavior against a read-only view of the flock.
    ///
    /// Attraction is only evaluated when at least one point exists.
    pub fn steering<'a, I, P>(&self, others: I, params: &FlockParams, points: P) -> Steering
    where
        I: IntoIterator<Item = &'a Boid>,
        I::IntoIter: Clone,
        P: IntoIterator<Item = Vec3>,
    {
        let others = others.into_iter();

        let separation = behavior::separation(self, others.clone(), params.separation_distance);
        let alignment = behavior::alignment(self, others.clone(), params.alignment_distance);
        let cohesion = behavior::cohesion(self, others, params.cohesion_distance);
        let boundary = behavior::boundary(self, params.boundary_radius);

        let mut force = separation * params.separation_force
            + alignment * params.alignment_force
            + cohesion * params.cohesion_force
            + boundary * params.boundary_force;

        let mut points = points.into_iter().peekable();
        let pull = if points.peek().is_some() {
            behavior::attraction(self, points, params.attraction_distance)
        } else {
            None
        };

        if let Some(pull) = pull {
            force += pull.force * params.attraction_force;
        }

        Steering {
            force,
            attraction: pull.map(|pull| pull.strength),
        }
    }

    /// Add this frame's steering into the accumulator and record the attraction state
    pub fn accumulate(&mut self, steering: Steering) {
        self.apply_force(steering.force);
        self.attraction = steering.attraction;
    }

    /// Advance one frame: integrate acceleration, smooth velocity, move, re-orient
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.clamp_length_max(self.max_speed);

        // Low-pass toward the previous frame's velocity
        self.velocity = self
            .velocity
            .lerp(self.previous_velocity, self.smoothing_factor);
        self.previous_velocity = self.velocity;

        if self.acceleration.length_squared() < STILLNESS_EPSILON {
            self.acceleration = Vec3::ZERO;
        }

        self.position += self.velocity;
        self.acceleration = Vec3::ZERO;

        if self.velocity.length_squared() > STILLNESS_EPSILON {
            let target = facing(self.velocity);
            self.orientation = self
                .orientation
                .slerp(target, 1.0 - self.rotation_smoothing)
                .normalize();
        }
    }

    /// Direction of travel, or zero when stationary
    pub fn heading(&self) -> Vec3 {
        self.velocity.normalize_or_zero()
    }

    pub fn highlight(&self) -> Highlight {
        Highlight::new(self.base_color, self.attraction)
    }
}

/// Rotation turning local +Z toward `direction`, keeping +Y as up where possible
pub fn facing(direction: Vec3) -> Quat {
    let forward = direction.normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }

    match Vec3::Y.cross(forward).try_normalize() {
        Some(right) => {
            let up = forward.cross(right);
            Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize()
        }
        // Straight up or down: no unique up vector
        None => Quat::from_rotation_arc(Vec3::Z, forward),
    }
}
