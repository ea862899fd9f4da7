//! Steering behaviors.
//!
//! Every behavior returns an unweighted force whose magnitude never exceeds the
//! boid's `max_force`. Neighbor scans are exhaustive: `others` is normally the
//! whole flock, and the boid itself drops out through the `distance > 0` test.

use glam::Vec3;

use crate::Boid;

/// Force and strength produced by the nearest attraction point in range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    pub force: Vec3,
    /// In `[ATTRACTION_MIN_STRENGTH, 1.0]`, larger when closer
    pub strength: f32,
}

/// Floor applied to the attraction strength at the edge of the attraction range
pub const ATTRACTION_MIN_STRENGTH: f32 = 0.1;

/// Reynolds rule: desired velocity along `direction` at `speed`, minus the
/// current velocity, clamped to `max_force`.
///
/// A zero `direction` yields a desired velocity of zero rather than NaN.
pub fn steer(boid: &Boid, direction: Vec3, speed: f32) -> Vec3 {
    let desired = direction.normalize_or_zero() * speed;
    (desired - boid.velocity).clamp_length_max(boid.max_force)
}

pub fn separation<'a, I>(boid: &Boid, others: I, radius: f32) -> Vec3
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut steering = Vec3::ZERO;
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(other.position);
        if distance > 0.0 && distance < radius {
            // Closer neighbors push harder
            let away = (boid.position - other.position).normalize_or_zero() / distance;
            steering += away;
            count += 1;
        }
    }

    if count > 0 {
        steering /= count as f32;
    }

    if steering.length_squared() > 0.0 {
        steering = steer(boid, steering, boid.max_speed);
    }

    steering
}

pub fn alignment<'a, I>(boid: &Boid, others: I, radius: f32) -> Vec3
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vec3::ZERO;
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(other.position);
        if distance > 0.0 && distance < radius {
            sum += other.velocity;
            count += 1;
        }
    }

    if count > 0 {
        steer(boid, sum / count as f32, boid.max_speed)
    } else {
        Vec3::ZERO
    }
}

pub fn cohesion<'a, I>(boid: &Boid, others: I, radius: f32) -> Vec3
where
    I: IntoIterator<Item = &'a Boid>,
{
    let mut sum = Vec3::ZERO;
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(other.position);
        if distance > 0.0 && distance < radius {
            sum += other.position;
            count += 1;
        }
    }

    if count > 0 {
        seek(boid, sum / count as f32)
    } else {
        Vec3::ZERO
    }
}

pub fn seek(boid: &Boid, target: Vec3) -> Vec3 {
    steer(boid, target - boid.position, boid.max_speed)
}

/// Soft containment: steer back toward the origin once outside `radius`
pub fn boundary(boid: &Boid, radius: f32) -> Vec3 {
    if boid.position.length() > radius {
        steer(boid, -boid.position, boid.max_speed)
    } else {
        Vec3::ZERO
    }
}

/// Strength of the pull from a point `distance` away, or `None` when out of range
pub fn attraction_strength(distance: f32, radius: f32) -> Option<f32> {
    if distance < radius {
        Some((1.0 - distance / radius).clamp(ATTRACTION_MIN_STRENGTH, 1.0))
    } else {
        None
    }
}

/// Steer toward the single nearest attraction point, if it lies within `radius`
pub fn attraction<I>(boid: &Boid, points: I, radius: f32) -> Option<Attraction>
where
    I: IntoIterator<Item = Vec3>,
{
    let (closest, distance) = points
        .into_iter()
        .map(|point| (point, boid.position.distance(point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    let strength = attraction_strength(distance, radius)?;
    let force = steer(boid, closest - boid.position, boid.max_speed * strength);

    Some(Attraction { force, strength })
}
