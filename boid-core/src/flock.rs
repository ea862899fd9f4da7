use glam::Vec3;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::attraction::{AttractionHandle, AttractionPoints};
use crate::boid::{Boid, SpawnVolume, Steering};
use crate::params::{BoidTuning, FlockParams, ParamsPatch, TuningPatch};

/// Farthest distance at which [`Flock::nearest_boid`] reports a match
pub const NEAREST_BOID_CUTOFF: f32 = 1.0;

/// Owns the boids, the shared parameters and the active attraction points.
///
/// Every mutating method takes `&mut self`, so parameter and attraction point
/// changes can only land between frames.
#[derive(Debug, Clone, Default)]
pub struct Flock {
    boids: Vec<Boid>,
    params: FlockParams,
    tuning: BoidTuning,
    attraction_points: AttractionPoints,
    pub spawn: SpawnVolume,
}

impl Flock {
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut flock = Self::default();
        flock.add_boids_with_rng(count, rng);
        flock
    }

    pub fn add_boids(&mut self, count: usize) {
        self.add_boids_with_rng(count, &mut rand::thread_rng());
    }

    pub fn add_boids_with_rng<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.boids.reserve(count);
        for _ in 0..count {
            let mut boid = Boid::random(rng, &self.spawn);
            boid.apply_tuning(&self.tuning);
            self.boids.push(boid);
        }
        log::debug!("Added {} boids, total {}", count, self.boids.len());
    }

    /// Append a caller-built boid; the flock's tuning overrides its limits
    pub fn add_boid(&mut self, mut boid: Boid) {
        boid.apply_tuning(&self.tuning);
        self.boids.push(boid);
    }

    pub fn remove_all(&mut self) {
        log::debug!("Removing all {} boids", self.boids.len());
        self.boids.clear();
    }

    /// Replace the population with `count` fresh boids
    pub fn reset(&mut self, count: usize) {
        self.remove_all();
        self.add_boids(count);
    }

    /// Run one frame.
    ///
    /// Steering for every boid is computed first against the untouched
    /// population, then every boid integrates. No boid ever sees a neighbor
    /// that has already moved this frame, so iteration order has no effect.
    pub fn update(&mut self) {
        let steering = self.compute_steering();

        for (boid, steering) in self.boids.iter_mut().zip(steering) {
            boid.accumulate(steering);
            boid.integrate();
        }

        log::trace!(
            "Updated {} boids with {} attraction points",
            self.boids.len(),
            self.attraction_points.len()
        );
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_steering(&self) -> Vec<Steering> {
        self.boids
            .iter()
            .map(|boid| {
                boid.steering(&self.boids, &self.params, self.attraction_points.iter())
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn compute_steering(&self) -> Vec<Steering> {
        self.boids
            .par_iter()
            .map(|boid| {
                boid.steering(&self.boids, &self.params, self.attraction_points.iter())
            })
            .collect()
    }

    pub fn set_parameters(&mut self, patch: &ParamsPatch) {
        self.params.merge(patch);
        log::debug!("Flock parameters now {:?}", self.params);
    }

    /// Merge `patch` into the tuning and push it to every boid
    pub fn set_tuning(&mut self, patch: &TuningPatch) {
        self.tuning.merge(patch);
        for boid in self.boids.iter_mut() {
            boid.apply_tuning(&self.tuning);
        }
        log::debug!("Boid tuning now {:?}", self.tuning);
    }

    pub fn add_attraction_point(&mut self, point: Vec3) -> AttractionHandle {
        let handle = self.attraction_points.insert(point);
        log::debug!("Added attraction point {:?} at {}", handle, point);
        handle
    }

    pub fn remove_attraction_point(&mut self, handle: AttractionHandle) -> bool {
        let removed = self.attraction_points.remove(handle);
        if removed {
            log::debug!("Removed attraction point {:?}", handle);
        } else {
            log::debug!("Attraction point {:?} was already gone", handle);
        }
        removed
    }

    pub fn update_attraction_point(&mut self, handle: AttractionHandle, point: Vec3) -> bool {
        self.attraction_points.update(handle, point)
    }

    pub fn clear_attraction_points(&mut self) {
        self.attraction_points.clear();
        log::debug!("Cleared attraction points");
    }

    pub fn attraction_points(&self) -> &AttractionPoints {
        &self.attraction_points
    }

    /// Index of the closest boid to `point`, if it lies within [`NEAREST_BOID_CUTOFF`]
    pub fn nearest_boid(&self, point: Vec3) -> Option<usize> {
        self.boids
            .iter()
            .enumerate()
            .map(|(index, boid)| (index, boid.position.distance(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .filter(|&(_, distance)| distance < NEAREST_BOID_CUTOFF)
            .map(|(index, _)| index)
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn boids_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    pub fn tuning(&self) -> &BoidTuning {
        &self.tuning
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }
}
