//! 3D flocking engine.
//!
//! Boids steer by separation, alignment and cohesion, are softly held inside a
//! sphere around the origin, and are pulled toward attraction points supplied
//! by an interaction layer (tracked hands, pointers). [`Flock`] owns the
//! population and runs each frame in two phases: steering for every boid
//! against an unmodified snapshot, then integration.
//!
//! Neighbor search is exhaustive, so a frame costs O(N²). The engine is sized
//! for tens to a few hundred boids.

pub mod attraction;
pub mod behavior;
pub mod bindings;
mod boid;
pub mod color;
mod flock;
pub mod params;

pub use attraction::{AttractionHandle, AttractionPoints};
pub use bindings::AttractorBindings;
pub use boid::{facing, Boid, SpawnVolume, Steering, INITIAL_SPEED, STILLNESS_EPSILON};
pub use color::{Color, Highlight};
pub use flock::{Flock, NEAREST_BOID_CUTOFF};
pub use params::{BoidTuning, FlockParams, ParamsPatch, TuningPatch};

pub use glam::{Quat, Vec3};
