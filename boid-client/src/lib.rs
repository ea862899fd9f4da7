//! Headless flock runner.
//!
//! Replays scripted hand and settings input against a [`boid_core::Flock`]
//! and records frame snapshots, without any renderer attached.

pub mod scenario;
pub mod session;

pub use scenario::{Action, Scenario, Step};
pub use session::Session;
