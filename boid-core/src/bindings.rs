//! Keyed interaction sources driving attraction points.
//!
//! An input device (a tracked hand, a mouse button, a controller) engages a
//! point when a gesture starts, drags it while the gesture continues and
//! releases it at the end. Each key owns at most one point at a time.

use std::collections::HashMap;
use std::hash::Hash;

use glam::Vec3;

use crate::attraction::AttractionHandle;
use crate::flock::Flock;

#[derive(Debug, Clone)]
pub struct AttractorBindings<K> {
    handles: HashMap<K, AttractionHandle>,
}

impl<K> Default for AttractorBindings<K> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> AttractorBindings<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start attracting toward `point` on behalf of `key`.
    ///
    /// An already engaged key keeps its handle and just moves the point.
    pub fn engage(&mut self, flock: &mut Flock, key: K, point: Vec3) -> AttractionHandle {
        if let Some(&handle) = self.handles.get(&key) {
            if flock.update_attraction_point(handle, point) {
                return handle;
            }
        }

        let handle = flock.add_attraction_point(point);
        self.handles.insert(key, handle);
        handle
    }

    /// Move the point owned by `key`; false when the key is not engaged
    pub fn track(&mut self, flock: &mut Flock, key: &K, point: Vec3) -> bool {
        match self.handles.get(key) {
            Some(&handle) => flock.update_attraction_point(handle, point),
            None => false,
        }
    }

    pub fn release(&mut self, flock: &mut Flock, key: &K) -> bool {
        match self.handles.remove(key) {
            Some(handle) => flock.remove_attraction_point(handle),
            None => false,
        }
    }

    pub fn release_all(&mut self, flock: &mut Flock) {
        for (_, handle) in self.handles.drain() {
            flock.remove_attraction_point(handle);
        }
    }

    pub fn is_engaged(&self, key: &K) -> bool {
        self.handles.contains_key(key)
    }

    pub fn handle(&self, key: &K) -> Option<AttractionHandle> {
        self.handles.get(key).copied()
    }
}
