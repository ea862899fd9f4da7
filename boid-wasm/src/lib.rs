use boid_core::{AttractionHandle, AttractorBindings, Flock, ParamsPatch, Vec3};
use boid_shared::{FlockStats, Handedness, SettingsUpdate};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message.to_string()));
    js_sys::Error::new(&message.to_string()).into()
}

fn parse_hand(hand: &str) -> Result<Handedness, JsValue> {
    hand.parse().map_err(js_error)
}

/// Flock exposed to a JavaScript renderer.
///
/// Per-boid getters return flat arrays (one tuple per boid, in boid order) so
/// they can be copied straight into instanced buffer attributes.
#[wasm_bindgen]
pub struct FlockSimulation {
    flock: Flock,
    hands: AttractorBindings<Handedness>,
}

#[wasm_bindgen]
impl FlockSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(boid_count: usize) -> FlockSimulation {
        console_log!("Initializing flock simulation with {} boids", boid_count);

        FlockSimulation {
            flock: Flock::new(boid_count),
            hands: AttractorBindings::new(),
        }
    }

    pub fn update(&mut self) {
        self.flock.update();
    }

    pub fn boid_count(&self) -> usize {
        self.flock.len()
    }

    /// `[x, y, z]` per boid
    pub fn positions(&self) -> Vec<f32> {
        self.flock
            .boids()
            .iter()
            .flat_map(|boid| boid.position.to_array())
            .collect()
    }

    /// `[x, y, z]` per boid
    pub fn velocities(&self) -> Vec<f32> {
        self.flock
            .boids()
            .iter()
            .flat_map(|boid| boid.velocity.to_array())
            .collect()
    }

    /// Quaternion `[x, y, z, w]` per boid
    pub fn orientations(&self) -> Vec<f32> {
        self.flock
            .boids()
            .iter()
            .flat_map(|boid| boid.orientation.to_array())
            .collect()
    }

    /// Highlighted `[r, g, b]` per boid
    pub fn colors(&self) -> Vec<f32> {
        self.flock
            .boids()
            .iter()
            .flat_map(|boid| boid.highlight().color.to_array())
            .collect()
    }

    /// Emissive `[r, g, b]` per boid, black unless attracted
    pub fn emissive(&self) -> Vec<f32> {
        self.flock
            .boids()
            .iter()
            .flat_map(|boid| boid.highlight().emissive.to_array())
            .collect()
    }

    /// A hand started pinching at the given world position
    pub fn pinch_start(&mut self, hand: &str, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        let hand = parse_hand(hand)?;
        let handle = self.hands.engage(&mut self.flock, hand, Vec3::new(x, y, z));
        console_log!("Pinch start {:?} -> {}", hand, handle.to_bits());
        Ok(())
    }

    /// Returns false when the hand is not pinching
    pub fn pinch_move(&mut self, hand: &str, x: f32, y: f32, z: f32) -> Result<bool, JsValue> {
        let hand = parse_hand(hand)?;
        Ok(self.hands.track(&mut self.flock, &hand, Vec3::new(x, y, z)))
    }

    pub fn pinch_end(&mut self, hand: &str) -> Result<bool, JsValue> {
        let hand = parse_hand(hand)?;
        let released = self.hands.release(&mut self.flock, &hand);
        if released {
            console_log!("Pinch end {:?}", hand);
        }
        Ok(released)
    }

    pub fn is_pinching(&self, hand: &str) -> Result<bool, JsValue> {
        Ok(self.hands.is_engaged(&parse_hand(hand)?))
    }

    /// Returns an opaque id for later updates and removal
    pub fn add_attraction_point(&mut self, x: f32, y: f32, z: f32) -> u64 {
        self.flock
            .add_attraction_point(Vec3::new(x, y, z))
            .to_bits()
    }

    pub fn update_attraction_point(&mut self, id: u64, x: f32, y: f32, z: f32) -> bool {
        self.flock
            .update_attraction_point(AttractionHandle::from_bits(id), Vec3::new(x, y, z))
    }

    pub fn remove_attraction_point(&mut self, id: u64) -> bool {
        self.flock
            .remove_attraction_point(AttractionHandle::from_bits(id))
    }

    /// Drops every point, including those held by pinching hands
    pub fn clear_attraction_points(&mut self) {
        self.hands.release_all(&mut self.flock);
        self.flock.clear_attraction_points();
    }

    pub fn attraction_point_count(&self) -> usize {
        self.flock.attraction_points().len()
    }

    /// Merge a JSON object of flock parameters; omitted fields keep their value
    pub fn set_parameters(&mut self, json: &str) -> Result<(), JsValue> {
        let patch: ParamsPatch = serde_json::from_str(json).map_err(js_error)?;
        self.flock.set_parameters(&patch);
        Ok(())
    }

    /// Merge a JSON `{ "params": {...}, "tuning": {...} }` settings object
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let update = SettingsUpdate::from_json(json).map_err(js_error)?;
        update.apply(&mut self.flock);
        Ok(())
    }

    /// Current parameters as JSON
    pub fn parameters(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.flock.params()).map_err(js_error)
    }

    /// Current `FlockStats` as JSON
    pub fn stats(&self) -> Result<String, JsValue> {
        serde_json::to_string(&FlockStats::from_flock(&self.flock)).map_err(js_error)
    }

    pub fn reset(&mut self, boid_count: usize) {
        self.flock.reset(boid_count);
        console_log!("Reset flock to {} boids", boid_count);
    }

    /// Index of the boid closest to the point, if one is within reach
    pub fn nearest_boid(&self, x: f32, y: f32, z: f32) -> Option<usize> {
        self.flock.nearest_boid(Vec3::new(x, y, z))
    }
}
