use boid_wasm::FlockSimulation;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn test_buffers_match_boid_count() {
    let mut sim = FlockSimulation::new(16);
    sim.update();

    assert_eq!(sim.boid_count(), 16);
    assert_eq!(sim.positions().len(), 16 * 3);
    assert_eq!(sim.velocities().len(), 16 * 3);
    assert_eq!(sim.orientations().len(), 16 * 4);
    assert_eq!(sim.colors().len(), 16 * 3);
    assert_eq!(sim.emissive().len(), 16 * 3);
}

#[wasm_bindgen_test]
fn test_attraction_point_ids() {
    let mut sim = FlockSimulation::new(4);

    let id = sim.add_attraction_point(0.0, 2.0, 0.0);
    assert_eq!(sim.attraction_point_count(), 1);
    assert!(sim.update_attraction_point(id, 1.0, 2.0, 0.0));

    assert!(sim.remove_attraction_point(id));
    assert!(!sim.remove_attraction_point(id));
    assert!(!sim.update_attraction_point(id, 0.0, 0.0, 0.0));

    // A reused slot must not answer to the old id
    let fresh = sim.add_attraction_point(0.0, 1.0, 0.0);
    assert_ne!(fresh, id);
    assert!(!sim.remove_attraction_point(id));
    assert_eq!(sim.attraction_point_count(), 1);
}

#[wasm_bindgen_test]
fn test_pinch_lifecycle() {
    let mut sim = FlockSimulation::new(10);

    sim.pinch_start("left", 0.0, 2.5, 0.0).unwrap();
    sim.pinch_start("right", 1.0, 2.5, 0.0).unwrap();
    assert_eq!(sim.attraction_point_count(), 2);
    assert!(sim.is_pinching("left").unwrap());

    assert!(sim.pinch_move("left", 0.5, 2.5, 0.0).unwrap());
    assert!(sim.pinch_end("left").unwrap());
    assert!(!sim.pinch_end("left").unwrap());
    assert!(!sim.pinch_move("left", 0.0, 0.0, 0.0).unwrap());
    assert_eq!(sim.attraction_point_count(), 1);

    sim.clear_attraction_points();
    assert_eq!(sim.attraction_point_count(), 0);
    assert!(!sim.is_pinching("right").unwrap());

    assert!(sim.pinch_start("both", 0.0, 0.0, 0.0).is_err());
}

#[wasm_bindgen_test]
fn test_set_parameters_json() {
    let mut sim = FlockSimulation::new(2);

    sim.set_parameters(r#"{"boundary_radius": 8.0}"#).unwrap();
    let params: serde_json::Value = serde_json::from_str(&sim.parameters().unwrap()).unwrap();
    assert_eq!(params["boundary_radius"], 8.0);
    assert_eq!(params["separation_distance"], 0.8);

    sim.set_settings(r#"{"tuning": {"max_speed": 0.06}}"#).unwrap();
    assert!(sim.set_parameters("not json").is_err());
}

#[wasm_bindgen_test]
fn test_reset_and_nearest_boid() {
    let mut sim = FlockSimulation::new(3);
    sim.reset(7);
    assert_eq!(sim.boid_count(), 7);

    let positions = sim.positions();
    let nearest = sim.nearest_boid(positions[3], positions[4], positions[5]);
    assert_eq!(nearest, Some(1));
    assert_eq!(sim.nearest_boid(100.0, 100.0, 100.0), None);
}
