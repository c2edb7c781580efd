// tests/json_model.rs
use glam::Vec3;
use std::path::PathBuf;
use tensegrity_blueprint::{ModelConfig, SimWorld, StructureError, Tagged, TensegrityModel};

/// A three-strut prism: six nodes, three rods, nine muscles.
const PRISM: &str = r#"{
    "structure": {
        "nodes": [
            { "coordinates": [0.0, 0.0, 0.0] },
            { "coordinates": [10.0, 0.0, 0.0] },
            { "coordinates": [5.0, 0.0, 8.66] },
            { "coordinates": [0.0, 10.0, 5.0] },
            { "coordinates": [10.0, 10.0, 5.0] },
            { "coordinates": [5.0, 10.0, -3.66] }
        ],
        "rods": [[1, 5], [2, 6], [3, 4]],
        "muscles": [[1, 2], [2, 3], [3, 1], [4, 5], [5, 6], [6, 4], [1, 4], [2, 5], [3, 6]]
    },
    "parameters": {
        "rods": { "radius": 0.5, "density": 1.0 },
        "muscles": { "stiffness": 1000.0, "damping": 10.0, "pretension": 100.0 }
    }
}"#;

fn write_description(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tensegrity-blueprint-{}-{name}.json",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn builds_model_from_json_file() {
    let path = write_description("prism", PRISM);
    let mut world = SimWorld::default();
    let model =
        TensegrityModel::from_description(ModelConfig::default().with_description(&path), &mut world)
            .unwrap();

    assert_eq!(model.all_rigids().len(), 3);
    assert_eq!(model.all_actuators().len(), 9);
    assert_eq!(world.rigids().len(), 3);
    assert!(model.components().iter().all(|c| c.handle().is_some()));

    // Lifted by the default (0, 10, 0).
    let first = model.all_rigids()[0];
    assert!(first.endpoints.0.abs_diff_eq(Vec3::new(0.0, 10.0, 0.0), 1e-5));
    assert!(first.tags().has("rod"));

    let muscle = model.all_actuators()[0];
    assert!((muscle.rest_length - (10.0 - 0.1)).abs() < 1e-4);

    std::fs::remove_file(path).ok();
}

#[test]
fn custom_lift_is_applied() {
    let path = write_description("lift", PRISM);
    let config = ModelConfig::default()
        .with_description(&path)
        .with_lift(Vec3::ZERO);
    let model = TensegrityModel::from_description(config, &mut SimWorld::default()).unwrap();

    assert!(model.all_rigids()[0].endpoints.0.abs_diff_eq(Vec3::ZERO, 1e-6));
    std::fs::remove_file(path).ok();
}

#[test]
fn parse_failure_is_fatal() {
    let path = write_description("broken", "{ \"structure\": [");
    let result = TensegrityModel::from_description(
        ModelConfig::default().with_description(&path),
        &mut SimWorld::default(),
    );
    assert!(matches!(result, Err(StructureError::Description(_))));
    std::fs::remove_file(path).ok();
}

#[test]
fn missing_file_reports_path() {
    let path = std::env::temp_dir().join("tensegrity-blueprint-does-not-exist.json");
    let err = TensegrityModel::from_description(
        ModelConfig::default().with_description(&path),
        &mut SimWorld::default(),
    )
    .unwrap_err();
    assert!(matches!(err, StructureError::Io { .. }));
    assert!(err.to_string().contains("tensegrity-blueprint-does-not-exist.json"));
}

#[test]
fn config_without_path_is_rejected() {
    let err = TensegrityModel::from_description(ModelConfig::default(), &mut SimWorld::default())
        .unwrap_err();
    assert!(matches!(err, StructureError::InvalidArgument(_)));
}
