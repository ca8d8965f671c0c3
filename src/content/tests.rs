//! Content domain: unit tests for tuning loading and validation.

use std::path::Path;

use super::{TuningFormat, load_movement_tuning, parse_movement_tuning, validate_tuning};
use crate::movement::{MovementTuning, WallJumpRule};

#[test]
fn test_format_follows_extension() {
    assert_eq!(
        TuningFormat::from_path(Path::new("data/movement.json")),
        TuningFormat::Json
    );
    assert_eq!(
        TuningFormat::from_path(Path::new("data/movement.JSON")),
        TuningFormat::Json
    );
    assert_eq!(
        TuningFormat::from_path(Path::new("data/movement.ron")),
        TuningFormat::Ron
    );
    assert_eq!(
        TuningFormat::from_path(Path::new("data/movement")),
        TuningFormat::Ron
    );
}

#[test]
fn test_partial_ron_keeps_defaults_for_missing_fields() {
    let ron = r#"(
        jump: (additional_jumps: 2),
        wall_jump: (rule: Window(window: 0.2, new_wall_only: true)),
        input_buffer_window: 0.15,
    )"#;

    let tuning = parse_movement_tuning(ron, TuningFormat::Ron, "inline.ron").unwrap();
    let defaults = MovementTuning::default();

    assert_eq!(tuning.jump.additional_jumps, 2);
    assert_eq!(tuning.jump.jump_speed, defaults.jump.jump_speed);
    assert_eq!(
        tuning.wall_jump.rule,
        WallJumpRule::Window {
            window: 0.2,
            new_wall_only: true
        }
    );
    assert_eq!(tuning.input_buffer_window, 0.15);
    assert_eq!(tuning.gravity, defaults.gravity);
}

#[test]
fn test_json_tuning_parses() {
    let json = r#"{
        "clamp": { "max_horizontal": 8.0, "max_vertical": 5.0, "min_vertical": -6.0 },
        "dash": { "curve": { "keys": [ { "time": 4.0, "value": 0.0 }, { "time": 0.0, "value": 2.0 } ] } }
    }"#;

    let tuning = parse_movement_tuning(json, TuningFormat::Json, "inline.json").unwrap();

    assert_eq!(tuning.clamp.max_horizontal, 8.0);
    assert_eq!(tuning.clamp.min_vertical, -6.0);
    // Keys come back sorted by time
    assert_eq!(tuning.dash.curve.keys()[0].time, 0.0);
    assert_eq!(tuning.dash.curve.end_time(), 4.0);
    assert_eq!(tuning.dash.curve.sample(2.0), 1.0);
}

#[test]
fn test_parse_error_names_the_file() {
    let err = parse_movement_tuning("(jump: ", TuningFormat::Ron, "broken.ron").unwrap_err();

    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().starts_with("Failed to load broken.ron"));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = load_movement_tuning(Path::new("does/not/exist.ron")).unwrap_err();

    assert!(err.message.starts_with("IO error"));
}

#[test]
fn test_shipped_tuning_loads_and_validates() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data/movement.ron");
    let tuning = load_movement_tuning(&path).unwrap();

    let errors = validate_tuning(&tuning);
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    assert_eq!(tuning, MovementTuning::default());
}

#[test]
fn test_default_tuning_is_valid() {
    assert!(validate_tuning(&MovementTuning::default()).is_empty());
}

#[test]
fn test_validation_reports_each_bad_field() {
    let mut tuning = MovementTuning::default();
    tuning.jump.coyote_time = -0.1;
    tuning.gravity.falling = f32::NAN;
    tuning.clamp.min_vertical = 1.0;
    tuning.horizontal.threshold_velocity = 20.0;

    let errors = validate_tuning(&tuning);
    let fields: Vec<_> = errors.iter().map(|e| e.field).collect();

    assert_eq!(errors.len(), 4, "got {:?}", fields);
    assert!(fields.contains(&"jump.coyote_time"));
    assert!(fields.contains(&"gravity.falling"));
    assert!(fields.contains(&"clamp.min_vertical"));
    assert!(fields.contains(&"horizontal.threshold_velocity"));
}

#[test]
fn test_window_rule_rejects_negative_window() {
    let mut tuning = MovementTuning::default();
    tuning.wall_jump.rule = WallJumpRule::Window {
        window: -1.0,
        new_wall_only: false,
    };

    let errors = validate_tuning(&tuning);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "wall_jump.rule.window");
}
