//! Validation for movement tuning values.

use crate::movement::{MovementTuning, SampledCurve, WallJumpRule};

/// A validation error naming the offending field.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' {}", self.field, self.message)
    }
}

/// Helper macro for checking a value is finite and not negative
macro_rules! check_non_negative {
    ($errors:expr, $field:expr, $value:expr) => {
        let value: f32 = $value;
        if !value.is_finite() || value < 0.0 {
            $errors.push(ValidationError {
                field: $field,
                message: format!("must be a non-negative number, got {}", value),
            });
        }
    };
}

fn check_curve(errors: &mut Vec<ValidationError>, field: &'static str, curve: &SampledCurve) {
    if curve
        .keys()
        .iter()
        .any(|key| !key.time.is_finite() || !key.value.is_finite())
    {
        errors.push(ValidationError {
            field,
            message: "has a non-finite key".to_string(),
        });
    }
}

/// Validate movement tuning.
/// Returns a list of validation errors, empty if every value is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let horizontal = &tuning.horizontal;
    check_non_negative!(errors, "horizontal.acceleration", horizontal.acceleration);
    check_non_negative!(errors, "horizontal.deceleration", horizontal.deceleration);
    check_non_negative!(
        errors,
        "horizontal.threshold_velocity",
        horizontal.threshold_velocity
    );
    check_non_negative!(
        errors,
        "horizontal.threshold_deceleration",
        horizontal.threshold_deceleration
    );

    check_non_negative!(errors, "jump.jump_speed", tuning.jump.jump_speed);
    check_non_negative!(errors, "jump.coyote_time", tuning.jump.coyote_time);
    check_non_negative!(errors, "input_buffer_window", tuning.input_buffer_window);

    let wall_jump = &tuning.wall_jump;
    check_non_negative!(errors, "wall_jump.acceleration", wall_jump.acceleration);
    if let WallJumpRule::Window { window, .. } = wall_jump.rule {
        check_non_negative!(errors, "wall_jump.rule.window", window);
    }
    check_curve(&mut errors, "wall_jump.curve", &wall_jump.curve);
    check_curve(&mut errors, "dash.curve", &tuning.dash.curve);

    let gravity = &tuning.gravity;
    check_non_negative!(errors, "gravity.base", gravity.base);
    check_non_negative!(errors, "gravity.ascending", gravity.ascending);
    check_non_negative!(errors, "gravity.falling", gravity.falling);
    check_non_negative!(errors, "gravity.wall_slide", gravity.wall_slide);

    let clamp = &tuning.clamp;
    if !(clamp.max_horizontal > 0.0) {
        errors.push(ValidationError {
            field: "clamp.max_horizontal",
            message: format!("must be positive, got {}", clamp.max_horizontal),
        });
    }
    if !(clamp.min_vertical <= 0.0 && clamp.max_vertical >= 0.0) {
        errors.push(ValidationError {
            field: "clamp.min_vertical",
            message: format!(
                "range [{}, {}] must contain zero",
                clamp.min_vertical, clamp.max_vertical
            ),
        });
    }
    if horizontal.threshold_velocity > clamp.max_horizontal {
        errors.push(ValidationError {
            field: "horizontal.threshold_velocity",
            message: format!(
                "{} exceeds clamp.max_horizontal {}",
                horizontal.threshold_velocity, clamp.max_horizontal
            ),
        });
    }

    errors
}
