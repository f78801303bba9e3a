//! Compiled-in viewer tunables.
//!
//! Nothing here is read from disk or the command line: the password, the
//! excluded part names and the interaction constants ship with the binary.

use std::f32::consts::FRAC_PI_2;

/// Password accepted by the access gate.
pub const PASSWORD: &str = "goldenegg";

/// Root children that are drawn but never react to hover or click.
pub const EXCLUDED_NODES: &[&str] = &["ball_bearing"];

/// Radians added to the assembly yaw on every render tick.
pub const ROTATION_STEP: f32 = 0.005;

/// Radians of camera rotation per pixel of drag.
pub const DRAG_SENSITIVITY: f32 = 0.005;

/// Factor applied to a surface's base colour while hovered.
pub const DARKEN_FACTOR: f32 = 0.7;

/// Uniform scale applied to the loaded scene.
pub const ASSEMBLY_SCALE: f32 = 0.03;

/// World position of the loaded scene.
pub const ASSEMBLY_POSITION: [f32; 3] = [0.0, -1.0, 0.0];

/// Camera pitch limit in both directions.
pub const PITCH_LIMIT: f32 = FRAC_PI_2;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
  pub password: String,
  pub excluded_nodes: Vec<String>,
  pub rotation_step: f32,
  pub drag_sensitivity: f32,
  pub darken_factor: f32,
  pub scale: f32,
  pub position: [f32; 3],
}

impl Default for ViewerConfig {
  fn default() -> Self {
    Self {
      password: PASSWORD.to_string(),
      excluded_nodes: EXCLUDED_NODES.iter().map(|s| s.to_string()).collect(),
      rotation_step: ROTATION_STEP,
      drag_sensitivity: DRAG_SENSITIVITY,
      darken_factor: DARKEN_FACTOR,
      scale: ASSEMBLY_SCALE,
      position: ASSEMBLY_POSITION,
    }
  }
}

impl ViewerConfig {
  /// Case-insensitive check against the exclusion list.
  pub fn is_excluded(&self, name: &str) -> bool {
    self
      .excluded_nodes
      .iter()
      .any(|excluded| excluded.eq_ignore_ascii_case(name))
  }
}
