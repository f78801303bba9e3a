//! Drag-to-orbit camera control.

use serde::Serialize;

use crate::config::PITCH_LIMIT;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CameraOrientation {
  pub yaw: f32,
  pub pitch: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Drag {
  #[default]
  Idle,
  Dragging { last: (f64, f64) },
}

/// Turns pointer drags into camera yaw and pitch.
///
/// There is no inertia: the camera moves only while a drag is active and only
/// by the distance the pointer travelled since the previous move.
#[derive(Clone, Debug)]
pub struct OrbitCameraController {
  orientation: CameraOrientation,
  drag: Drag,
  sensitivity: f32,
}

impl OrbitCameraController {
  pub fn new(sensitivity: f32) -> Self {
    Self {
      orientation: CameraOrientation::default(),
      drag: Drag::Idle,
      sensitivity,
    }
  }

  pub fn orientation(&self) -> CameraOrientation {
    self.orientation
  }

  pub fn is_dragging(&self) -> bool {
    matches!(self.drag, Drag::Dragging { .. })
  }

  pub fn pointer_down(&mut self, x: f64, y: f64) {
    self.drag = Drag::Dragging { last: (x, y) };
  }

  /// Returns the new orientation if a drag is in progress.
  pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<CameraOrientation> {
    let Drag::Dragging { last: (px, py) } = self.drag else {
      return None;
    };
    let dx = (x - px) as f32;
    let dy = (y - py) as f32;
    self.drag = Drag::Dragging { last: (x, y) };

    self.orientation.yaw -= dx * self.sensitivity;
    self.orientation.pitch = (self.orientation.pitch - dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    Some(self.orientation)
  }

  pub fn pointer_up(&mut self) {
    self.drag = Drag::Idle;
  }
}
