//! JSON messages exchanged with the page over the WebSocket.
//!
//! Both directions are internally tagged on `type` with snake_case names.

use serde::{Deserialize, Serialize};

use crate::assembly::Transform;
use crate::camera::CameraOrientation;
use crate::scene::{NodeId, SurfaceColor};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
  Unlock { password: String },
  /// One rendered frame.
  Tick,
  PointerDown { x: f64, y: f64 },
  PointerMove { x: f64, y: f64 },
  PointerUp,
  /// `node` is the glTF node index of the picked object.
  PointerOver { node: NodeId },
  PointerOut { node: NodeId },
  Click { node: NodeId },
  Dismiss,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
  Unlocked,
  AccessDenied {
    message: String,
  },
  AssetLoading,
  AssetReady {
    /// Load generation, shared by every session in the process, so the page
    /// refetches the file whenever it changes.
    version: u64,
    nodes: usize,
    /// Root parts that ignore hover and click. Picking looks through them.
    inert: Vec<NodeId>,
    transform: Transform,
    camera: CameraOrientation,
    colors: Vec<SurfaceColor>,
  },
  AssetFailed {
    message: String,
  },
  Rotation {
    y: f32,
  },
  Camera {
    yaw: f32,
    pitch: f32,
  },
  Colors {
    colors: Vec<SurfaceColor>,
  },
  Popup {
    node: NodeId,
    title: String,
    text: String,
  },
  PopupClosed,
}
