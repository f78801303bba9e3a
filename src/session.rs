//! Per-connection viewer state.
//!
//! One session lives inside one WebSocket task and is never shared, so none of
//! its state needs a lock. The session owns its own copy of the scene graph:
//! hover colours of one visitor are invisible to every other visitor.

use log::debug;

use crate::assembly::{Part, RotatingAssembly};
use crate::camera::OrbitCameraController;
use crate::config::ViewerConfig;
use crate::gate::AccessGate;
use crate::loader::LoadState;
use crate::popup::SelectionPopup;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::scene::{NodeId, SurfaceColor};

pub struct ViewerSession {
  config: ViewerConfig,
  gate: AccessGate,
  camera: OrbitCameraController,
  popup: SelectionPopup,
  asset: LoadState,
  assembly: Option<RotatingAssembly>,
}

impl ViewerSession {
  pub fn new(config: ViewerConfig, asset: LoadState) -> Self {
    let mut session = Self {
      gate: AccessGate::new(config.password.clone()),
      camera: OrbitCameraController::new(config.drag_sensitivity),
      popup: SelectionPopup::new(),
      asset: LoadState::Loading,
      assembly: None,
      config,
    };
    session.set_asset(asset);
    session
  }

  pub fn is_unlocked(&self) -> bool {
    self.gate.is_unlocked()
  }

  pub fn selected(&self) -> Option<NodeId> {
    self.popup.selected()
  }

  pub fn assembly(&self) -> Option<&RotatingAssembly> {
    self.assembly.as_ref()
  }

  pub fn handle(&mut self, msg: ClientMessage) -> Vec<ServerMessage> {
    if let ClientMessage::Unlock { password } = &msg {
      return self.unlock(password);
    }
    if !self.gate.is_unlocked() {
      debug!("Ignoring {:?} while locked", msg);
      return Vec::new();
    }

    match msg {
      ClientMessage::Unlock { .. } => Vec::new(),
      ClientMessage::PointerDown { x, y } => {
        self.camera.pointer_down(x, y);
        Vec::new()
      }
      ClientMessage::PointerMove { x, y } => self
        .camera
        .pointer_move(x, y)
        .map(|o| ServerMessage::Camera {
          yaw: o.yaw,
          pitch: o.pitch,
        })
        .into_iter()
        .collect(),
      ClientMessage::PointerUp => {
        self.camera.pointer_up();
        Vec::new()
      }
      ClientMessage::Dismiss => {
        if self.popup.dismiss() {
          vec![ServerMessage::PopupClosed]
        } else {
          Vec::new()
        }
      }
      ClientMessage::Tick => self.with_assembly(|assembly, _| {
        vec![ServerMessage::Rotation { y: assembly.tick() }]
      }),
      ClientMessage::PointerOver { node } => self.with_assembly(|assembly, _| colors(assembly.pointer_over(node))),
      ClientMessage::PointerOut { node } => self.with_assembly(|assembly, _| colors(assembly.pointer_out(node))),
      ClientMessage::Click { node } => self.with_assembly(|assembly, popup| {
        let mut selected = None;
        assembly.click(node, &mut |owner| selected = Some(owner));
        selected
          .map(|owner| {
            let shown = popup.select(assembly.scene(), owner);
            debug!("Selected node {} ({})", owner, shown.content.title);
            ServerMessage::Popup {
              node: shown.node,
              title: shown.content.title,
              text: shown.content.text,
            }
          })
          .into_iter()
          .collect()
      }),
    }
  }

  /// Takes a new asset state and remounts the assembly. The selection is
  /// cleared; camera and rotation carry over.
  pub fn set_asset(&mut self, asset: LoadState) -> Vec<ServerMessage> {
    let rotation = self.assembly.as_ref().map_or(0.0, |a| a.rotation_y());
    self.assembly = asset.scene().map(|scene| {
      let mut assembly = RotatingAssembly::mount(scene.as_ref().clone(), &self.config);
      assembly.set_rotation_y(rotation);
      assembly
    });
    self.asset = asset;

    let mut replies = Vec::new();
    if self.popup.dismiss() {
      replies.push(ServerMessage::PopupClosed);
    }
    if self.gate.is_unlocked() {
      replies.push(self.asset_message());
    }
    replies
  }

  fn unlock(&mut self, password: &str) -> Vec<ServerMessage> {
    match self.gate.submit(password) {
      Ok(()) => vec![ServerMessage::Unlocked, self.asset_message()],
      Err(message) => {
        debug!("Rejected password attempt");
        vec![ServerMessage::AccessDenied {
          message: message.to_string(),
        }]
      }
    }
  }

  fn asset_message(&self) -> ServerMessage {
    match (&self.asset, &self.assembly) {
      (LoadState::Ready { generation, .. }, Some(assembly)) => {
        let orientation = self.camera.orientation();
        ServerMessage::AssetReady {
          version: *generation,
          nodes: assembly.scene().len(),
          inert: assembly
            .parts()
            .iter()
            .filter_map(|part| match part {
              Part::Static(node) => Some(*node),
              Part::Interactive(_) => None,
            })
            .collect(),
          transform: assembly.transform(),
          camera: orientation,
          colors: assembly.scene().all_surface_colors(),
        }
      }
      (LoadState::Failed(message), _) => ServerMessage::AssetFailed {
        message: message.clone(),
      },
      _ => ServerMessage::AssetLoading,
    }
  }

  fn with_assembly(
    &mut self,
    f: impl FnOnce(&mut RotatingAssembly, &mut SelectionPopup) -> Vec<ServerMessage>,
  ) -> Vec<ServerMessage> {
    match self.assembly.as_mut() {
      Some(assembly) => f(assembly, &mut self.popup),
      None => Vec::new(),
    }
  }
}

fn colors(changed: Vec<SurfaceColor>) -> Vec<ServerMessage> {
  if changed.is_empty() {
    Vec::new()
  } else {
    vec![ServerMessage::Colors { colors: changed }]
  }
}
