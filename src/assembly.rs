//! The loaded scene as one continuously rotating assembly of parts.

use serde::Serialize;

use crate::config::ViewerConfig;
use crate::interactive::{InteractiveNode, Propagation};
use crate::scene::{NodeId, SceneGraph, SurfaceColor};

/// How a root child of the scene is mounted.
#[derive(Clone, Debug)]
pub enum Part {
  Interactive(InteractiveNode),
  /// Drawn, but deaf to hover and click.
  Static(NodeId),
}

impl Part {
  pub fn node(&self) -> NodeId {
    match self {
      Part::Interactive(interactive) => interactive.node(),
      Part::Static(node) => *node,
    }
  }
}

/// Placement of the assembly in the world, as sent to the page.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform {
  pub rotation_y: f32,
  pub scale: f32,
  pub position: [f32; 3],
}

#[derive(Debug)]
pub struct RotatingAssembly {
  scene: SceneGraph,
  parts: Vec<Part>,
  rotation_y: f32,
  step: f32,
  scale: f32,
  position: [f32; 3],
}

impl RotatingAssembly {
  /// Mounts every root child of `scene`, skipping interactivity for excluded names.
  pub fn mount(mut scene: SceneGraph, config: &ViewerConfig) -> Self {
    let roots = scene.roots().to_vec();
    let parts = roots
      .into_iter()
      .map(|node| {
        let excluded = scene.name_of(node).is_some_and(|name| config.is_excluded(name));
        if excluded {
          Part::Static(node)
        } else {
          Part::Interactive(InteractiveNode::mount(&mut scene, node, config.darken_factor))
        }
      })
      .collect();

    Self {
      scene,
      parts,
      rotation_y: 0.0,
      step: config.rotation_step,
      scale: config.scale,
      position: config.position,
    }
  }

  pub fn scene(&self) -> &SceneGraph {
    &self.scene
  }

  pub fn parts(&self) -> &[Part] {
    &self.parts
  }

  /// Advances the rotation by one fixed step. Speed follows the caller's tick rate.
  pub fn tick(&mut self) -> f32 {
    self.rotation_y += self.step;
    self.rotation_y
  }

  pub fn rotation_y(&self) -> f32 {
    self.rotation_y
  }

  /// Carries the rotation over from a previous mount.
  pub fn set_rotation_y(&mut self, rotation_y: f32) {
    self.rotation_y = rotation_y;
  }

  pub fn transform(&self) -> Transform {
    Transform {
      rotation_y: self.rotation_y,
      scale: self.scale,
      position: self.position,
    }
  }

  /// Pointer entered the picked node. Returns the surfaces whose colour changed.
  pub fn pointer_over(&mut self, picked: NodeId) -> Vec<SurfaceColor> {
    self.hover(picked, true)
  }

  /// Pointer left the picked node. Returns the surfaces whose colour changed.
  pub fn pointer_out(&mut self, picked: NodeId) -> Vec<SurfaceColor> {
    self.hover(picked, false)
  }

  /// Delivers a click on `picked` to the part owning it.
  pub fn click(&self, picked: NodeId, on_select: &mut dyn FnMut(NodeId)) -> Propagation {
    match self.part_index(picked).map(|i| &self.parts[i]) {
      Some(Part::Interactive(interactive)) => interactive.click(on_select),
      _ => Propagation::Continue,
    }
  }

  fn hover(&mut self, picked: NodeId, entered: bool) -> Vec<SurfaceColor> {
    let Some(index) = self.part_index(picked) else {
      return Vec::new();
    };
    let Part::Interactive(interactive) = &mut self.parts[index] else {
      return Vec::new();
    };
    let changed = if entered {
      interactive.pointer_enter(&mut self.scene)
    } else {
      interactive.pointer_leave(&mut self.scene)
    };
    if changed {
      self.scene.surface_colors(interactive.subtree())
    } else {
      Vec::new()
    }
  }

  fn part_index(&self, picked: NodeId) -> Option<usize> {
    let owner = self.scene.root_child_of(picked)?;
    self.parts.iter().position(|part| part.node() == owner)
  }
}
