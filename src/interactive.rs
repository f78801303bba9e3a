//! Hover highlighting and click selection for one mounted part.

use crate::scene::{NodeId, SceneGraph};

/// Whether an event should keep bubbling towards the scene root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
  Continue,
  Stop,
}

/// A root child of the assembly that reacts to the pointer.
///
/// Hover darkens every surface in the node's subtree; leaving restores the
/// base colour captured when the asset was loaded, so repeated hover cycles
/// never drift.
#[derive(Clone, Debug)]
pub struct InteractiveNode {
  node: NodeId,
  subtree: Vec<NodeId>,
  darken_factor: f32,
  hovered: bool,
}

impl InteractiveNode {
  /// Mounts the node and shows the base colour on its whole subtree.
  pub fn mount(scene: &mut SceneGraph, node: NodeId, darken_factor: f32) -> Self {
    let mut mounted = Self {
      node,
      subtree: scene.subtree(node),
      darken_factor,
      hovered: false,
    };
    mounted.apply(scene);
    mounted
  }

  pub fn node(&self) -> NodeId {
    self.node
  }

  pub fn is_hovered(&self) -> bool {
    self.hovered
  }

  /// Nodes whose colour this mount controls.
  pub fn subtree(&self) -> &[NodeId] {
    &self.subtree
  }

  /// Returns true when the display colours changed.
  pub fn pointer_enter(&mut self, scene: &mut SceneGraph) -> bool {
    self.set_hovered(scene, true)
  }

  /// Returns true when the display colours changed.
  pub fn pointer_leave(&mut self, scene: &mut SceneGraph) -> bool {
    self.set_hovered(scene, false)
  }

  pub fn click(&self, on_select: &mut dyn FnMut(NodeId)) -> Propagation {
    on_select(self.node);
    Propagation::Stop
  }

  fn set_hovered(&mut self, scene: &mut SceneGraph, hovered: bool) -> bool {
    if self.hovered == hovered {
      return false;
    }
    self.hovered = hovered;
    self.apply(scene);
    true
  }

  fn apply(&self, scene: &mut SceneGraph) {
    for &id in &self.subtree {
      let Some(node) = scene.node_mut(id) else {
        continue;
      };
      for surface in &mut node.surfaces {
        let color = if self.hovered {
          surface.base_color().darkened(self.darken_factor)
        } else {
          surface.base_color()
        };
        surface.show(color);
      }
    }
  }
}
