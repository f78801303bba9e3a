//! Owned scene graph built from a parsed glTF document.
//!
//! Nodes are addressed by their glTF node index, which is also what the page
//! reports when it picks an object. Every mesh primitive becomes a `Surface`
//! holding an immutable base colour and the colour currently on display.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

pub type NodeId = usize;

/// Linear RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Color {
  pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);

  /// Scales the colour channels, alpha is left alone.
  pub fn darkened(self, factor: f32) -> Color {
    let [r, g, b, a] = self.0;
    Color([r * factor, g * factor, b * factor, a])
  }
}

/// One renderable primitive of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
  base_color: Color,
  display_color: Color,
}

impl Surface {
  pub fn new(base_color: Color) -> Self {
    Self {
      base_color,
      display_color: base_color,
    }
  }

  pub fn base_color(&self) -> Color {
    self.base_color
  }

  pub fn display_color(&self) -> Color {
    self.display_color
  }

  pub(crate) fn show(&mut self, color: Color) {
    self.display_color = color;
  }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
  pub index: NodeId,
  pub name: Option<String>,
  pub parent: Option<NodeId>,
  pub children: Vec<NodeId>,
  pub surfaces: Vec<Surface>,
}

/// Display colour of one surface, as sent to the page.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceColor {
  pub node: NodeId,
  pub surface: usize,
  pub color: Color,
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
  nodes: Vec<SceneNode>,
  roots: Vec<NodeId>,
}

impl SceneGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds the graph of the document's default scene, falling back to the
  /// first scene when no default is declared.
  pub fn from_document(document: &gltf::Document) -> Result<Self> {
    let scene = document
      .default_scene()
      .or_else(|| document.scenes().next())
      .ok_or(ViewerError::EmptyScene)?;

    let mut nodes: Vec<SceneNode> = document
      .nodes()
      .map(|node| SceneNode {
        index: node.index(),
        name: node.name().map(str::to_string),
        parent: None,
        children: node.children().map(|child| child.index()).collect(),
        surfaces: node
          .mesh()
          .map(|mesh| {
            mesh
              .primitives()
              .map(|primitive| {
                let factor = primitive
                  .material()
                  .pbr_metallic_roughness()
                  .base_color_factor();
                Surface::new(Color(factor))
              })
              .collect()
          })
          .unwrap_or_default(),
      })
      .collect();

    let links: Vec<(NodeId, NodeId)> = nodes
      .iter()
      .flat_map(|node| node.children.iter().map(move |&child| (node.index, child)))
      .collect();
    for (parent, child) in links {
      if let Some(first) = nodes[child].parent {
        return Err(ViewerError::InvalidHierarchy(format!(
          "node {} is a child of both {} and {}",
          child, first, parent
        )));
      }
      nodes[child].parent = Some(parent);
    }

    let roots: Vec<NodeId> = scene.nodes().map(|node| node.index()).collect();
    if let Some(&root) = roots.iter().find(|&&root| nodes[root].parent.is_some()) {
      return Err(ViewerError::InvalidHierarchy(format!(
        "scene root {} is also a child node",
        root
      )));
    }
    // with one parent per node, a parent chain longer than the node count loops
    for node in &nodes {
      let mut steps = 0;
      let mut current = node.parent;
      while let Some(parent) = current {
        steps += 1;
        if steps > nodes.len() {
          return Err(ViewerError::InvalidHierarchy(format!(
            "node {} is its own ancestor",
            node.index
          )));
        }
        current = nodes[parent].parent;
      }
    }

    Ok(Self { nodes, roots })
  }

  /// Appends a node. A node without parent becomes a root child.
  pub fn add_node(&mut self, name: Option<&str>, parent: Option<NodeId>, colors: &[Color]) -> NodeId {
    let index = self.nodes.len();
    self.nodes.push(SceneNode {
      index,
      name: name.map(str::to_string),
      parent,
      children: Vec::new(),
      surfaces: colors.iter().copied().map(Surface::new).collect(),
    });
    match parent {
      Some(parent) => self.nodes[parent].children.push(index),
      None => self.roots.push(index),
    }
    index
  }

  pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
    self.nodes.get(id)
  }

  pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
    self.nodes.get_mut(id)
  }

  pub fn name_of(&self, id: NodeId) -> Option<&str> {
    self.node(id).and_then(|node| node.name.as_deref())
  }

  /// Immediate children of the scene root.
  pub fn roots(&self) -> &[NodeId] {
    &self.roots
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// The node and all of its descendants, parents before children.
  pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
      if !seen.insert(current) {
        continue;
      }
      let Some(node) = self.node(current) else {
        continue;
      };
      out.push(current);
      stack.extend(node.children.iter().rev());
    }
    out
  }

  /// Walks up from `id` to the root child that owns it.
  pub fn root_child_of(&self, id: NodeId) -> Option<NodeId> {
    let mut current = self.node(id)?;
    let mut steps = 0;
    while let Some(parent) = current.parent {
      steps += 1;
      if steps > self.nodes.len() {
        return None;
      }
      current = self.node(parent)?;
    }
    self.roots.contains(&current.index).then_some(current.index)
  }

  /// Names of every node reachable from the scene root.
  pub fn names(&self) -> Vec<&str> {
    self
      .roots
      .iter()
      .flat_map(|&root| self.subtree(root))
      .filter_map(|id| self.name_of(id))
      .collect()
  }

  /// Display colours of every surface under the given nodes.
  pub fn surface_colors(&self, ids: &[NodeId]) -> Vec<SurfaceColor> {
    ids
      .iter()
      .filter_map(|&id| self.node(id))
      .flat_map(|node| {
        node
          .surfaces
          .iter()
          .enumerate()
          .map(move |(surface, s)| SurfaceColor {
            node: node.index,
            surface,
            color: s.display_color(),
          })
      })
      .collect()
  }

  /// Display colours of every reachable surface.
  pub fn all_surface_colors(&self) -> Vec<SurfaceColor> {
    let ids: Vec<NodeId> = self
      .roots
      .iter()
      .flat_map(|&root| self.subtree(root))
      .collect();
    self.surface_colors(&ids)
  }
}
