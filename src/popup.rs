//! The currently selected part and its popup.

use crate::content::{self, PopupContent, UNNAMED_TITLE};
use crate::scene::{NodeId, SceneGraph};

/// What the page shows for the selected part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Popup {
  pub node: NodeId,
  pub content: PopupContent,
}

/// At most one selected part. Dismissing clears it.
#[derive(Clone, Debug, Default)]
pub struct SelectionPopup {
  selected: Option<NodeId>,
}

impl SelectionPopup {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn selected(&self) -> Option<NodeId> {
    self.selected
  }

  /// Selects `node` and returns its popup content.
  pub fn select(&mut self, scene: &SceneGraph, node: NodeId) -> Popup {
    self.selected = Some(node);
    let content = match scene.name_of(node) {
      Some(name) => content::lookup(name),
      None => PopupContent {
        title: UNNAMED_TITLE.to_string(),
        text: String::new(),
      },
    };
    Popup { node, content }
  }

  /// Returns true if something was selected.
  pub fn dismiss(&mut self) -> bool {
    self.selected.take().is_some()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scene() -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.add_node(Some("spring"), None, &[]);
    scene.add_node(None, None, &[]);
    scene
  }

  #[test]
  fn select_then_dismiss() {
    let scene = scene();
    let mut popup = SelectionPopup::new();
    let shown = popup.select(&scene, 0);
    assert_eq!(shown.content.title, "Spring");
    assert_eq!(popup.selected(), Some(0));
    assert!(popup.dismiss());
    assert_eq!(popup.selected(), None);
    assert!(!popup.dismiss());
  }

  #[test]
  fn unnamed_part_gets_generic_title() {
    let scene = scene();
    let shown = SelectionPopup::new().select(&scene, 1);
    assert_eq!(shown.content.title, UNNAMED_TITLE);
    assert!(shown.content.text.is_empty());
  }
}
