//! Error types for loading and serving the viewer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
  /// The asset file could not be read.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The asset was read but is not a valid glTF document.
  #[error("failed to parse glTF: {0}")]
  Gltf(#[from] gltf::Error),

  /// The document parsed but contains no scene to display.
  #[error("asset contains no scene")]
  EmptyScene,

  /// The node tree has a cycle or a node with several parents.
  #[error("invalid node hierarchy: {0}")]
  InvalidHierarchy(String),

  #[error("file watcher error: {0}")]
  Watch(#[from] notify::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
