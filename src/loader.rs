//! Asynchronous asset loading and load-time name validation.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::watch;

use crate::config::ViewerConfig;
use crate::content;
use crate::error::{Result, ViewerError};
use crate::scene::SceneGraph;

static GENERATION: AtomicU64 = AtomicU64::new(0);

/// State of the shared asset, published to every session.
#[derive(Clone, Debug, Default)]
pub enum LoadState {
  #[default]
  Loading,
  /// `generation` is unique per successful load within the process.
  Ready { generation: u64, scene: Arc<SceneGraph> },
  Failed(String),
}

impl LoadState {
  /// Stamps a freshly loaded scene with the next generation.
  pub fn ready(scene: SceneGraph) -> Self {
    LoadState::Ready {
      generation: GENERATION.fetch_add(1, Ordering::Relaxed) + 1,
      scene: Arc::new(scene),
    }
  }

  pub fn scene(&self) -> Option<&Arc<SceneGraph>> {
    match self {
      LoadState::Ready { scene, .. } => Some(scene),
      _ => None,
    }
  }

  pub fn generation(&self) -> Option<u64> {
    match self {
      LoadState::Ready { generation, .. } => Some(*generation),
      _ => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      LoadState::Loading => "loading",
      LoadState::Ready { .. } => "ready",
      LoadState::Failed(_) => "failed",
    }
  }
}

impl From<Result<SceneGraph>> for LoadState {
  fn from(result: Result<SceneGraph>) -> Self {
    match result {
      Ok(scene) => LoadState::ready(scene),
      Err(err) => LoadState::Failed(err.to_string()),
    }
  }
}

/// Reads and parses a `.glb` (or JSON `.gltf`) file.
pub async fn load_asset(path: &Path) -> Result<SceneGraph> {
  let bytes = tokio::fs::read(path).await.map_err(|source| ViewerError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  let scene = parse_asset(&bytes)?;
  info!("Loaded {:?}: {} node(s), {} root part(s)", path, scene.len(), scene.roots().len());
  Ok(scene)
}

pub fn parse_asset(bytes: &[u8]) -> Result<SceneGraph> {
  let gltf = gltf::Gltf::from_slice(bytes)?;
  SceneGraph::from_document(&gltf.document)
}

/// Expected names absent from the scene, compared case-insensitively.
pub fn missing_names<'a>(scene: &SceneGraph, expected: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
  let present = scene.names();
  expected
    .into_iter()
    .filter(|name| !present.iter().any(|p| p.eq_ignore_ascii_case(name)))
    .collect()
}

/// Logs a warning for every expected name the scene lacks.
pub fn warn_missing_names<'a>(scene: &SceneGraph, expected: impl IntoIterator<Item = &'a str>) {
  for name in missing_names(scene, expected) {
    warn!("Asset has no node named {:?}; its popup or exclusion rule will never apply", name);
  }
}

/// Loads the asset, validates expected names and publishes the outcome.
pub async fn load_and_publish(path: &Path, config: &ViewerConfig, tx: &watch::Sender<LoadState>) {
  let result = load_asset(path).await;
  match &result {
    Ok(scene) => {
      let mut expected: Vec<&str> = content::expected_names().collect();
      expected.extend(config.excluded_nodes.iter().map(String::as_str));
      warn_missing_names(scene, expected);
    }
    Err(err) => error!("Failed to load {:?}: {}", path, err),
  }
  tx.send_replace(LoadState::from(result));
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Two root parts, one with a nested mesh, and an excluded bearing.
  const EGG_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [ { "nodes": [0, 2] } ],
    "nodes": [
      { "name": "top_shell", "mesh": 0, "children": [1] },
      { "name": "spring", "mesh": 1 },
      { "name": "ball_bearing", "mesh": 0 }
    ],
    "meshes": [
      { "primitives": [ { "attributes": { "POSITION": 0 }, "material": 0 } ] },
      { "primitives": [ { "attributes": { "POSITION": 0 } } ] }
    ],
    "materials": [
      { "pbrMetallicRoughness": { "baseColorFactor": [1.0, 0.8, 0.2, 1.0] } }
    ],
    "accessors": [
      { "componentType": 5126, "count": 3, "type": "VEC3", "min": [0, 0, 0], "max": [1, 1, 1] }
    ]
  }"#;

  #[test]
  fn parses_nodes_and_base_colors() {
    let scene = parse_asset(EGG_GLTF.as_bytes()).unwrap();
    assert_eq!(scene.roots(), &[0, 2]);
    assert_eq!(scene.name_of(1), Some("spring"));
    assert_eq!(scene.node(1).unwrap().parent, Some(0));
    let shell = scene.node(0).unwrap();
    assert_eq!(shell.surfaces[0].base_color().0, [1.0, 0.8, 0.2, 1.0]);
    // no material: glTF default base colour
    let spring = scene.node(1).unwrap();
    assert_eq!(spring.surfaces[0].base_color(), crate::scene::Color::WHITE);
  }

  #[test]
  fn garbage_is_a_gltf_error() {
    let err = parse_asset(b"not a model").unwrap_err();
    assert!(matches!(err, ViewerError::Gltf(_)));
  }

  #[test]
  fn document_without_scene_is_rejected() {
    let err = parse_asset(br#"{ "asset": { "version": "2.0" } }"#).unwrap_err();
    assert!(matches!(err, ViewerError::EmptyScene));
  }

  #[test]
  fn cyclic_hierarchy_is_rejected() {
    let cyclic = br#"{
      "asset": { "version": "2.0" },
      "scenes": [ { "nodes": [0] } ],
      "nodes": [
        { "name": "a", "children": [1] },
        { "name": "b", "children": [0] }
      ]
    }"#;
    let err = parse_asset(cyclic).unwrap_err();
    assert!(matches!(err, ViewerError::InvalidHierarchy(_)));
    assert_eq!(LoadState::from(Err(err)).label(), "failed");
  }

  #[test]
  fn node_with_two_parents_is_rejected() {
    let shared = br#"{
      "asset": { "version": "2.0" },
      "scenes": [ { "nodes": [0, 1] } ],
      "nodes": [
        { "name": "a", "children": [2] },
        { "name": "b", "children": [2] },
        { "name": "c" }
      ]
    }"#;
    let err = parse_asset(shared).unwrap_err();
    assert!(matches!(err, ViewerError::InvalidHierarchy(_)));
  }

  #[test]
  fn each_load_gets_a_new_generation() {
    let first = LoadState::ready(SceneGraph::new());
    let second = LoadState::ready(SceneGraph::new());
    assert!(second.generation() > first.generation());
    assert_eq!(LoadState::Loading.generation(), None);
  }

  #[test]
  fn reports_missing_expected_names() {
    let scene = parse_asset(EGG_GLTF.as_bytes()).unwrap();
    let missing = missing_names(&scene, ["Spring", "ball_bearing", "crank"]);
    assert_eq!(missing, vec!["crank"]);
  }

  #[tokio::test]
  async fn missing_file_is_an_io_error() {
    let err = load_asset(Path::new("does/not/exist.glb")).await.unwrap_err();
    assert!(matches!(err, ViewerError::Io { .. }));
    let state = LoadState::from(Err(err));
    assert_eq!(state.label(), "failed");
  }

  #[tokio::test]
  async fn publishes_the_loaded_scene() {
    let dir = std::env::temp_dir().join(format!("golden-egg-loader-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("egg.gltf");
    std::fs::write(&path, EGG_GLTF).unwrap();

    let (tx, rx) = watch::channel(LoadState::Loading);
    load_and_publish(&path, &ViewerConfig::default(), &tx).await;
    let state = rx.borrow().clone();
    assert_eq!(state.scene().map(|scene| scene.roots().len()), Some(2));

    std::fs::remove_file(&path).unwrap();
    load_and_publish(&path, &ViewerConfig::default(), &tx).await;
    assert_eq!(rx.borrow().label(), "failed");
  }
}
