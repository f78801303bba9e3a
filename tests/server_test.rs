use std::path::PathBuf;

use axum::{
  body::{to_bytes, Body},
  http::{Request, StatusCode},
};
use golden_egg_viewer::{
  config::ViewerConfig,
  loader::load_and_publish,
  server::{router, AppState},
};
use serde_json::Value;
use tower::ServiceExt;

fn fixture() -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/egg.gltf")
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Vec<u8>) {
  let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
  let response = router(state).oneshot(request).await.unwrap();
  let status = response.status();
  let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  (status, body.to_vec())
}

async fn get_json(state: AppState, uri: &str) -> Value {
  let (status, body) = get(state, uri).await;
  assert_eq!(status, StatusCode::OK);
  serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn index_serves_the_viewer_page() {
  let state = AppState::new(fixture(), ViewerConfig::default());
  let (status, body) = get(state, "/").await;
  assert_eq!(status, StatusCode::OK);
  let html = String::from_utf8(body).unwrap();
  assert!(html.contains("gate-form"));
  assert!(html.contains("GLTFLoader"));
  // picking skips parts the session lists as inert
  assert!(html.contains("inertNodes.has"));
}

#[tokio::test]
async fn status_is_loading_until_the_asset_resolves() {
  let state = AppState::new(fixture(), ViewerConfig::default());
  let status = get_json(state, "/api/status").await;
  assert_eq!(status["state"], "loading");
  assert!(status.get("parts").is_none());
}

#[tokio::test]
async fn status_lists_root_parts_once_loaded() {
  let state = AppState::new(fixture(), ViewerConfig::default());
  load_and_publish(&state.asset_path, &state.config, &state.load).await;

  let status = get_json(state, "/api/status").await;
  assert_eq!(status["state"], "ready");
  let parts = status["parts"].as_array().unwrap();
  let names: Vec<&str> = parts.iter().map(|p| p["name"].as_str().unwrap()).collect();
  assert_eq!(names, vec!["top_shell", "spring", "ball_bearing"]);
  assert_eq!(parts[2]["interactive"], false);
  assert_eq!(parts[0]["interactive"], true);
}

#[tokio::test]
async fn status_reports_a_failed_load() {
  let state = AppState::new(PathBuf::from("missing/GoldenEgg.glb"), ViewerConfig::default());
  load_and_publish(&state.asset_path, &state.config, &state.load).await;

  let status = get_json(state, "/api/status").await;
  assert_eq!(status["state"], "failed");
  assert!(status["message"].as_str().unwrap().contains("GoldenEgg.glb"));
}

#[tokio::test]
async fn asset_route_serves_the_model_file() {
  let state = AppState::new(fixture(), ViewerConfig::default());
  let (status, body) = get(state, "/asset").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, std::fs::read(fixture()).unwrap());
}
