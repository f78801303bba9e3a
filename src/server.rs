//! HTTP routes and the session WebSocket.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
  extract::ws::{Message, WebSocket, WebSocketUpgrade},
  extract::State,
  response::{Html, IntoResponse},
  routing::get,
  Json, Router,
};
use futures::{sink::SinkExt, stream::StreamExt, Sink};
use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::watch;
use tower_http::services::ServeFile;

use crate::config::ViewerConfig;
use crate::loader::LoadState;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::scene::NodeId;
use crate::session::ViewerSession;
use crate::viewer_html;

#[derive(Clone)]
pub struct AppState {
  pub asset_path: PathBuf,
  pub config: Arc<ViewerConfig>,
  pub load: Arc<watch::Sender<LoadState>>,
}

impl AppState {
  pub fn new(asset_path: PathBuf, config: ViewerConfig) -> Self {
    let (tx, _rx) = watch::channel(LoadState::Loading);
    Self {
      asset_path,
      config: Arc::new(config),
      load: Arc::new(tx),
    }
  }
}

#[derive(Serialize)]
struct PartInfo {
  node: NodeId,
  name: Option<String>,
  interactive: bool,
}

#[derive(Serialize)]
struct StatusResponse {
  state: &'static str,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  parts: Vec<PartInfo>,
  #[serde(skip_serializing_if = "Option::is_none")]
  message: Option<String>,
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(serve_html))
    .route("/api/status", get(asset_status))
    .route("/ws", get(websocket_handler))
    .route_service("/asset", ServeFile::new(&state.asset_path))
    .with_state(state)
}

async fn serve_html() -> Html<&'static str> {
  Html(viewer_html::HTML)
}

async fn asset_status(State(state): State<AppState>) -> Json<StatusResponse> {
  let load = state.load.borrow().clone();
  let mut response = StatusResponse {
    state: load.label(),
    parts: Vec::new(),
    message: None,
  };

  match &load {
    LoadState::Ready { scene, .. } => {
      response.parts = scene
        .roots()
        .iter()
        .map(|&node| {
          let name = scene.name_of(node).map(str::to_string);
          let interactive = !name.as_deref().is_some_and(|n| state.config.is_excluded(n));
          PartInfo {
            node,
            name,
            interactive,
          }
        })
        .collect();
    }
    LoadState::Failed(message) => response.message = Some(message.clone()),
    LoadState::Loading => {}
  }

  Json(response)
}

async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
  ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
  let (mut sender, mut receiver) = socket.split();
  let mut load_rx = state.load.subscribe();
  let initial = load_rx.borrow_and_update().clone();
  let mut session = ViewerSession::new(state.config.as_ref().clone(), initial);
  info!("Viewer connected");

  loop {
    let replies = tokio::select! {
      incoming = receiver.next() => match incoming {
        Some(Ok(Message::Text(text))) => match serde_json::from_str::<ClientMessage>(&text) {
          Ok(msg) => session.handle(msg),
          Err(err) => {
            warn!("Ignoring malformed message {:?}: {}", text, err);
            continue;
          }
        },
        Some(Ok(Message::Close(_))) | None => break,
        Some(Ok(_)) => continue,
        Some(Err(err)) => {
          debug!("WebSocket receive error: {}", err);
          break;
        }
      },
      changed = load_rx.changed() => {
        if changed.is_err() {
          break;
        }
        let load = load_rx.borrow_and_update().clone();
        session.set_asset(load)
      }
    };

    if send_all(&mut sender, replies).await.is_err() {
      break;
    }
  }

  info!("Viewer disconnected");
}

async fn send_all<S>(sender: &mut S, replies: Vec<ServerMessage>) -> Result<(), S::Error>
where
  S: Sink<Message> + Unpin,
{
  for reply in replies {
    let json = match serde_json::to_string(&reply) {
      Ok(json) => json,
      Err(err) => {
        warn!("Failed to encode {:?}: {}", reply, err);
        continue;
      }
    };
    sender.send(Message::Text(json)).await?;
  }
  Ok(())
}
