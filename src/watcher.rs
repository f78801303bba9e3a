//! Reloads the asset whenever its file changes on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{info, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::watch;

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::loader::{load_and_publish, LoadState};

const DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetChange {
  Changed,
  Removed,
}

/// Drops repeats of the same change arriving within the debounce window.
#[derive(Debug, Default)]
pub struct Debouncer {
  last: Option<(AssetChange, Instant)>,
}

impl Debouncer {
  pub fn should_fire(&mut self, change: AssetChange, now: Instant) -> bool {
    let fire = match self.last {
      Some((kind, at)) => kind != change || now.duration_since(at) > DEBOUNCE,
      None => true,
    };
    if fire {
      self.last = Some((change, now));
    }
    fire
  }
}

/// Maps a raw notify event to a change of `asset`, if it concerns it.
pub fn classify(event: &Event, asset: &Path) -> Option<AssetChange> {
  let name = asset.file_name()?;
  let touches = event.paths.iter().any(|path| path.file_name() == Some(name));
  if !touches {
    return None;
  }

  match event.kind {
    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
    _ => return None,
  }
  // presence of the file wins over the reported kind
  if asset.exists() {
    Some(AssetChange::Changed)
  } else {
    Some(AssetChange::Removed)
  }
}

/// Starts watching the asset's directory. The returned watcher must be kept
/// alive for as long as reloads are wanted.
pub fn spawn_asset_watcher(
  asset: PathBuf,
  config: Arc<ViewerConfig>,
  tx: Arc<watch::Sender<LoadState>>,
) -> Result<RecommendedWatcher> {
  let (watch_tx, mut watch_rx) = tokio::sync::mpsc::channel(100);

  let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
    Ok(event) => {
      let _ = watch_tx.blocking_send(event);
    }
    Err(err) => warn!("File watcher error: {}", err),
  })?;

  let dir = match asset.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  };
  watcher.watch(&dir, RecursiveMode::NonRecursive)?;
  info!("Watching {:?} for changes", asset);

  tokio::spawn(async move {
    let mut debouncer = Debouncer::default();
    while let Some(event) = watch_rx.recv().await {
      let Some(change) = classify(&event, &asset) else {
        continue;
      };
      if !debouncer.should_fire(change, Instant::now()) {
        continue;
      }
      match change {
        AssetChange::Changed => {
          info!("Asset changed, reloading {:?}", asset);
          load_and_publish(&asset, &config, &tx).await;
        }
        AssetChange::Removed => {
          warn!("Asset removed: {:?}", asset);
          tx.send_replace(LoadState::Failed(format!("{} was removed", asset.display())));
        }
      }
    }
  });

  Ok(watcher)
}

/// Like `spawn_asset_watcher`, but a setup failure only costs live reload.
pub fn try_spawn_asset_watcher(
  asset: PathBuf,
  config: Arc<ViewerConfig>,
  tx: Arc<watch::Sender<LoadState>>,
) -> Option<RecommendedWatcher> {
  match spawn_asset_watcher(asset.clone(), config, tx) {
    Ok(watcher) => Some(watcher),
    Err(err) => {
      warn!("Live reload disabled, cannot watch {:?}: {}", asset, err);
      None
    }
  }
}
