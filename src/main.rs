use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use golden_egg_viewer::{
  config::ViewerConfig,
  loader::load_and_publish,
  server::{self, AppState},
  watcher::try_spawn_asset_watcher,
};
use log::info;

/// Golden Egg Viewer - password-gated 3D model viewer
#[derive(Parser, Debug)]
#[command(name = "golden-egg-viewer")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Server port
  #[arg(short, long, default_value = "8080")]
  port: u16,

  /// Bind address
  #[arg(long, default_value = "127.0.0.1")]
  host: String,

  /// Model file to display (.glb or .gltf)
  #[arg(short, long, default_value = "public/GoldenEgg.glb")]
  asset: PathBuf,

  /// Auto-open browser on startup
  #[arg(short, long)]
  open: bool,

  /// Do not reload the model when its file changes
  #[arg(long)]
  no_watch: bool,

  /// Show mouse controls help
  #[arg(long)]
  help_keys: bool,
}

fn print_controls_help() {
  println!("Golden Egg Viewer - Mouse Controls\n");
  println!("  Mouse drag       Orbit camera (anywhere in the window)");
  println!("  Hover part       Darken the part under the pointer");
  println!("  Click part       Show the part's description");
  println!("  Close button     Dismiss the description");
  println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let cli = Cli::parse();

  if cli.help_keys {
    print_controls_help();
    return Ok(());
  }

  let state = AppState::new(cli.asset.clone(), ViewerConfig::default());

  // Load in the background; sessions show a placeholder until it resolves.
  let loader_state = state.clone();
  tokio::spawn(async move {
    load_and_publish(&loader_state.asset_path, &loader_state.config, &loader_state.load).await;
  });

  let _watcher = if cli.no_watch {
    None
  } else {
    try_spawn_asset_watcher(cli.asset.clone(), state.config.clone(), state.load.clone())
  };

  let app = server::router(state);

  let addr = format!("{}:{}", cli.host, cli.port);
  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .with_context(|| format!("failed to bind {}", addr))?;

  info!("Golden Egg Viewer running at http://{}", addr);
  info!("Model: {:?}", cli.asset);

  if cli.open {
    info!("Opening browser...");
    let url = format!("http://{}", addr);
    let _ = open::that(&url);
  } else {
    info!("Open your browser to http://{}", addr);
  }

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}
