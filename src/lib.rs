//! Golden Egg Viewer: a password-gated, browser-based viewer for one glTF model.
//!
//! The binary serves a single page, the model file and a WebSocket. Every
//! visitor gets a [`session::ViewerSession`] that owns the interaction state;
//! the page only draws what the session tells it.

pub mod assembly;
pub mod camera;
pub mod config;
pub mod content;
pub mod error;
pub mod gate;
pub mod interactive;
pub mod loader;
pub mod popup;
pub mod protocol;
pub mod scene;
pub mod server;
pub mod session;
pub mod viewer_html;
pub mod watcher;

pub use error::{Result, ViewerError};
