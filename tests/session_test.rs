use std::path::PathBuf;

use golden_egg_viewer::{
  config::ViewerConfig,
  loader::{parse_asset, LoadState},
  protocol::{ClientMessage, ServerMessage},
  scene::{Color, SurfaceColor},
  session::ViewerSession,
};

const TOP_SHELL: usize = 0;
const HINGE: usize = 1;
const SPRING: usize = 2;
const BALL_BEARING: usize = 3;

const STEEL: Color = Color([0.56, 0.57, 0.58, 1.0]);

fn egg() -> LoadState {
  let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/egg.gltf");
  let scene = parse_asset(&std::fs::read(path).unwrap()).unwrap();
  LoadState::ready(scene)
}

fn unlocked_session() -> ViewerSession {
  let mut session = ViewerSession::new(ViewerConfig::default(), egg());
  let replies = session.handle(ClientMessage::Unlock {
    password: "goldenegg".into(),
  });
  assert_eq!(replies[0], ServerMessage::Unlocked);
  session
}

fn popups(replies: &[ServerMessage]) -> Vec<(usize, String)> {
  replies
    .iter()
    .filter_map(|reply| match reply {
      ServerMessage::Popup { node, title, .. } => Some((*node, title.clone())),
      _ => None,
    })
    .collect()
}

#[test]
fn gate_blocks_until_the_right_password() {
  let mut session = ViewerSession::new(ViewerConfig::default(), egg());
  let denied = session.handle(ClientMessage::Unlock { password: "wrong".into() });
  assert_eq!(
    denied,
    vec![ServerMessage::AccessDenied {
      message: "Incorrect password".into()
    }]
  );
  assert!(session.handle(ClientMessage::Click { node: SPRING }).is_empty());

  let replies = session.handle(ClientMessage::Unlock {
    password: "goldenegg".into(),
  });
  assert!(session.is_unlocked());
  let ServerMessage::AssetReady { colors, .. } = &replies[1] else {
    panic!("expected asset_ready, got {:?}", replies);
  };
  assert!(colors.contains(&SurfaceColor {
    node: SPRING,
    surface: 0,
    color: STEEL
  }));
}

#[test]
fn every_interactive_part_selects_itself_once() {
  let mut session = unlocked_session();
  for node in [TOP_SHELL, SPRING] {
    let replies = session.handle(ClientMessage::Click { node });
    assert_eq!(popups(&replies).len(), 1);
    assert_eq!(popups(&replies)[0].0, node);
  }
}

#[test]
fn nested_click_selects_the_owning_part_only() {
  let mut session = unlocked_session();
  let replies = session.handle(ClientMessage::Click { node: HINGE });
  assert_eq!(popups(&replies), vec![(TOP_SHELL, "Top Shell".to_string())]);
  assert_eq!(session.selected(), Some(TOP_SHELL));
}

#[test]
fn ball_bearing_is_never_interactive() {
  let mut session = unlocked_session();
  assert!(session.handle(ClientMessage::PointerOver { node: BALL_BEARING }).is_empty());
  assert!(session.handle(ClientMessage::Click { node: BALL_BEARING }).is_empty());
  assert_eq!(session.selected(), None);
}

#[test]
fn hover_cycles_restore_the_loaded_colour() {
  let mut session = unlocked_session();
  for _ in 0..25 {
    let over = session.handle(ClientMessage::PointerOver { node: SPRING });
    assert_eq!(
      over,
      vec![ServerMessage::Colors {
        colors: vec![SurfaceColor {
          node: SPRING,
          surface: 0,
          color: STEEL.darkened(0.7)
        }]
      }]
    );
    let out = session.handle(ClientMessage::PointerOut { node: SPRING });
    assert_eq!(
      out,
      vec![ServerMessage::Colors {
        colors: vec![SurfaceColor {
          node: SPRING,
          surface: 0,
          color: STEEL
        }]
      }]
    );
  }
}

#[test]
fn dismiss_clears_the_selection() {
  let mut session = unlocked_session();
  session.handle(ClientMessage::Click { node: SPRING });
  assert_eq!(session.handle(ClientMessage::Dismiss), vec![ServerMessage::PopupClosed]);
  assert_eq!(session.selected(), None);
  assert!(session.handle(ClientMessage::Dismiss).is_empty());
}

#[test]
fn ticks_rotate_by_a_fixed_step() {
  let mut session = unlocked_session();
  let mut last = 0.0;
  for _ in 0..10 {
    let replies = session.handle(ClientMessage::Tick);
    let [ServerMessage::Rotation { y }] = replies.as_slice() else {
      panic!("expected rotation, got {:?}", replies);
    };
    assert!((y - last - 0.005).abs() < 1e-6);
    last = *y;
  }
}

#[test]
fn drag_session_tracks_pitch_within_limits() {
  let mut session = unlocked_session();
  session.handle(ClientMessage::PointerDown { x: 100.0, y: 100.0 });
  let replies = session.handle(ClientMessage::PointerMove { x: 100.0, y: -10_000.0 });
  let [ServerMessage::Camera { yaw, pitch }] = replies.as_slice() else {
    panic!("expected camera, got {:?}", replies);
  };
  assert_eq!(*yaw, 0.0);
  assert_eq!(*pitch, std::f32::consts::FRAC_PI_2);

  session.handle(ClientMessage::PointerUp);
  assert!(session.handle(ClientMessage::PointerMove { x: 0.0, y: 0.0 }).is_empty());
}

fn asset_version(replies: &[ServerMessage]) -> u64 {
  replies
    .iter()
    .find_map(|reply| match reply {
      ServerMessage::AssetReady { version, .. } => Some(*version),
      _ => None,
    })
    .expect("asset_ready in replies")
}

#[test]
fn session_opened_after_a_reload_sees_a_new_version() {
  let mut first = ViewerSession::new(ViewerConfig::default(), egg());
  let before = asset_version(&first.handle(ClientMessage::Unlock {
    password: "goldenegg".into(),
  }));

  // reconnect: a fresh session on the reloaded asset
  let mut second = ViewerSession::new(ViewerConfig::default(), egg());
  let after = asset_version(&second.handle(ClientMessage::Unlock {
    password: "goldenegg".into(),
  }));
  assert_ne!(before, after);
}

#[test]
fn asset_ready_lists_the_bearing_as_inert() {
  let mut session = ViewerSession::new(ViewerConfig::default(), egg());
  let replies = session.handle(ClientMessage::Unlock {
    password: "goldenegg".into(),
  });
  let ServerMessage::AssetReady { inert, .. } = &replies[1] else {
    panic!("expected asset_ready, got {:?}", replies);
  };
  assert_eq!(inert, &vec![BALL_BEARING]);
  assert!(!inert.contains(&TOP_SHELL));
}
