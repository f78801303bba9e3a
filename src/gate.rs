//! Password gate in front of the viewer.
//!
//! A plain string comparison against a compiled-in constant. It keeps casual
//! visitors out of the page and nothing more.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateState {
  #[default]
  Locked,
  Unlocked,
}

#[derive(Clone, Debug)]
pub struct AccessGate {
  password: String,
  state: GateState,
}

/// Message shown to the user after a wrong password.
pub const DENIED_MESSAGE: &str = "Incorrect password";

impl AccessGate {
  pub fn new(password: impl Into<String>) -> Self {
    Self {
      password: password.into(),
      state: GateState::Locked,
    }
  }

  pub fn state(&self) -> GateState {
    self.state
  }

  pub fn is_unlocked(&self) -> bool {
    self.state == GateState::Unlocked
  }

  /// Unlocks on an exact match. A miss leaves the gate as it was.
  pub fn submit(&mut self, attempt: &str) -> Result<(), &'static str> {
    if attempt == self.password {
      self.state = GateState::Unlocked;
      Ok(())
    } else {
      Err(DENIED_MESSAGE)
    }
  }
}
