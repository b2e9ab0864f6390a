//! Keyboard state for the runner.
//!
//! The simulation only ever asks "is this key held right now?". Terminals
//! report key *events*, so [`KeyTracker`] folds crossterm events into a
//! [`HeldKeys`] set. With keyboard enhancement the terminal reports releases
//! and the set is exact; without it a key stays held while presses/repeats
//! keep arriving and expires shortly after they stop.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Hold window after the first press, long enough to bridge the OS
/// auto-repeat delay.
pub const INITIAL_HOLD_MS: f64 = 550.0;
/// Hold window refreshed by each auto-repeat.
pub const REPEAT_HOLD_MS: f64 = 120.0;

/// A key the players can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyId {
    Char(char),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl KeyId {
    /// Letters are folded to lowercase so Shift or Caps Lock don't break a binding.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char(c) => Some(Self::Char(c.to_ascii_lowercase())),
            KeyCode::Up => Some(Self::ArrowUp),
            KeyCode::Down => Some(Self::ArrowDown),
            KeyCode::Left => Some(Self::ArrowLeft),
            KeyCode::Right => Some(Self::ArrowRight),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Char(c) => c.to_ascii_uppercase().to_string(),
            Self::ArrowUp => "\u{2191}".to_string(),
            Self::ArrowDown => "\u{2193}".to_string(),
            Self::ArrowLeft => "\u{2190}".to_string(),
            Self::ArrowRight => "\u{2192}".to_string(),
        }
    }
}

/// The set of currently held keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: HashSet<KeyId>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyId) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: KeyId) {
        self.keys.remove(&key);
    }

    pub fn is_held(&self, key: KeyId) -> bool {
        self.keys.contains(&key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<KeyId> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = KeyId>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// How the terminal tells us a key went up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseMode {
    /// Release events are delivered (keyboard enhancement active).
    Reported,
    /// No release events; keys expire when presses stop arriving.
    Decay { initial_ms: f64, repeat_ms: f64 },
}

impl ReleaseMode {
    pub fn decay() -> Self {
        Self::Decay {
            initial_ms: INITIAL_HOLD_MS,
            repeat_ms: REPEAT_HOLD_MS,
        }
    }
}

/// Folds terminal key events into a [`HeldKeys`] set.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    mode: ReleaseMode,
    held: HeldKeys,
    deadlines: HashMap<KeyId, f64>,
}

impl KeyTracker {
    pub fn new(mode: ReleaseMode) -> Self {
        Self {
            mode,
            held: HeldKeys::new(),
            deadlines: HashMap::new(),
        }
    }

    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    /// Record a key event observed at `now_ms`.
    pub fn handle(&mut self, event: &KeyEvent, now_ms: f64) {
        let Some(key) = KeyId::from_key_code(event.code) else {
            return;
        };

        match (self.mode, event.kind) {
            (_, KeyEventKind::Release) => {
                self.held.release(key);
                self.deadlines.remove(&key);
            }
            (ReleaseMode::Reported, _) => self.held.press(key),
            (
                ReleaseMode::Decay {
                    initial_ms,
                    repeat_ms,
                },
                _,
            ) => {
                let window = if self.held.is_held(key) {
                    repeat_ms
                } else {
                    initial_ms
                };
                self.held.press(key);
                self.deadlines.insert(key, now_ms + window);
            }
        }
    }

    /// Drop keys whose hold window has passed. No-op in `Reported` mode.
    pub fn expire(&mut self, now_ms: f64) {
        let held = &mut self.held;
        self.deadlines.retain(|key, deadline| {
            let alive = *deadline > now_ms;
            if !alive {
                held.release(*key);
            }
            alive
        });
    }

    pub fn held(&self) -> &HeldKeys {
        &self.held
    }

    pub fn clear(&mut self) {
        self.held.clear();
        self.deadlines.clear();
    }
}

/// Non-player controls handled by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    StartOrRestart,
    ToggleHitboxes,
    Quit,
}

/// Map a key press to a host control, if it is one. Player bindings are
/// never host controls, so `h` only toggles hitboxes when no player uses it.
pub fn classify(event: &KeyEvent, bindings: &[crate::player::ControlBindings]) -> Option<ControlAction> {
    // Only a fresh press counts; holding Enter must not restart every repeat
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(ControlAction::Quit);
    }

    if let Some(key) = KeyId::from_key_code(event.code) {
        if bindings.iter().any(|b| b.uses(key)) {
            return None;
        }
    }

    match event.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(ControlAction::StartOrRestart),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(ControlAction::ToggleHitboxes),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(ControlAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ControlBindings;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_held_keys_press_release() {
        let mut keys = HeldKeys::new();
        keys.press(KeyId::Char('w'));
        keys.press(KeyId::ArrowUp);
        assert!(keys.is_held(KeyId::Char('w')));
        assert!(keys.is_held(KeyId::ArrowUp));

        keys.release(KeyId::Char('w'));
        assert!(!keys.is_held(KeyId::Char('w')));
        assert!(keys.is_held(KeyId::ArrowUp));

        // Releasing an unheld key is harmless
        keys.release(KeyId::Char('x'));
        keys.clear();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_key_id_folds_case() {
        assert_eq!(
            KeyId::from_key_code(KeyCode::Char('W')),
            Some(KeyId::Char('w'))
        );
        assert_eq!(KeyId::from_key_code(KeyCode::Up), Some(KeyId::ArrowUp));
        assert_eq!(KeyId::from_key_code(KeyCode::Tab), None);
    }

    #[test]
    fn test_tracker_reported_mode_is_exact() {
        let mut tracker = KeyTracker::new(ReleaseMode::Reported);
        tracker.handle(&key(KeyCode::Char('s'), KeyEventKind::Press), 0.0);
        tracker.expire(10_000.0);
        assert!(tracker.held().is_held(KeyId::Char('s')));

        tracker.handle(&key(KeyCode::Char('s'), KeyEventKind::Release), 10_001.0);
        assert!(!tracker.held().is_held(KeyId::Char('s')));
    }

    #[test]
    fn test_tracker_decay_mode_expires() {
        let mut tracker = KeyTracker::new(ReleaseMode::decay());
        tracker.handle(&key(KeyCode::Down, KeyEventKind::Press), 0.0);

        tracker.expire(INITIAL_HOLD_MS - 1.0);
        assert!(tracker.held().is_held(KeyId::ArrowDown));

        tracker.expire(INITIAL_HOLD_MS + 1.0);
        assert!(!tracker.held().is_held(KeyId::ArrowDown));
    }

    #[test]
    fn test_tracker_decay_mode_repeat_extends_hold() {
        let mut tracker = KeyTracker::new(ReleaseMode::decay());
        tracker.handle(&key(KeyCode::Down, KeyEventKind::Press), 0.0);
        tracker.handle(&key(KeyCode::Down, KeyEventKind::Press), 500.0);

        tracker.expire(500.0 + REPEAT_HOLD_MS - 1.0);
        assert!(tracker.held().is_held(KeyId::ArrowDown));

        tracker.expire(500.0 + REPEAT_HOLD_MS + 1.0);
        assert!(!tracker.held().is_held(KeyId::ArrowDown));
    }

    #[test]
    fn test_classify_controls() {
        let bindings = [ControlBindings::player_one(), ControlBindings::player_two()];

        assert_eq!(
            classify(&key(KeyCode::Enter, KeyEventKind::Press), &bindings),
            Some(ControlAction::StartOrRestart)
        );
        assert_eq!(
            classify(&key(KeyCode::Char('h'), KeyEventKind::Press), &bindings),
            Some(ControlAction::ToggleHitboxes)
        );
        assert_eq!(
            classify(&key(KeyCode::Esc, KeyEventKind::Press), &bindings),
            Some(ControlAction::Quit)
        );
        // Player keys are not host controls
        assert_eq!(
            classify(&key(KeyCode::Char('w'), KeyEventKind::Press), &bindings),
            None
        );
        // Releases never trigger controls
        assert_eq!(
            classify(&key(KeyCode::Enter, KeyEventKind::Release), &bindings),
            None
        );
    }

    #[test]
    fn test_classify_ctrl_c_quits() {
        let event = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(classify(&event, &[]), Some(ControlAction::Quit));
    }

    #[test]
    fn test_classify_ignores_repeats() {
        let bindings = ControlBindings::defaults();
        assert_eq!(
            classify(&key(KeyCode::Enter, KeyEventKind::Repeat), &bindings),
            None
        );
        assert_eq!(
            classify(&key(KeyCode::Char(' '), KeyEventKind::Repeat), &bindings),
            None
        );
        assert_eq!(
            classify(&key(KeyCode::Char('h'), KeyEventKind::Repeat), &bindings),
            None
        );
    }
}
