//! Key mapping and hold detection for the terminal front end.
//!
//! Most terminals report a held key as a stream of repeated presses and
//! never send a release, so a hold is considered over once no repeat has
//! arrived for `HOLD_RELEASE_MS`. The first repeat comes much later than the
//! rest, so a press within `REPEAT_DELAY_MS` of the press that started a hold
//! still belongs to that hold.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};

pub const HOLD_RELEASE_MS: u64 = 150;
/// Longest usual OS delay before auto-repeat starts.
pub const REPEAT_DELAY_MS: u64 = 600;

/// What a key means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Cast, click the dial, reel, lift, dismiss.
    Primary,
    /// Primary key let go (only on terminals that report releases).
    PrimaryReleased,
    ToggleGallery,
    RequestReset,
    Confirm,
    Cancel,
    Quit,
}

/// Translate a key event. `confirming` switches to the y/n prompt keys.
pub fn action_for_key(key: KeyEvent, confirming: bool) -> Option<Action> {
    let is_primary = matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter);

    if key.kind == KeyEventKind::Release {
        return is_primary.then_some(Action::PrimaryReleased);
    }

    if confirming {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Confirm),
            _ => Some(Action::Cancel),
        };
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Primary),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(Action::ToggleGallery),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::RequestReset),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Tracks whether the primary key is being held down.
#[derive(Debug, Clone, Default)]
pub struct HoldTracker {
    last_press: Option<Instant>,
    /// Fresh press that began the current key-down, kept across a lapse.
    hold_start: Option<Instant>,
}

impl HoldTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn window() -> Duration {
        Duration::from_millis(HOLD_RELEASE_MS)
    }

    /// Register a press or repeat. Returns true for a fresh press.
    pub fn press(&mut self, now: Instant) -> bool {
        let awaiting_first_repeat = self.hold_start.is_some_and(|t| {
            now.saturating_duration_since(t) < Duration::from_millis(REPEAT_DELAY_MS)
        });
        let fresh = !self.is_held(now) && !awaiting_first_repeat;
        if fresh {
            self.hold_start = Some(now);
        }
        self.last_press = Some(now);
        fresh
    }

    /// Explicit release from the terminal.
    pub fn release(&mut self) -> bool {
        self.hold_start = None;
        self.last_press.take().is_some()
    }

    pub fn is_held(&self, now: Instant) -> bool {
        self.last_press
            .is_some_and(|t| now.saturating_duration_since(t) < Self::window())
    }

    /// Returns true once when a hold lapses without an explicit release.
    pub fn poll_released(&mut self, now: Instant) -> bool {
        if self.last_press.is_some() && !self.is_held(now) {
            self.last_press = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(action_for_key(key(KeyCode::Char(' ')), false), Some(Action::Primary));
        assert_eq!(action_for_key(key(KeyCode::Enter), false), Some(Action::Primary));
        assert_eq!(action_for_key(key(KeyCode::Char('g')), false), Some(Action::ToggleGallery));
        assert_eq!(action_for_key(key(KeyCode::Char('r')), false), Some(Action::RequestReset));
        assert_eq!(action_for_key(key(KeyCode::Esc), false), Some(Action::Quit));
        assert_eq!(action_for_key(key(KeyCode::Char('x')), false), None);
    }

    #[test]
    fn test_confirm_prompt_mapping() {
        assert_eq!(action_for_key(key(KeyCode::Char('y')), true), Some(Action::Confirm));
        assert_eq!(action_for_key(key(KeyCode::Char('n')), true), Some(Action::Cancel));
        assert_eq!(action_for_key(key(KeyCode::Char('q')), true), Some(Action::Cancel));
    }

    #[test]
    fn test_release_events() {
        let mut release = key(KeyCode::Char(' '));
        release.kind = KeyEventKind::Release;
        assert_eq!(action_for_key(release, false), Some(Action::PrimaryReleased));

        let mut other = key(KeyCode::Char('g'));
        other.kind = KeyEventKind::Release;
        assert_eq!(action_for_key(other, false), None);
    }

    #[test]
    fn test_repeats_extend_hold() {
        let start = Instant::now();
        let mut hold = HoldTracker::new();

        assert!(hold.press(start));
        assert!(!hold.press(start + Duration::from_millis(40)));
        assert!(hold.is_held(start + Duration::from_millis(150)));
        assert!(!hold.poll_released(start + Duration::from_millis(150)));
        assert!(hold.poll_released(start + Duration::from_millis(200)));
        // Reported once
        assert!(!hold.poll_released(start + Duration::from_millis(300)));
        // Next press after the repeat delay is fresh again
        assert!(hold.press(start + Duration::from_millis(700)));
    }

    #[test]
    fn test_late_first_repeat_is_not_fresh() {
        let start = Instant::now();
        let mut hold = HoldTracker::new();

        assert!(hold.press(start));
        // Lapses before the OS starts repeating
        assert!(hold.poll_released(start + Duration::from_millis(200)));
        assert!(!hold.press(start + Duration::from_millis(500)));
        assert!(!hold.press(start + Duration::from_millis(530)));
        assert!(hold.is_held(start + Duration::from_millis(600)));
    }

    #[test]
    fn test_release_allows_quick_second_tap() {
        let start = Instant::now();
        let mut hold = HoldTracker::new();

        assert!(hold.press(start));
        hold.release();
        assert!(hold.press(start + Duration::from_millis(200)));
    }

    #[test]
    fn test_explicit_release() {
        let now = Instant::now();
        let mut hold = HoldTracker::new();
        hold.press(now);
        assert!(hold.release());
        assert!(!hold.is_held(now));
        assert!(!hold.release());
    }
}
