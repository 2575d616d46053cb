//! Front-end session state: the encounter plus what the screen shows.

use crate::core::GameConfig;
use crate::encounter::{Encounter, EncounterEvent, EncounterState};
use crate::progression::{lock_recover, SharedGallery, SharedLedger};
use crate::ui::input::{Action, HoldTracker};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::time::Instant;

const MAX_MESSAGES: usize = 8;
const LEVEL_UP_BANNER_SECONDS: f64 = 2.5;

/// Which screen is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Encounter,
    Gallery,
}

pub struct App {
    pub encounter: Encounter,
    pub view: View,
    pub confirm_reset: bool,
    /// Newest last.
    pub messages: VecDeque<String>,
    /// Seconds left on the level-up banner.
    pub level_up_timer: f64,
    pub should_quit: bool,
    hold: HoldTracker,
    rng: StdRng,
}

impl App {
    pub fn new(config: &GameConfig, ledger: SharedLedger, gallery: SharedGallery) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut app = Self {
            encounter: Encounter::new(ledger, gallery),
            view: View::Encounter,
            confirm_reset: false,
            messages: VecDeque::new(),
            level_up_timer: 0.0,
            should_quit: false,
            hold: HoldTracker::new(),
            rng,
        };
        app.push_message("Press Space to cast.".to_string());
        app
    }

    pub fn ledger(&self) -> &SharedLedger {
        self.encounter.ledger()
    }

    pub fn gallery(&self) -> &SharedGallery {
        self.encounter.gallery()
    }

    fn push_message(&mut self, message: String) {
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Apply one input action received at `now`.
    pub fn handle(&mut self, action: Action, now: Instant) {
        if self.confirm_reset {
            match action {
                Action::Confirm => {
                    lock_recover(self.ledger()).reset_progress();
                    self.push_message("Progress reset.".to_string());
                    self.confirm_reset = false;
                }
                Action::PrimaryReleased => self.release(),
                _ => self.confirm_reset = false,
            }
            return;
        }

        match action {
            Action::Primary => {
                let fresh = self.hold.press(now);
                // Repeats only matter while the zone is being held up
                if fresh || self.encounter.is_reeling() {
                    if self.view == View::Gallery {
                        self.view = View::Encounter;
                        return;
                    }
                    let events = self.encounter.pointer_down(&mut self.rng);
                    self.absorb(events);
                }
            }
            Action::PrimaryReleased => self.release(),
            Action::ToggleGallery => {
                self.view = match self.view {
                    View::Encounter => View::Gallery,
                    View::Gallery => View::Encounter,
                };
            }
            Action::RequestReset => self.confirm_reset = true,
            Action::Quit => self.should_quit = true,
            Action::Confirm | Action::Cancel => {}
        }
    }

    fn release(&mut self) {
        self.hold.release();
        self.encounter.pointer_up();
    }

    /// Advance the game by `dt` seconds.
    pub fn update(&mut self, dt: f64, now: Instant) {
        if self.hold.poll_released(now) {
            self.encounter.pointer_up();
        }
        self.level_up_timer = (self.level_up_timer - dt).max(0.0);

        let events = self.encounter.tick(dt, &mut self.rng);
        self.absorb(events);
    }

    fn absorb(&mut self, events: Vec<EncounterEvent>) {
        for event in events {
            let message = match &event {
                EncounterEvent::ThrowStarted => "Time your throw...".to_string(),
                EncounterEvent::ThrowResolved { outcome, line_cap } => {
                    format!("{} Line flies out to {:.0}.", outcome.message(), line_cap)
                }
                EncounterEvent::LineReady => "Something's biting! Press Space to reel.".to_string(),
                EncounterEvent::ReelStarted { difficulty } => {
                    format!("{} on the line! Hold Space to lift.", difficulty.name())
                }
                EncounterEvent::Caught { candidate, award } => format!(
                    "Caught {} ({:.2} kg) +{} XP",
                    candidate.name(),
                    candidate.weight,
                    award.exp_gained
                ),
                EncounterEvent::Escaped { candidate, result } => {
                    format!("{} The {} got away.", result.message(), candidate.name())
                }
                EncounterEvent::Dismissed => continue,
            };
            self.push_message(message);

            if let EncounterEvent::Caught { .. } = event {
                let mut ledger = lock_recover(self.encounter.ledger());
                if ledger.take_level_up() {
                    let level = ledger.current_level();
                    drop(ledger);
                    self.level_up_timer = LEVEL_UP_BANNER_SECONDS;
                    self.push_message(format!("Level up! You are now level {}.", level));
                }
            }
        }
    }

    /// One-line hint for the status bar.
    pub fn status_text(&self) -> &'static str {
        if self.confirm_reset {
            return "Reset all progress? (y/n)";
        }
        match self.encounter.state() {
            EncounterState::Idle => "Press Space to cast",
            EncounterState::ThrowCheck => "Press Space when the pointer hits the arc",
            EncounterState::Casting => "Line paying out...",
            EncounterState::ReadyToReel => "Fish on! Press Space to reel",
            EncounterState::ReelCheck => "Hold Space to keep the fish in the zone",
            EncounterState::Resolved => "Press Space to continue",
        }
    }
}
