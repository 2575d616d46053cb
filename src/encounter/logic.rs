//! The encounter state machine.
//!
//! Only the stage currently in play receives input; everything else is a
//! silent no-op so a stray press during a transition cannot double-fire.

use super::types::{Cast, EncounterEvent, EncounterState, Stage};
use crate::fishing::{resolve_catch, CatchCandidate};
use crate::minigames::{BalanceCheck, BalanceResult, SkillOutcome, TimingCheck};
use crate::progression::{lock_recover, AwardSummary, SharedGallery, SharedLedger};
use rand::Rng;

/// One angler's throw-cast-reel cycle.
#[derive(Debug)]
pub struct Encounter {
    stage: Stage,
    timing: TimingCheck,
    balance: BalanceCheck,
    ledger: SharedLedger,
    gallery: SharedGallery,
}

impl Encounter {
    pub fn new(ledger: SharedLedger, gallery: SharedGallery) -> Self {
        Self {
            stage: Stage::Idle,
            timing: TimingCheck::new(),
            balance: BalanceCheck::new(),
            ledger,
            gallery,
        }
    }

    pub fn state(&self) -> EncounterState {
        self.stage.state()
    }

    /// Candidate on the line, present exactly while the state owns one.
    pub fn candidate(&self) -> Option<&CatchCandidate> {
        self.stage.cast().map(|c| &c.candidate)
    }

    pub fn throw_outcome(&self) -> Option<SkillOutcome> {
        self.stage.cast().map(|c| c.outcome)
    }

    pub fn line_length(&self) -> f64 {
        self.stage.cast().map_or(0.0, |c| c.line_length)
    }

    pub fn line_cap(&self) -> f64 {
        self.stage.cast().map_or(0.0, |c| c.line_cap)
    }

    /// Award for the catch on display, only while Resolved.
    pub fn award(&self) -> Option<&AwardSummary> {
        match &self.stage {
            Stage::Resolved { award, .. } => Some(award),
            _ => None,
        }
    }

    pub fn timing(&self) -> &TimingCheck {
        &self.timing
    }

    pub fn balance(&self) -> &BalanceCheck {
        &self.balance
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    pub fn gallery(&self) -> &SharedGallery {
        &self.gallery
    }

    pub fn is_fishing(&self) -> bool {
        self.state() != EncounterState::Idle
    }

    pub fn is_reeling(&self) -> bool {
        self.state() == EncounterState::ReelCheck
    }

    fn set_stage(&mut self, stage: Stage) {
        let from = self.stage.state();
        self.stage = stage;
        tracing::debug!(?from, to = ?self.stage.state(), "encounter stage");
    }

    /// The single action button went down.
    ///
    /// Casts from Idle, clicks the dial, reels in once the line is out,
    /// lifts the balance zone, or dismisses a landed catch.
    pub fn pointer_down<R: Rng>(&mut self, rng: &mut R) -> Vec<EncounterEvent> {
        match &self.stage {
            Stage::Idle => {
                self.timing.start(rng);
                self.set_stage(Stage::ThrowCheck);
                vec![EncounterEvent::ThrowStarted]
            }
            Stage::ThrowCheck => self.resolve_throw(rng),
            Stage::Casting(cast) if cast.line_at_cap() => self.start_reel(rng),
            Stage::Casting(_) => Vec::new(),
            Stage::ReadyToReel(_) => self.start_reel(rng),
            Stage::ReelCheck(_) => {
                self.balance.set_pressed(true);
                Vec::new()
            }
            Stage::Resolved { .. } => self.dismiss(),
        }
    }

    /// The action button came back up. Only the balance zone cares.
    pub fn pointer_up(&mut self) {
        if let Stage::ReelCheck(_) = self.stage {
            self.balance.set_pressed(false);
        }
    }

    /// Explicit reel signal. Honoured once the line is fully out.
    pub fn reel<R: Rng>(&mut self, rng: &mut R) -> Vec<EncounterEvent> {
        match &self.stage {
            Stage::Casting(cast) if cast.line_at_cap() => self.start_reel(rng),
            Stage::ReadyToReel(_) => self.start_reel(rng),
            _ => Vec::new(),
        }
    }

    /// Put away a landed catch and return to Idle.
    pub fn dismiss(&mut self) -> Vec<EncounterEvent> {
        if let Stage::Resolved { .. } = self.stage {
            self.set_stage(Stage::Idle);
            vec![EncounterEvent::Dismissed]
        } else {
            Vec::new()
        }
    }

    /// Advance everything by `dt` seconds.
    pub fn tick<R: Rng>(&mut self, dt: f64, rng: &mut R) -> Vec<EncounterEvent> {
        let mut events = Vec::new();

        // Result banners keep counting down whichever stage is live
        self.timing.tick(dt);

        match &mut self.stage {
            Stage::Casting(cast) => {
                if cast.extend(dt) {
                    let cast = cast.clone();
                    self.set_stage(Stage::ReadyToReel(cast));
                    events.push(EncounterEvent::LineReady);
                }
                self.balance.tick(dt, rng);
            }
            Stage::ReelCheck(_) => {
                if let Some(done) = self.balance.tick(dt, rng) {
                    events.extend(self.finish_reel(done.result));
                }
            }
            _ => {
                self.balance.tick(dt, rng);
            }
        }

        events
    }

    fn resolve_throw<R: Rng>(&mut self, rng: &mut R) -> Vec<EncounterEvent> {
        let Some(outcome) = self.timing.click() else {
            return Vec::new();
        };

        let level = lock_recover(&self.ledger).current_level();
        let candidate = resolve_catch(outcome, level, rng);
        let cast = Cast::new(candidate, outcome);
        let line_cap = cast.line_cap;

        self.set_stage(Stage::Casting(cast));
        vec![EncounterEvent::ThrowResolved { outcome, line_cap }]
    }

    fn start_reel<R: Rng>(&mut self, rng: &mut R) -> Vec<EncounterEvent> {
        let cast = match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Casting(cast) | Stage::ReadyToReel(cast) => cast,
            other => {
                self.stage = other;
                return Vec::new();
            }
        };

        let difficulty = cast.candidate.difficulty();
        self.balance.start(difficulty, rng);
        self.set_stage(Stage::ReelCheck(cast));
        vec![EncounterEvent::ReelStarted { difficulty }]
    }

    fn finish_reel(&mut self, result: BalanceResult) -> Vec<EncounterEvent> {
        let cast = match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::ReelCheck(cast) => cast,
            other => {
                // Nothing on the line: nothing caught, nothing awarded
                self.stage = other;
                return Vec::new();
            }
        };

        if !result.is_success() {
            tracing::info!(name = cast.candidate.name(), ?result, "catch escaped");
            self.set_stage(Stage::Idle);
            return vec![EncounterEvent::Escaped {
                candidate: cast.candidate,
                result,
            }];
        }

        // Ledger before gallery, the same order reset_progress takes them
        let award = {
            let mut ledger = lock_recover(&self.ledger);
            let award = ledger.award_for_catch(cast.candidate.tier(), cast.candidate.weight);
            lock_recover(&self.gallery).record(&cast.candidate);
            award
        };
        tracing::info!(
            name = cast.candidate.name(),
            weight = cast.candidate.weight,
            exp_gained = award.exp_gained,
            "catch landed"
        );

        let candidate = cast.candidate.clone();
        self.set_stage(Stage::Resolved { cast, award });
        vec![EncounterEvent::Caught { candidate, award }]
    }
}
