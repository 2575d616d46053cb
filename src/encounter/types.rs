//! Encounter state and events.

use crate::fishing::{CatchCandidate, CatchDifficulty};
use crate::minigames::{BalanceResult, SkillOutcome};
use crate::progression::AwardSummary;

/// Where the encounter is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncounterState {
    /// Waiting for a cast.
    Idle,
    /// Timing dial is spinning.
    ThrowCheck,
    /// Line is paying out toward its cap.
    Casting,
    /// Line fully out, waiting for the reel signal.
    ReadyToReel,
    /// Balance check running.
    ReelCheck,
    /// Catch landed and shown until dismissed.
    Resolved,
}

impl EncounterState {
    /// True for the states that own a catch candidate.
    pub fn has_candidate(self) -> bool {
        matches!(
            self,
            Self::Casting | Self::ReadyToReel | Self::ReelCheck | Self::Resolved
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Ready to cast",
            Self::ThrowCheck => "Throwing",
            Self::Casting => "Casting",
            Self::ReadyToReel => "Fish on!",
            Self::ReelCheck => "Reeling",
            Self::Resolved => "Caught",
        }
    }
}

/// Something that happened during an input or tick call.
#[derive(Debug, Clone, PartialEq)]
pub enum EncounterEvent {
    ThrowStarted,
    ThrowResolved {
        outcome: SkillOutcome,
        line_cap: f64,
    },
    LineReady,
    ReelStarted {
        difficulty: CatchDifficulty,
    },
    Caught {
        candidate: CatchCandidate,
        award: AwardSummary,
    },
    Escaped {
        candidate: CatchCandidate,
        result: BalanceResult,
    },
    Dismissed,
}

/// A thrown line and what is on the end of it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cast {
    pub candidate: CatchCandidate,
    pub outcome: SkillOutcome,
    pub line_length: f64,
    pub line_cap: f64,
    pub line_speed: f64,
}

impl Cast {
    pub fn new(candidate: CatchCandidate, outcome: SkillOutcome) -> Self {
        Self {
            candidate,
            outcome,
            line_length: 0.0,
            line_cap: outcome.line_cap(),
            line_speed: outcome.line_speed(),
        }
    }

    pub fn line_at_cap(&self) -> bool {
        self.line_length >= self.line_cap
    }

    /// Pay out line for `dt` seconds, returning true when it just hit the cap.
    pub fn extend(&mut self, dt: f64) -> bool {
        if self.line_at_cap() {
            return false;
        }
        self.line_length = (self.line_length + self.line_speed * dt).min(self.line_cap);
        self.line_at_cap()
    }
}

/// Internal stage. Candidate-carrying variants make a candidate impossible
/// outside the states that own one.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Stage {
    Idle,
    ThrowCheck,
    Casting(Cast),
    ReadyToReel(Cast),
    ReelCheck(Cast),
    Resolved { cast: Cast, award: AwardSummary },
}

impl Stage {
    pub fn state(&self) -> EncounterState {
        match self {
            Stage::Idle => EncounterState::Idle,
            Stage::ThrowCheck => EncounterState::ThrowCheck,
            Stage::Casting(_) => EncounterState::Casting,
            Stage::ReadyToReel(_) => EncounterState::ReadyToReel,
            Stage::ReelCheck(_) => EncounterState::ReelCheck,
            Stage::Resolved { .. } => EncounterState::Resolved,
        }
    }

    pub fn cast(&self) -> Option<&Cast> {
        match self {
            Stage::Casting(cast) | Stage::ReadyToReel(cast) | Stage::ReelCheck(cast) => Some(cast),
            Stage::Resolved { cast, .. } => Some(cast),
            Stage::Idle | Stage::ThrowCheck => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::find_species;

    fn trout_cast(outcome: SkillOutcome) -> Cast {
        Cast::new(CatchCandidate::new(find_species("Trout").unwrap(), 0.8), outcome)
    }

    #[test]
    fn test_line_extends_to_cap() {
        let mut cast = trout_cast(SkillOutcome::Good);
        assert_eq!(cast.line_cap, 350.0);
        assert!(!cast.extend(1.0));
        assert!((cast.line_length - 115.0).abs() < 1e-9);
        assert!(!cast.extend(2.0));
        assert!(cast.extend(1.0));
        assert_eq!(cast.line_length, 350.0);
        // Already at cap: no second report
        assert!(!cast.extend(1.0));
    }

    #[test]
    fn test_candidate_states() {
        assert!(!EncounterState::Idle.has_candidate());
        assert!(!EncounterState::ThrowCheck.has_candidate());
        assert!(EncounterState::Casting.has_candidate());
        assert!(EncounterState::Resolved.has_candidate());
    }

    #[test]
    fn test_stage_exposes_cast_only_when_owned() {
        assert!(Stage::Idle.cast().is_none());
        assert!(Stage::ThrowCheck.cast().is_none());
        let stage = Stage::ReelCheck(trout_cast(SkillOutcome::Miss));
        assert_eq!(stage.state(), EncounterState::ReelCheck);
        assert_eq!(stage.cast().map(|c| c.candidate.name()), Some("Trout"));
    }
}
