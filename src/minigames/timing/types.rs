//! Timing skill-check data structures.

use crate::core::constants::{
    LINE_BASE_CAP, LINE_GOOD_BONUS, LINE_GREAT_BONUS, LINE_SPEED_GOOD, LINE_SPEED_GREAT,
    LINE_SPEED_MISS,
};
use crate::minigames::CheckPhase;
use serde::{Deserialize, Serialize};

/// Discrete result of a throw, ordered by strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillOutcome {
    Miss = 0,
    Good = 1,
    Great = 2,
}

impl SkillOutcome {
    pub const ALL: [SkillOutcome; 3] = [SkillOutcome::Miss, SkillOutcome::Good, SkillOutcome::Great];

    /// Ordinal strength (0 = Miss).
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Banner text shown while the result is on screen.
    pub fn message(self) -> &'static str {
        match self {
            Self::Miss => "Miss!",
            Self::Good => "Good!",
            Self::Great => "Great!",
        }
    }

    /// How far the line can travel after this throw.
    pub fn line_cap(self) -> f64 {
        match self {
            Self::Miss => LINE_BASE_CAP,
            Self::Good => LINE_BASE_CAP + LINE_GOOD_BONUS,
            Self::Great => LINE_BASE_CAP + LINE_GREAT_BONUS,
        }
    }

    /// Line extension speed in units per second.
    pub fn line_speed(self) -> f64 {
        match self {
            Self::Miss => LINE_SPEED_MISS,
            Self::Good => LINE_SPEED_GOOD,
            Self::Great => LINE_SPEED_GREAT,
        }
    }
}

/// State of one rotary skill-check.
#[derive(Debug, Clone, Default)]
pub struct TimingCheck {
    pub phase: CheckPhase,
    /// Pointer angle in degrees, always within [0, 360).
    pub pointer_angle: f64,
    /// Start of the Great arc in degrees, drawn fresh on every start.
    pub target_angle: f64,
    /// Outcome of the current or most recent session.
    pub outcome: Option<SkillOutcome>,
    /// Seconds left on the result banner.
    pub result_timer: f64,
}

impl TimingCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.phase == CheckPhase::Active
    }

    pub fn is_showing_result(&self) -> bool {
        self.phase == CheckPhase::ShowingResult
    }
}
