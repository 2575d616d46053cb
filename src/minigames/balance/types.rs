//! Balance skill-check data structures.

use crate::core::constants::{
    BALANCE_GAME_DURATION_SECONDS, BALANCE_TOKEN_SIZE, BALANCE_TRACK_HEIGHT, BALANCE_ZONE_HEIGHT,
};
use crate::minigames::CheckPhase;
use serde::{Deserialize, Serialize};

/// How hard a hooked catch fights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CatchDifficulty {
    Easy,
    Medium,
    Hard,
    Legendary,
}

impl CatchDifficulty {
    pub const ALL: [CatchDifficulty; 4] = [
        CatchDifficulty::Easy,
        CatchDifficulty::Medium,
        CatchDifficulty::Hard,
        CatchDifficulty::Legendary,
    ];

    /// Difficulty for a rarity tier (0 = junk ... 3 = legendary).
    ///
    /// Tiers above 3 saturate at Legendary.
    pub fn from_tier(tier: u8) -> Self {
        Self::ALL
            .get(tier as usize)
            .copied()
            .unwrap_or(CatchDifficulty::Legendary)
    }

    /// Token speed multiplier.
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            Self::Easy => 0.5,
            Self::Medium => 0.8,
            Self::Hard => 1.2,
            Self::Legendary => 1.8,
        }
    }

    /// Re-target frequency multiplier; higher means more frequent direction changes.
    pub fn erraticism(&self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.0,
            Self::Legendary => 3.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy Fish",
            Self::Medium => "Medium Fish",
            Self::Hard => "Hard Fish",
            Self::Legendary => "Legendary Fish",
        }
    }
}

/// How a reel session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceResult {
    /// Progress meter filled.
    Success,
    /// Progress collapsed back to zero.
    Failed,
    /// The clock ran out first.
    Timeout,
}

impl BalanceResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Caught!",
            Self::Failed => "Fish got away...",
            Self::Timeout => "Time's up!",
        }
    }
}

/// Delivered exactly once when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceCompletion {
    pub result: BalanceResult,
    pub difficulty: CatchDifficulty,
}

/// State of one reel session. Positions are track units from the bottom.
#[derive(Debug, Clone)]
pub struct BalanceCheck {
    pub phase: CheckPhase,
    pub difficulty: CatchDifficulty,

    // Meter and clock
    /// Fill level in [0, 1].
    pub progress: f64,
    /// Seconds since start.
    pub elapsed: f64,
    /// Set once progress has risen above zero; only then can it collapse.
    pub has_progressed: bool,

    // Player zone
    /// Bottom edge of the controlled zone.
    pub zone_y: f64,
    /// Positive = upward.
    pub zone_velocity: f64,
    pub pressed: bool,

    // Target token
    /// Bottom edge of the token.
    pub token_y: f64,
    pub token_target_y: f64,
    pub token_speed: f64,
    pub retarget_timer: f64,

    // Result
    pub result: Option<BalanceResult>,
    pub result_timer: f64,
}

impl Default for BalanceCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceCheck {
    pub fn new() -> Self {
        let token_y = (BALANCE_TRACK_HEIGHT - BALANCE_TOKEN_SIZE) / 2.0;
        Self {
            phase: CheckPhase::Inactive,
            difficulty: CatchDifficulty::Easy,
            progress: 0.0,
            elapsed: 0.0,
            has_progressed: false,
            zone_y: Self::zone_home(),
            zone_velocity: 0.0,
            pressed: false,
            token_y,
            token_target_y: token_y,
            token_speed: 0.0,
            retarget_timer: 0.0,
            result: None,
            result_timer: 0.0,
        }
    }

    /// Zone position that centers it on the track.
    pub fn zone_home() -> f64 {
        (BALANCE_TRACK_HEIGHT - BALANCE_ZONE_HEIGHT) / 2.0
    }

    pub fn is_active(&self) -> bool {
        self.phase == CheckPhase::Active
    }

    pub fn is_showing_result(&self) -> bool {
        self.phase == CheckPhase::ShowingResult
    }

    /// Seconds left before the session times out.
    pub fn time_remaining(&self) -> f64 {
        (BALANCE_GAME_DURATION_SECONDS - self.elapsed).max(0.0)
    }

    /// Zone span as (bottom, top).
    pub fn zone_span(&self) -> (f64, f64) {
        (self.zone_y, self.zone_y + BALANCE_ZONE_HEIGHT)
    }

    /// Token span as (bottom, top).
    pub fn token_span(&self) -> (f64, f64) {
        (self.token_y, self.token_y + BALANCE_TOKEN_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_tier() {
        assert_eq!(CatchDifficulty::from_tier(0), CatchDifficulty::Easy);
        assert_eq!(CatchDifficulty::from_tier(1), CatchDifficulty::Medium);
        assert_eq!(CatchDifficulty::from_tier(2), CatchDifficulty::Hard);
        assert_eq!(CatchDifficulty::from_tier(3), CatchDifficulty::Legendary);
        assert_eq!(CatchDifficulty::from_tier(9), CatchDifficulty::Legendary);
    }

    #[test]
    fn test_difficulty_parameters_increase() {
        for pair in CatchDifficulty::ALL.windows(2) {
            assert!(pair[1].speed_multiplier() > pair[0].speed_multiplier());
            assert!(pair[1].erraticism() > pair[0].erraticism());
        }
        assert!((CatchDifficulty::Easy.speed_multiplier() - 0.5).abs() < f64::EPSILON);
        assert!((CatchDifficulty::Legendary.erraticism() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_check_defaults() {
        let check = BalanceCheck::new();
        assert_eq!(check.phase, CheckPhase::Inactive);
        assert_eq!(check.progress, 0.0);
        assert!(check.result.is_none());
        assert_eq!(check.zone_y, 110.0);
        assert_eq!(check.time_remaining(), BALANCE_GAME_DURATION_SECONDS);
    }

    #[test]
    fn test_result_messages() {
        assert!(BalanceResult::Success.is_success());
        assert!(!BalanceResult::Timeout.is_success());
        assert_eq!(BalanceResult::Failed.message(), "Fish got away...");
    }
}
