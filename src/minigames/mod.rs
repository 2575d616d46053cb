//! Skill-check minigames: the rotary throw check and the balance reel check.
//!
//! Both share the same three-phase lifecycle. Completion is reported by the
//! return value of the call that ended the session, never by callbacks.

pub mod balance;
pub mod timing;

pub use balance::{BalanceCheck, BalanceCompletion, BalanceResult, CatchDifficulty};
pub use timing::{SkillOutcome, TimingCheck};

/// Lifecycle shared by the skill-checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckPhase {
    /// Not running, nothing to show.
    #[default]
    Inactive,
    /// Accepting input and advancing every tick.
    Active,
    /// Outcome decided; the result banner counts down back to Inactive.
    ShowingResult,
}

/// Advance a result-display countdown, returning true when it expired this tick.
///
/// Expiry on an exact frame boundary (timer hitting 0.0) counts as expired.
pub(crate) fn countdown(timer: &mut f64, dt: f64) -> bool {
    if *timer <= 0.0 {
        return false;
    }
    *timer -= dt;
    if *timer <= 0.0 {
        *timer = 0.0;
        return true;
    }
    false
}
