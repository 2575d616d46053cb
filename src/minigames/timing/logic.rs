//! Game logic for the timing skill-check.

use super::types::{SkillOutcome, TimingCheck};
use crate::core::constants::{
    TIMING_GOOD_ARC_DEG, TIMING_GREAT_ARC_DEG, TIMING_RESULT_DISPLAY_SECONDS,
    TIMING_ROTATION_SPEED_DEG,
};
use crate::minigames::{countdown, CheckPhase};
use rand::Rng;

/// Normalize an angle to [0, 360).
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Inclusive arc containment that survives the 360/0 wrap.
///
/// `start` and `end` are walked clockwise (increasing angle) from start to end.
pub fn angle_in_range(angle: f64, start: f64, end: f64) -> bool {
    let angle = normalize_angle(angle);
    let start = normalize_angle(start);
    let end = normalize_angle(end);

    if start > end {
        angle >= start || angle <= end
    } else {
        angle >= start && angle <= end
    }
}

/// Classify a pointer angle against the arcs anchored at `target_angle`.
///
/// Great is `[target, target + 30]`; Good is the 20 degree arc on each side.
pub fn classify_angle(angle: f64, target_angle: f64) -> SkillOutcome {
    let target = normalize_angle(target_angle);

    if angle_in_range(angle, target, target + TIMING_GREAT_ARC_DEG) {
        return SkillOutcome::Great;
    }
    if angle_in_range(angle, target - TIMING_GOOD_ARC_DEG, target) {
        return SkillOutcome::Good;
    }
    let right_start = target + TIMING_GREAT_ARC_DEG;
    if angle_in_range(angle, right_start, right_start + TIMING_GOOD_ARC_DEG) {
        return SkillOutcome::Good;
    }
    SkillOutcome::Miss
}

impl TimingCheck {
    /// Begin a session with a uniformly random target arc.
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        let target = rng.gen_range(0.0..360.0);
        self.start_with_target(target);
    }

    /// Begin a session with a known target arc.
    pub fn start_with_target(&mut self, target_angle: f64) {
        self.phase = CheckPhase::Active;
        self.pointer_angle = 0.0;
        self.target_angle = normalize_angle(target_angle);
        self.outcome = None;
        self.result_timer = 0.0;
        tracing::debug!(target_angle = self.target_angle, "timing check started");
    }

    /// Advance by `dt` seconds.
    ///
    /// Active sessions rotate the pointer; a showing result counts down and
    /// drops back to Inactive when the banner expires.
    pub fn tick(&mut self, dt: f64) {
        match self.phase {
            CheckPhase::Active => {
                self.pointer_angle =
                    normalize_angle(self.pointer_angle + TIMING_ROTATION_SPEED_DEG * dt);
            }
            CheckPhase::ShowingResult => {
                if countdown(&mut self.result_timer, dt) {
                    self.phase = CheckPhase::Inactive;
                }
            }
            CheckPhase::Inactive => {}
        }
    }

    /// Resolve the session at `angle`.
    ///
    /// Returns the outcome exactly once per `start`; any call outside the
    /// Active phase is a no-op returning `None`.
    pub fn resolve(&mut self, angle: f64) -> Option<SkillOutcome> {
        if self.phase != CheckPhase::Active {
            return None;
        }

        let outcome = classify_angle(angle, self.target_angle);
        self.pointer_angle = normalize_angle(angle);
        self.outcome = Some(outcome);
        self.result_timer = TIMING_RESULT_DISPLAY_SECONDS;
        self.phase = CheckPhase::ShowingResult;

        tracing::info!(
            ?outcome,
            angle = self.pointer_angle,
            target_angle = self.target_angle,
            "throw resolved"
        );
        Some(outcome)
    }

    /// Resolve at the pointer's current angle (the player's click).
    pub fn click(&mut self) -> Option<SkillOutcome> {
        self.resolve(self.pointer_angle)
    }
}
