//! Game logic for the balance skill-check.
//!
//! Physics runs in track units per second so results do not depend on the
//! frame rate. Drag is specified per reference frame and converted with
//! `drag^(dt * REFERENCE_FPS)`.

use super::types::{BalanceCheck, BalanceCompletion, BalanceResult, CatchDifficulty};
use crate::core::constants::{
    BALANCE_ARRIVAL_TOLERANCE, BALANCE_DRAG_PER_FRAME, BALANCE_GAME_DURATION_SECONDS,
    BALANCE_GRAVITY, BALANCE_LIFT, BALANCE_PROGRESS_RATE_IN_ZONE, BALANCE_PROGRESS_RATE_OUT_ZONE,
    BALANCE_RESULT_DISPLAY_SECONDS, BALANCE_RETARGET_INTERVAL_SECONDS, BALANCE_TOKEN_SIZE,
    BALANCE_TOKEN_SPEED_BASE, BALANCE_TOKEN_SPEED_VARIANCE, BALANCE_TRACK_HEIGHT,
    BALANCE_ZONE_HEIGHT, REFERENCE_FPS,
};
use crate::minigames::{countdown, CheckPhase};
use rand::Rng;

/// Strict interval overlap; touching edges do not count.
pub fn spans_overlap(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

/// Highest position the token may occupy.
fn token_ceiling() -> f64 {
    BALANCE_TRACK_HEIGHT - BALANCE_TOKEN_SIZE
}

/// Highest position the zone may occupy.
fn zone_ceiling() -> f64 {
    BALANCE_TRACK_HEIGHT - BALANCE_ZONE_HEIGHT
}

/// Fresh wander destination, kept one token-height away from both ends.
fn random_token_position<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(BALANCE_TOKEN_SIZE..=token_ceiling())
}

fn random_token_speed<R: Rng>(difficulty: CatchDifficulty, rng: &mut R) -> f64 {
    let jitter = rng.gen_range(-BALANCE_TOKEN_SPEED_VARIANCE..=BALANCE_TOKEN_SPEED_VARIANCE);
    (BALANCE_TOKEN_SPEED_BASE + jitter) * difficulty.speed_multiplier()
}

impl BalanceCheck {
    /// Begin a session for a catch of the given difficulty.
    pub fn start<R: Rng>(&mut self, difficulty: CatchDifficulty, rng: &mut R) {
        let token_y = random_token_position(rng).clamp(0.0, token_ceiling());

        self.phase = CheckPhase::Active;
        self.difficulty = difficulty;
        self.progress = 0.0;
        self.elapsed = 0.0;
        self.has_progressed = false;
        self.zone_y = Self::zone_home();
        self.zone_velocity = 0.0;
        self.pressed = false;
        self.token_y = token_y;
        self.token_target_y = token_y;
        self.token_speed = BALANCE_TOKEN_SPEED_BASE * difficulty.speed_multiplier();
        self.retarget_timer = 0.0;
        self.result = None;
        self.result_timer = 0.0;

        tracing::debug!(?difficulty, token_y, "balance check started");
    }

    /// Hold or release the lift. Ignored unless the session is running.
    pub fn set_pressed(&mut self, pressed: bool) {
        if self.phase == CheckPhase::Active {
            self.pressed = pressed;
        }
    }

    /// Seconds between token re-targets at the current difficulty.
    pub fn retarget_interval(&self) -> f64 {
        BALANCE_RETARGET_INTERVAL_SECONDS / self.difficulty.erraticism()
    }

    pub fn zone_overlaps_token(&self) -> bool {
        spans_overlap(self.zone_span(), self.token_span())
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns the completion on the tick the session ends and `None` on
    /// every other call. While the result banner shows nothing moves.
    pub fn tick<R: Rng>(&mut self, dt: f64, rng: &mut R) -> Option<BalanceCompletion> {
        match self.phase {
            CheckPhase::Active => self.tick_active(dt, rng),
            CheckPhase::ShowingResult => {
                if countdown(&mut self.result_timer, dt) {
                    self.phase = CheckPhase::Inactive;
                }
                None
            }
            CheckPhase::Inactive => None,
        }
    }

    fn tick_active<R: Rng>(&mut self, dt: f64, rng: &mut R) -> Option<BalanceCompletion> {
        self.elapsed += dt;

        self.update_zone(dt);
        self.update_token(dt, rng);

        let rate = if self.zone_overlaps_token() {
            BALANCE_PROGRESS_RATE_IN_ZONE
        } else {
            BALANCE_PROGRESS_RATE_OUT_ZONE
        };
        self.progress = (self.progress + rate * dt).clamp(0.0, 1.0);
        if self.progress > 0.0 {
            self.has_progressed = true;
        }

        let result = if self.progress >= 1.0 {
            BalanceResult::Success
        } else if self.elapsed >= BALANCE_GAME_DURATION_SECONDS {
            BalanceResult::Timeout
        } else if self.progress <= 0.0 && self.has_progressed {
            BalanceResult::Failed
        } else {
            return None;
        };

        Some(self.finish(result))
    }

    fn update_zone(&mut self, dt: f64) {
        let accel = if self.pressed {
            BALANCE_LIFT
        } else {
            -BALANCE_GRAVITY
        };
        self.zone_velocity += accel * dt;
        self.zone_velocity *= BALANCE_DRAG_PER_FRAME.powf(dt * REFERENCE_FPS);
        self.zone_y += self.zone_velocity * dt;

        let ceiling = zone_ceiling();
        if self.zone_y <= 0.0 {
            self.zone_y = 0.0;
            self.zone_velocity = 0.0;
        } else if self.zone_y >= ceiling {
            self.zone_y = ceiling;
            self.zone_velocity = 0.0;
        }
    }

    fn update_token<R: Rng>(&mut self, dt: f64, rng: &mut R) {
        self.retarget_timer += dt;
        if self.retarget_timer >= self.retarget_interval() {
            self.retarget_timer = 0.0;
            self.token_target_y = random_token_position(rng);
            self.token_speed = random_token_speed(self.difficulty, rng);
        }

        let delta = self.token_target_y - self.token_y;
        if delta.abs() > BALANCE_ARRIVAL_TOLERANCE {
            let step = (self.token_speed * dt).min(delta.abs());
            self.token_y += step * delta.signum();
        }
        self.token_y = self.token_y.clamp(0.0, token_ceiling());
    }

    fn finish(&mut self, result: BalanceResult) -> BalanceCompletion {
        self.phase = CheckPhase::ShowingResult;
        self.result = Some(result);
        self.result_timer = BALANCE_RESULT_DISPLAY_SECONDS;
        self.pressed = false;

        tracing::info!(
            ?result,
            difficulty = ?self.difficulty,
            progress = self.progress,
            elapsed = self.elapsed,
            "reel finished"
        );

        BalanceCompletion {
            result,
            difficulty: self.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn started(difficulty: CatchDifficulty) -> (BalanceCheck, ChaCha8Rng) {
        let mut rng = create_test_rng();
        let mut check = BalanceCheck::new();
        check.start(difficulty, &mut rng);
        (check, rng)
    }

    /// Park the token at `y` so it does not wander during the test.
    fn park_token(check: &mut BalanceCheck, y: f64) {
        check.token_y = y;
        check.token_target_y = y;
    }

    #[test]
    fn test_spans_overlap_is_strict() {
        assert!(spans_overlap((0.0, 10.0), (5.0, 15.0)));
        assert!(!spans_overlap((0.0, 10.0), (10.0, 20.0)));
        assert!(!spans_overlap((20.0, 30.0), (0.0, 20.0)));
        assert!(spans_overlap((0.0, 100.0), (40.0, 50.0)));
    }

    #[test]
    fn test_start_resets_session() {
        let (mut check, mut rng) = started(CatchDifficulty::Medium);
        check.progress = 0.7;
        check.elapsed = 9.0;
        check.start(CatchDifficulty::Hard, &mut rng);

        assert!(check.is_active());
        assert_eq!(check.difficulty, CatchDifficulty::Hard);
        assert_eq!(check.progress, 0.0);
        assert_eq!(check.elapsed, 0.0);
        assert_eq!(check.zone_y, BalanceCheck::zone_home());
        assert!(check.token_y >= BALANCE_TOKEN_SIZE && check.token_y <= token_ceiling());
        assert!(check.result.is_none());
    }

    #[test]
    fn test_success_on_the_tick_progress_fills() {
        let (mut check, mut rng) = started(CatchDifficulty::Easy);
        let zone_y = check.zone_y;
        park_token(&mut check, zone_y);
        check.progress = 0.95;
        check.has_progressed = true;

        let completion = check.tick(0.5, &mut rng);

        assert_eq!(check.progress, 1.0);
        assert_eq!(
            completion,
            Some(BalanceCompletion {
                result: BalanceResult::Success,
                difficulty: CatchDifficulty::Easy,
            })
        );
        assert!(check.is_showing_result());
    }

    #[test]
    fn test_failed_when_progress_collapses() {
        let (mut check, mut rng) = started(CatchDifficulty::Easy);
        park_token(&mut check, token_ceiling());
        check.progress = 0.01;
        check.has_progressed = true;

        let completion = check.tick(0.5, &mut rng);

        assert_eq!(check.progress, 0.0);
        assert_eq!(completion.map(|c| c.result), Some(BalanceResult::Failed));
    }

    #[test]
    fn test_no_failure_before_any_progress() {
        let (mut check, mut rng) = started(CatchDifficulty::Easy);
        park_token(&mut check, token_ceiling());

        for _ in 0..30 {
            assert!(check.tick(0.016, &mut rng).is_none());
        }
        assert_eq!(check.progress, 0.0);
        assert!(check.is_active());
    }

    #[test]
    fn test_timeout_after_duration() {
        let (mut check, mut rng) = started(CatchDifficulty::Easy);
        // Hold steady at a mid value so neither success nor failure triggers
        let mut last = None;
        for _ in 0..2000 {
            check.token_y = check.zone_y;
            check.token_target_y = check.zone_y;
            check.progress = 0.5;
            check.retarget_timer = 0.0;
            if let Some(done) = check.tick(0.016, &mut rng) {
                last = Some(done);
                break;
            }
        }
        assert_eq!(last.map(|c| c.result), Some(BalanceResult::Timeout));
        assert!(check.elapsed >= BALANCE_GAME_DURATION_SECONDS);
    }

    #[test]
    fn test_success_beats_timeout_on_same_tick() {
        let (mut check, mut rng) = started(CatchDifficulty::Easy);
        let zone_y = check.zone_y;
        park_token(&mut check, zone_y);
        check.elapsed = BALANCE_GAME_DURATION_SECONDS - 0.1;
        check.progress = 0.95;

        let completion = check.tick(0.5, &mut rng);
        assert_eq!(completion.map(|c| c.result), Some(BalanceResult::Success));
    }

    #[test]
    fn test_completion_fires_once() {
        let (mut check, mut rng) = started(CatchDifficulty::Easy);
        let zone_y = check.zone_y;
        park_token(&mut check, zone_y);
        check.progress = 0.95;

        assert!(check.tick(0.5, &mut rng).is_some());
        assert!(check.tick(0.5, &mut rng).is_none());
        assert!(check.tick(0.5, &mut rng).is_none());
        // Banner expired after 2 seconds total
        assert!(check.tick(1.0, &mut rng).is_none());
        assert_eq!(check.phase, CheckPhase::Inactive);
        assert_eq!(check.result, Some(BalanceResult::Success));
    }

    #[test]
    fn test_zone_falls_and_clamps_at_floor() {
        let (mut check, mut rng) = started(CatchDifficulty::Easy);
        for _ in 0..600 {
            check.tick(0.016, &mut rng);
            if !check.is_active() {
                break;
            }
        }
        assert!(check.zone_y >= 0.0);
        assert!(check.zone_y < BalanceCheck::zone_home());
    }

    #[test]
    fn test_holding_lifts_zone_to_ceiling() {
        let (mut check, mut rng) = started(CatchDifficulty::Easy);
        check.set_pressed(true);
        for _ in 0..2000 {
            check.progress = 0.5;
            check.tick(0.016, &mut rng);
            assert!(check.zone_y <= zone_ceiling());
            if check.zone_y == zone_ceiling() {
                assert_eq!(check.zone_velocity, 0.0);
                return;
            }
        }
        panic!("zone never reached the ceiling");
    }

    #[test]
    fn test_set_pressed_ignored_when_inactive() {
        let mut check = BalanceCheck::new();
        check.set_pressed(true);
        assert!(!check.pressed);
    }

    #[test]
    fn test_token_stays_on_track() {
        let (mut check, mut rng) = started(CatchDifficulty::Legendary);
        for _ in 0..900 {
            check.progress = 0.5;
            check.tick(0.016, &mut rng);
            assert!(check.token_y >= 0.0 && check.token_y <= token_ceiling());
            assert!(check.token_target_y >= BALANCE_TOKEN_SIZE);
            assert!(check.token_target_y <= token_ceiling());
        }
    }

    #[test]
    fn test_token_parks_within_tolerance() {
        let (mut check, mut rng) = started(CatchDifficulty::Easy);
        check.token_y = 100.0;
        check.token_target_y = 103.0;
        check.tick(0.1, &mut rng);
        assert_eq!(check.token_y, 100.0);
    }

    #[test]
    fn test_erratic_fish_retarget_more_often() {
        let easy = {
            let (check, _) = started(CatchDifficulty::Easy);
            check.retarget_interval()
        };
        let legendary = {
            let (check, _) = started(CatchDifficulty::Legendary);
            check.retarget_interval()
        };
        assert!((easy - 2.0).abs() < 1e-9);
        assert!(legendary < easy);
    }

    #[test]
    fn test_retarget_draws_speed_within_variance() {
        let (mut check, mut rng) = started(CatchDifficulty::Medium);
        check.retarget_timer = check.retarget_interval();
        check.tick(0.0, &mut rng);

        let mult = CatchDifficulty::Medium.speed_multiplier();
        let lo = (BALANCE_TOKEN_SPEED_BASE - BALANCE_TOKEN_SPEED_VARIANCE) * mult;
        let hi = (BALANCE_TOKEN_SPEED_BASE + BALANCE_TOKEN_SPEED_VARIANCE) * mult;
        assert!(check.token_speed >= lo && check.token_speed <= hi);
        assert_eq!(check.retarget_timer, 0.0);
    }
}
