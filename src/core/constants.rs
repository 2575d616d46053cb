// Frame timing
pub const FRAME_INTERVAL_MS: u64 = 16; // ~60 FPS
pub const REFERENCE_FPS: f64 = 60.0;
/// Longest step fed to the simulation after a stall.
pub const MAX_FRAME_DT_SECONDS: f64 = 0.1;

// Timing skill-check (throw)
pub const TIMING_ROTATION_SPEED_DEG: f64 = 180.0; // degrees per second
pub const TIMING_GREAT_ARC_DEG: f64 = 30.0;
pub const TIMING_GOOD_ARC_DEG: f64 = 20.0; // each flanking arc
pub const TIMING_RESULT_DISPLAY_SECONDS: f64 = 1.5;

// Balance skill-check (reel), track units with y growing upward
pub const BALANCE_TRACK_HEIGHT: f64 = 300.0;
pub const BALANCE_ZONE_HEIGHT: f64 = 80.0;
pub const BALANCE_TOKEN_SIZE: f64 = 30.0;
pub const BALANCE_GRAVITY: f64 = 500.0;
pub const BALANCE_LIFT: f64 = 500.0;
pub const BALANCE_DRAG_PER_FRAME: f64 = 0.8; // at REFERENCE_FPS
pub const BALANCE_TOKEN_SPEED_BASE: f64 = 50.0;
pub const BALANCE_TOKEN_SPEED_VARIANCE: f64 = 30.0;
pub const BALANCE_RETARGET_INTERVAL_SECONDS: f64 = 2.0;
pub const BALANCE_ARRIVAL_TOLERANCE: f64 = 5.0;
pub const BALANCE_GAME_DURATION_SECONDS: f64 = 15.0;
pub const BALANCE_PROGRESS_RATE_IN_ZONE: f64 = 0.15; // per second
pub const BALANCE_PROGRESS_RATE_OUT_ZONE: f64 = -0.1; // per second
pub const BALANCE_RESULT_DISPLAY_SECONDS: f64 = 2.0;

// Loot table
pub const TRASH_CHANCE_BY_LEVEL: [f64; 5] = [0.40, 0.20, 0.10, 0.05, 0.02];
pub const TRASH_CHANCE_FLOOR: f64 = 0.01;
pub const MISS_TRASH_MULTIPLIER: f64 = 2.0;

// (common, rare, legendary) per throw outcome
pub const CATEGORY_CHANCES_GREAT: [f64; 3] = [0.30, 0.45, 0.25];
pub const CATEGORY_CHANCES_GOOD: [f64; 3] = [0.60, 0.35, 0.05];
pub const CATEGORY_CHANCES_MISS: [f64; 3] = [0.85, 0.14, 0.01];

// Catch weight: base = factor * tier, variance = factor * tier
pub const WEIGHT_BASE_PER_TIER: f64 = 0.5;
pub const WEIGHT_VARIANCE_PER_TIER: f64 = 0.5;

// Progression
pub const BASE_XP_PER_CATCH: u32 = 10;
/// Experience needed to reach each level, indexed by level (index 0 unused).
pub const LEVEL_XP_REQUIREMENTS: [u32; 6] = [0, 0, 100, 250, 500, 1000];
pub const MAX_LEVEL: u32 = (LEVEL_XP_REQUIREMENTS.len() - 1) as u32;
pub const RARE_UNLOCK_LEVEL: u32 = 2;
pub const LEGENDARY_UNLOCK_LEVEL: u32 = 3;

// Line casting
pub const LINE_BASE_CAP: f64 = 300.0;
pub const LINE_GOOD_BONUS: f64 = 50.0;
pub const LINE_GREAT_BONUS: f64 = 100.0;
pub const LINE_SPEED_MISS: f64 = 100.0; // per second
pub const LINE_SPEED_GOOD: f64 = 115.0;
pub const LINE_SPEED_GREAT: f64 = 130.0;

// Save system
pub const SAVE_DIR_NAME: &str = ".angler";
pub const PROGRESSION_FILE: &str = "progression.json";
pub const GALLERY_FILE: &str = "gallery.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "angler.log";
pub const LOG_ENV: &str = "ANGLER_LOG";

// Persisted progression keys
pub const KEY_CURRENT_EXP: &str = "current_exp";
pub const KEY_CURRENT_LEVEL: &str = "current_level";
pub const KEY_TOTAL_CAUGHT: &str = "total_fish_caught";
pub const KEY_TOTAL_WEIGHT: &str = "total_weight";
