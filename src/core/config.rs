//! Runtime configuration.
//!
//! Defaults are overridden by an optional `config.json` in the save
//! directory, which is in turn overridden by command-line flags.

use super::constants::{CONFIG_FILE, FRAME_INTERVAL_MS, SAVE_DIR_NAME};
use super::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration for a play session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding progression, gallery, config and log files
    pub save_dir: PathBuf,

    /// Random seed for reproducible sessions (None = entropy)
    pub seed: Option<u64>,

    /// Target frame interval for the game loop
    pub frame_interval_ms: u64,

    /// Wipe progression and gallery before starting
    #[serde(skip)]
    pub reset_on_start: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir().unwrap_or_else(|_| PathBuf::from(SAVE_DIR_NAME)),
            seed: None,
            frame_interval_ms: FRAME_INTERVAL_MS,
            reset_on_start: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Play(GameConfig),
    Help,
    Version,
}

/// `~/.angler`
pub fn default_save_dir() -> StoreResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
    Ok(home_dir.join(SAVE_DIR_NAME))
}

impl GameConfig {
    /// Overlay values from `config.json` in `save_dir`, if present.
    ///
    /// A missing file leaves the config untouched; a malformed one is an error.
    /// A seed already set on `self` came from the command line and wins.
    pub fn merge_file(self, save_dir: &Path) -> StoreResult<Self> {
        let path = save_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(self);
        }
        let json = fs::read_to_string(&path)?;
        let mut loaded: GameConfig = serde_json::from_str(&json)?;
        // The file lives in save_dir, so it cannot relocate itself.
        loaded.save_dir = save_dir.to_path_buf();
        loaded.reset_on_start = self.reset_on_start;
        loaded.seed = self.seed.or(loaded.seed);
        Ok(loaded)
    }

    /// Apply `config.json` from the save directory, keeping the current
    /// values if the file cannot be read or parsed.
    pub fn with_file_overrides(self) -> Self {
        let dir = self.save_dir.clone();
        match self.clone().merge_file(&dir) {
            Ok(merged) => merged,
            Err(e) => {
                warn!(
                    path = %dir.join(CONFIG_FILE).display(),
                    error = %e,
                    "ignoring unreadable config file"
                );
                self
            }
        }
    }

    /// Frame interval clamped to something a terminal can keep up with.
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_interval_ms.clamp(5, 250))
    }
}

/// Parse `args` (without the program name).
///
/// Returns an error message for unknown flags or bad values. The config
/// file is not read here; see [`GameConfig::with_file_overrides`].
pub fn parse_args<I, S>(args: I) -> Result<CliCommand, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    let mut save_dir: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut reset = false;

    while let Some(arg) = args.next() {
        match arg.as_ref() {
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--reset" => reset = true,
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                seed = Some(
                    value
                        .as_ref()
                        .parse()
                        .map_err(|_| format!("Invalid seed: {}", value.as_ref()))?,
                );
            }
            "--save-dir" => {
                let value = args.next().ok_or("--save-dir needs a path")?;
                save_dir = Some(PathBuf::from(value.as_ref()));
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    let base = GameConfig::default();
    Ok(CliCommand::Play(GameConfig {
        save_dir: save_dir.unwrap_or_else(|| base.save_dir.clone()),
        seed,
        reset_on_start: reset,
        ..base
    }))
}
