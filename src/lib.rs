//! Angler - a terminal fishing game.
//!
//! The encounter engine, skill-checks, loot tables and progression are
//! plain library code; `ui` and `app` hold the terminal front end.

pub mod app;
pub mod build_info;
pub mod core;
pub mod encounter;
pub mod fishing;
pub mod minigames;
pub mod progression;
pub mod ui;
