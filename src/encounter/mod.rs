//! Encounter orchestration: idle, throw, cast, reel, resolve.
//!
//! The encounter owns both skill-checks and the catch candidate, and is the
//! only thing that decides which check receives ticks and input.

pub mod logic;
pub mod types;

pub use logic::Encounter;
pub use types::{EncounterEvent, EncounterState};
