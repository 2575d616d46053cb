//! Timing skill-check (the throw).
//!
//! A pointer sweeps around a dial at a fixed angular rate. The player clicks
//! once; the pointer angle is classified against a randomly placed Great arc
//! and the two Good arcs flanking it.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
