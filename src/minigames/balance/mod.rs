//! Balance skill-check (the reel).
//!
//! The player holds to lift a zone along a vertical track against gravity
//! while a target token wanders the same track. Time spent overlapping
//! fills a progress meter; time apart drains it. Fill the meter before the
//! clock runs out to land the catch.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
