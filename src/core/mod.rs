//! Constants, configuration and shared error types.

pub mod config;
pub mod constants;
pub mod error;

pub use config::{parse_args, CliCommand, GameConfig};
pub use error::{StoreError, StoreResult};
