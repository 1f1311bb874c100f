pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use types::{Direction, EntityId, Limits, Position, Role};
