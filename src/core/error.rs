use thiserror::Error;

use crate::core::types::{EntityId, Role};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("No entities were ever registered for role {0:?}")]
    MissingRole(Role),

    #[error("Player index {index} out of range ({count} registered)")]
    PlayerIndexOutOfRange { index: usize, count: usize },

    #[error("World must contain at least one player")]
    NoPlayers,

    #[error("Entity not found: {0:?}")]
    EntityNotFound(EntityId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
