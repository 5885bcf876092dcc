use crate::config::ConfigError;
use crate::stations::error::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmedasError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown block number: {0}")]
    UnknownStation(String),
}
