// src/infrastructure/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

// Infrastructure failures surface to callers as domain errors.
impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Network(msg) => DomainError::Transport(msg),
            InfrastructureError::Serialization(msg) => DomainError::Deserialization(msg),
        }
    }
}
