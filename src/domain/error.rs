// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid server address: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Ollama response error: {0}")]
    ServerResponse(String),

    #[error("Failed to decode response: {0}")]
    Deserialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
