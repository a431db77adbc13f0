// src/cli/error.rs
use crate::domain::error::DomainError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
