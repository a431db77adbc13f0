pub mod embedding;
pub mod error;
