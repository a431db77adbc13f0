pub mod embeddings;
pub mod error;
