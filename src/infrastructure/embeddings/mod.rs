pub(crate) mod dummy_provider;
mod model;
pub mod ollama_provider;

pub use dummy_provider::DummyEmbedding;
pub use ollama_provider::{assemble_response, OllamaEmbedding};
