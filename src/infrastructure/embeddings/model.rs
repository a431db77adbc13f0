// src/infrastructure/embeddings/model.rs
//
// Wire structs for the two Ollama endpoints. The embed endpoint answers
// with a single JSON object, the generate endpoint with newline-delimited
// JSON chunks.
use serde::{Deserialize, Serialize};

use crate::domain::embedding::Vector;

#[derive(Serialize)]
pub struct EmbedRequest {
    pub(crate) model: String,
    pub(crate) input: Vec<String>,
}

#[derive(Deserialize)]
pub struct EmbedResponse {
    pub(crate) embeddings: Vec<Vector>,
}

/// Ollama returns JSON with the error field set for bad requests.
#[derive(Deserialize)]
pub struct ErrorResponse {
    pub(crate) error: String,
}

#[derive(Serialize)]
pub struct GenerateRequest {
    pub(crate) model: String,
    pub(crate) prompt: String,
    pub(crate) stream: bool,
}

/// One line of a streamed generate response. `model` and `created_at`
/// are also on the wire but unused here.
#[derive(Deserialize)]
pub struct GenerateChunk {
    pub(crate) response: String,
    pub(crate) done: bool,
}
