// src/infrastructure/embeddings/ollama_provider.rs
use std::env;

use reqwest::StatusCode;
use tracing::{debug, instrument, trace};
use url::Url;

use crate::domain::embedding::{EmbedDoc, Embedder, Vector};
use crate::domain::error::{DomainError, DomainResult};
use crate::infrastructure::embeddings::model::{
    EmbedRequest, EmbedResponse, ErrorResponse, GenerateChunk, GenerateRequest,
};
use crate::infrastructure::error::InfrastructureError;

pub const DEFAULT_EMBEDDING_MODEL: &str = "mxbai-embed-large";
pub const DEFAULT_GEN_MODEL: &str = "llama3.2:3b";

const EMBED_PATH: &str = "/api/embed";
const GENERATE_PATH: &str = "/api/generate";

/// Ollama's default physical batch size. Larger requests risk server-side
/// truncation or rejection, so the bound is enforced unconditionally.
const MAX_BATCH: usize = 512;

/// A connection to a local Ollama server, bound to one model name.
///
/// Holds only the immutable (url, model, transport) triple; safe to reuse
/// across sequential calls. Concurrent use is not documented.
#[derive(Debug, Clone)]
pub struct OllamaEmbedding {
    url: Url,
    model: String,
    client: reqwest::blocking::Client,
}

impl OllamaEmbedding {
    /// Connects to an Ollama server. With no explicit `server`, the
    /// `OLLAMA_HOST` environment variable is consulted, falling back to
    /// `http://127.0.0.1:11434`.
    pub fn new(server: Option<&str>, model: &str) -> DomainResult<Self> {
        let server = match server {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => {
                let host = env::var("OLLAMA_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
                format!("http://{}:11434", host)
            }
        };
        let url = Url::parse(&server).map_err(|e| DomainError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            url,
            model: model.to_string(),
            client: reqwest::blocking::Client::new(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends a single prompt to the generate endpoint and returns the raw
    /// newline-delimited response body, consumed to completion.
    ///
    /// Unlike the embed path, the HTTP status is not classified here: a 400
    /// or 500 body comes back as raw bytes and classification is left to
    /// the caller. Kept asymmetric for compatibility with the embed/generate
    /// contract (see DESIGN.md).
    #[instrument(skip_all, fields(prompt_len = input.len()))]
    pub fn prompt(&self, input: &str) -> DomainResult<Vec<u8>> {
        let gen_url = self
            .url
            .join(GENERATE_PATH)
            .map_err(|e| DomainError::InvalidUrl(e.to_string()))?;
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: input.to_string(),
            stream: true,
        };

        let response = self
            .client
            .post(gen_url)
            .json(&request)
            .send()
            .map_err(|e| InfrastructureError::Network(e.to_string()))?;
        let body = response
            .bytes()
            .map_err(|e| InfrastructureError::Network(e.to_string()))?;
        debug!("generate response: {} bytes", body.len());
        Ok(body.to_vec())
    }

    /// One embed request for a single batch of framed inputs.
    fn embed_batch(&self, embed_url: &Url, inputs: Vec<String>) -> DomainResult<Vec<Vector>> {
        let request = EmbedRequest {
            model: self.model.clone(),
            input: inputs,
        };

        let response = self
            .client
            .post(embed_url.clone())
            .json(&request)
            .send()
            .map_err(|e| InfrastructureError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .map_err(|e| InfrastructureError::Network(e.to_string()))?;

        match status {
            StatusCode::OK => {
                let parsed: EmbedResponse = serde_json::from_slice(&body)
                    .map_err(|e| InfrastructureError::Serialization(e.to_string()))?;
                Ok(parsed.embeddings)
            }
            StatusCode::BAD_REQUEST => {
                // Ollama reports bad requests as {"error": "..."}.
                let parsed: ErrorResponse = serde_json::from_slice(&body)
                    .map_err(|e| InfrastructureError::Serialization(e.to_string()))?;
                Err(DomainError::ServerResponse(parsed.error))
            }
            other => Err(DomainError::ServerResponse(other.to_string())),
        }
    }
}

impl Embedder for OllamaEmbedding {
    /// Embeds the documents in batches of at most [`MAX_BATCH`], strictly
    /// in input order. The first failing batch aborts the whole call with
    /// no partial result, so on success the output has exactly one vector
    /// per input document.
    #[instrument(skip_all, fields(docs = docs.len()))]
    fn embed_docs(&self, docs: &[EmbedDoc]) -> DomainResult<Vec<Vector>> {
        let embed_url = self
            .url
            .join(EMBED_PATH)
            .map_err(|e| DomainError::InvalidUrl(e.to_string()))?;

        let mut vecs = Vec::with_capacity(docs.len());
        for batch in docs.chunks(MAX_BATCH) {
            let inputs: Vec<String> = batch.iter().map(EmbedDoc::framed).collect();
            vecs.extend(self.embed_batch(&embed_url, inputs)?);
        }
        Ok(vecs)
    }
}

/// Reassembles a streamed generate response into the answer string.
///
/// Each non-empty line must parse as a chunk carrying a `response` fragment;
/// fragments are concatenated in line order. Empty lines (notably the one
/// after a terminating newline) are skipped. A malformed line aborts
/// immediately and the partial concatenation is discarded.
#[instrument(skip_all, fields(bytes = raw.len()))]
pub fn assemble_response(raw: &[u8]) -> DomainResult<String> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| DomainError::Deserialization(format!("response not valid UTF-8: {}", e)))?;

    let mut answer = String::new();
    for line in text.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let chunk: GenerateChunk = serde_json::from_str(line)
            .map_err(|e| DomainError::Deserialization(format!("bad stream line: {}", e)))?;
        answer.push_str(&chunk.response);
        if chunk.done {
            trace!("stream reported done");
        }
    }
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::EnvGuard;
    use serial_test::serial;

    #[test]
    fn given_three_chunks_when_assemble_then_concatenated_in_order() {
        let raw = concat!(
            "{\"model\":\"llama3.2:3b\",\"created_at\":\"t0\",\"response\":\"Hel\",\"done\":false}\n",
            "{\"model\":\"llama3.2:3b\",\"created_at\":\"t1\",\"response\":\"lo\",\"done\":false}\n",
            "{\"model\":\"llama3.2:3b\",\"created_at\":\"t2\",\"response\":\"\",\"done\":true}\n",
        );
        assert_eq!(assemble_response(raw.as_bytes()).unwrap(), "Hello");
    }

    #[test]
    fn given_no_trailing_newline_when_assemble_then_still_complete() {
        let raw = "{\"response\":\"Hi\",\"done\":true}";
        assert_eq!(assemble_response(raw.as_bytes()).unwrap(), "Hi");
    }

    #[test]
    fn given_malformed_line_when_assemble_then_error_discards_partial() {
        let raw = "{\"response\":\"Hel\",\"done\":false}\nnot json\n";
        let err = assemble_response(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, DomainError::Deserialization(_)));
    }

    #[test]
    fn given_line_missing_response_field_when_assemble_then_error() {
        let raw = "{\"done\":true}\n";
        assert!(assemble_response(raw.as_bytes()).is_err());
    }

    #[test]
    fn given_empty_body_when_assemble_then_empty_answer() {
        assert_eq!(assemble_response(b"").unwrap(), "");
    }

    #[test]
    #[serial]
    fn given_no_server_and_no_env_when_new_then_loopback_default() {
        let _guard = EnvGuard::new();
        env::remove_var("OLLAMA_HOST");
        let client = OllamaEmbedding::new(None, DEFAULT_EMBEDDING_MODEL).unwrap();
        assert_eq!(client.url().as_str(), "http://127.0.0.1:11434/");
        assert_eq!(client.model(), DEFAULT_EMBEDDING_MODEL);
    }

    #[test]
    #[serial]
    fn given_ollama_host_env_when_new_then_env_wins() {
        let _guard = EnvGuard::new();
        env::set_var("OLLAMA_HOST", "10.0.0.7");
        let client = OllamaEmbedding::new(None, DEFAULT_GEN_MODEL).unwrap();
        assert_eq!(client.url().as_str(), "http://10.0.0.7:11434/");
    }

    #[test]
    #[serial]
    fn given_explicit_server_when_new_then_env_ignored() {
        let _guard = EnvGuard::new();
        env::set_var("OLLAMA_HOST", "10.0.0.7");
        let client = OllamaEmbedding::new(Some("http://localhost:9999"), "m").unwrap();
        assert_eq!(client.url().as_str(), "http://localhost:9999/");
    }

    #[test]
    fn given_garbage_server_when_new_then_invalid_url() {
        let err = OllamaEmbedding::new(Some("not a url"), "m").unwrap_err();
        assert!(matches!(err, DomainError::InvalidUrl(_)));
    }
}
