// src/domain/embedding.rs
use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainResult;

/// An embedding vector, typically a high-dimensional unit vector.
///
/// Transparent over its components so that the JSON float arrays returned
/// by the embed endpoint deserialize straight into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(pub Vec<f32>);

impl Vector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Dot product of `self` and `other`, accumulated in f64 to avoid
    /// rounding drift over high-dimensional vectors.
    ///
    /// Unequal lengths are not an error: the shorter vector bounds the
    /// computation. Callers needing strict length equality must check it
    /// themselves.
    pub fn dot(&self, other: &Vector) -> f64 {
        let n = self.0.len().min(other.0.len());
        let a = &self.0[..n];
        let b = &other.0[..n];
        let mut t = 0f64;
        for i in 0..n {
            t += f64::from(a[i]) * f64::from(b[i]);
        }
        t
    }

    /// Byte encoding of the vector, suitable for storing in a database:
    /// each component a 4-byte big-endian IEEE-754 f32, in vector order.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 4 * self.0.len()];
        for (i, &f) in self.0.iter().enumerate() {
            BigEndian::write_f32(&mut buf[4 * i..4 * i + 4], f);
        }
        buf
    }

    /// Inverse of [`encode`](Self::encode). Trailing bytes beyond the last
    /// full 4-byte component are ignored; empty input yields an empty vector.
    pub fn decode(enc: &[u8]) -> Vector {
        let mut components = Vec::with_capacity(enc.len() / 4);
        for chunk in enc.chunks_exact(4) {
            components.push(BigEndian::read_f32(chunk));
        }
        Vector(components)
    }
}

impl From<Vec<f32>> for Vector {
    fn from(components: Vec<f32>) -> Self {
        Vector(components)
    }
}

/// A single document to be embedded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedDoc {
    /// Title of the document, may be empty.
    pub title: String,
    /// Text of the document.
    pub text: String,
}

impl EmbedDoc {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Wire framing of the document: title and text joined by a blank line.
    /// Servers without native title support still receive this exact framing.
    pub fn framed(&self) -> String {
        format!("{}\n\n{}", self.title, self.text)
    }
}

/// Core trait for the embedding capability: maps documents to vectors.
///
/// Implemented by the Ollama HTTP client and by a dummy provider that
/// returns fixed vectors without network I/O.
pub trait Embedder: Send + Sync {
    /// Embeds the documents, returning one vector per document in input
    /// order.
    fn embed_docs(&self, docs: &[EmbedDoc]) -> DomainResult<Vec<Vector>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_known_vectors_when_dot_then_matches_reference_value() {
        let v1 = Vector(vec![1.0, 2.0, 3.0, 4.0]);
        let v2 = Vector(vec![-200.0, -3000.0, 0.0, -10000.0]);
        assert_eq!(v1.dot(&v2), -46200.0);
    }

    #[test]
    fn given_unequal_lengths_when_dot_then_shorter_bounds_computation() {
        let a = Vector(vec![1.0, 2.0, 3.0]);
        let b = Vector(vec![4.0, 5.0]);
        let truncated = Vector(vec![1.0, 2.0]);
        assert_eq!(a.dot(&b), truncated.dot(&b));
        assert_eq!(a.dot(&b), 14.0);
        // symmetric
        assert_eq!(b.dot(&a), 14.0);
    }

    #[test]
    fn given_vector_when_encode_decode_then_roundtrips() {
        let v = Vector(vec![1.0, 2.0, 3.0, 4.0, 11.0, 15.0, 17.0, 19.0]);
        let enc = v.encode();
        assert_eq!(enc.len(), 4 * v.len());
        assert_eq!(Vector::decode(&enc), v);
    }

    #[test]
    fn given_nan_and_inf_when_encode_decode_then_bits_preserved() {
        let v = Vector(vec![f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -0.0]);
        let decoded = Vector::decode(&v.encode());
        assert_eq!(decoded.len(), v.len());
        for (a, b) in v.as_slice().iter().zip(decoded.as_slice()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn given_trailing_bytes_when_decode_then_discarded() {
        let v = Vector(vec![1.5, -2.5]);
        for r in 1..4 {
            let mut enc = v.encode();
            enc.extend(std::iter::repeat(0xAA).take(r));
            let decoded = Vector::decode(&enc);
            assert_eq!(decoded, v, "trailing {} bytes must be ignored", r);
        }
    }

    #[test]
    fn given_empty_input_when_decode_then_empty_vector() {
        assert!(Vector::decode(&[]).is_empty());
    }

    #[test]
    fn given_big_endian_encoding_then_byte_order_is_fixed() {
        // 1.0f32 == 0x3F800000
        let enc = Vector(vec![1.0]).encode();
        assert_eq!(enc, vec![0x3F, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn given_titled_doc_when_framed_then_blank_line_separator() {
        let doc = EmbedDoc::new("Title", "Body text");
        assert_eq!(doc.framed(), "Title\n\nBody text");
        let untitled = EmbedDoc::new("", "just text");
        assert_eq!(untitled.framed(), "\n\njust text");
    }
}
