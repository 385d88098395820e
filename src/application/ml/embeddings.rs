//! Placeholder text embedding.
//!
//! Derives a deterministic 128-dimensional binary vector from a SHA-256
//! digest of the text. Carries no semantic meaning; it exists so the boundary
//! interface stays stable until a real embedding model replaces it.

use sha2::{Digest, Sha256};

pub const EMBEDDING_DIM: usize = 128;

/// Deterministic hash-derived embedding: one 0.0/1.0 entry per digest bit.
pub fn embed(text: &str) -> Vec<f32> {
    let digest = Sha256::digest(text.as_bytes());

    let mut vector = Vec::with_capacity(EMBEDDING_DIM);
    for byte in digest.iter().take(EMBEDDING_DIM / 8) {
        for bit in 0..8 {
            vector.push(((byte >> bit) & 1) as f32);
        }
    }
    vector
}
