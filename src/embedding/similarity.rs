//! Cosine similarity over embedding vectors.

use crate::embedding::codec;
use crate::error::{PromptqlResult, ScoreError};

/// Computes the cosine similarity between two vectors.
///
/// Accumulation runs in `f64` to keep the score stable over long vectors;
/// the result lies in `[-1, 1]` up to rounding.
///
/// # Errors
///
/// - `ScoreError::LengthMismatch` if the vectors differ in length.
/// - `ScoreError::ZeroMagnitude` if either vector has zero magnitude; the
///   score is undefined there and no sentinel value is returned.
///
/// # Examples
///
/// ```
/// use promptql::embedding::cosine_similarity;
///
/// let score = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0])?;
/// assert!((score - 1.0).abs() < 1e-12);
/// # Ok::<(), promptql::ScoreError>(())
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, ScoreError> {
    if a.len() != b.len() {
        return Err(ScoreError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let x = f64::from(x);
        let y = f64::from(y);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(ScoreError::ZeroMagnitude);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Computes the cosine similarity between two encoded embedding blobs.
///
/// Both blobs are decoded through [`crate::embedding::codec`] first, so
/// shape violations surface before any scoring happens.
///
/// # Errors
///
/// Returns a `ShapeError` for a malformed blob or a `ScoreError` for a
/// zero-magnitude vector, both wrapped in [`crate::error::PromptqlError`].
pub fn encoded_similarity(a: &[u8], b: &[u8]) -> PromptqlResult<f64> {
    let left = codec::decode(a)?;
    let right = codec::decode(b)?;
    Ok(cosine_similarity(&left, &right)?)
}
