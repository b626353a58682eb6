//! Binary codec for embedding vectors.
//!
//! All blobs use one layout:
//! - Exactly [`EMBEDDING_DIM`] elements, no more, no fewer
//! - Each element a 4-byte IEEE-754 single-precision float, little-endian
//! - No header, no padding, no compression
//!
//! The byte order is pinned rather than platform-native so blobs written on
//! one build decode identically on any other.

use crate::error::ShapeError;

/// Number of elements in an embedding vector.
pub const EMBEDDING_DIM: usize = 1536;

/// Size in bytes of an encoded embedding blob.
pub const ENCODED_LEN: usize = EMBEDDING_DIM * 4;

/// Encodes an embedding vector into a fixed-size blob.
///
/// # Errors
///
/// Returns `ShapeError::VectorLength` if `values` does not hold exactly
/// [`EMBEDDING_DIM`] elements.
///
/// # Examples
///
/// ```
/// use promptql::embedding::{decode, encode, EMBEDDING_DIM, ENCODED_LEN};
///
/// let vector = vec![0.5f32; EMBEDDING_DIM];
/// let blob = encode(&vector)?;
/// assert_eq!(blob.len(), ENCODED_LEN);
/// assert_eq!(decode(&blob)?, vector);
/// # Ok::<(), promptql::ShapeError>(())
/// ```
pub fn encode(values: &[f32]) -> Result<Vec<u8>, ShapeError> {
    if values.len() != EMBEDDING_DIM {
        return Err(ShapeError::VectorLength {
            actual: values.len(),
            expected: EMBEDDING_DIM,
        });
    }

    let mut out = Vec::with_capacity(ENCODED_LEN);
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
    Ok(out)
}

/// Decodes a fixed-size blob back into an embedding vector.
///
/// # Errors
///
/// Returns `ShapeError::BlobLength` if `blob` is not exactly
/// [`ENCODED_LEN`] bytes.
pub fn decode(blob: &[u8]) -> Result<Vec<f32>, ShapeError> {
    if blob.len() != ENCODED_LEN {
        return Err(ShapeError::BlobLength {
            actual: blob.len(),
            expected: ENCODED_LEN,
        });
    }

    let mut out = Vec::with_capacity(EMBEDDING_DIM);
    for chunk in blob.chunks_exact(4) {
        out.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    Ok(out)
}
