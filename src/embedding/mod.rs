//! Embedding vectors: fixed-width binary codec and similarity scoring.
//!
//! Vectors are value objects with no persistent identity: the codec turns a
//! 1536-dimension `f32` vector into a fixed-size blob a hosting engine can
//! store in a column, and the scorer compares two decoded vectors by cosine
//! similarity.

pub mod codec;
pub mod similarity;

pub use codec::{decode, encode, EMBEDDING_DIM, ENCODED_LEN};
pub use similarity::{cosine_similarity, encoded_similarity};
