//! # PromptQL - LLM prompt and embedding primitives for query engines
//!
//! PromptQL is a library of text- and vector-processing primitives meant to
//! be registered as per-row functions inside a hosting query engine. It
//! turns rows of stored text into one token-budgeted model prompt per
//! aggregation group, and stored embedding vectors into similarity scores.
//!
//! ## Core Concepts
//!
//! - **Token**: a minimal text unit produced by the segmentation rules;
//!   used for both counting and truncation
//! - **Token budget**: the context size of a model invocation, split
//!   between the prompt and the reserved completion
//! - **Aggregate**: a function fed every row of a group, producing one
//!   result when the group completes
//! - **Embedding blob**: the fixed-width binary form of a 1536-dimension
//!   vector, as stored in a host column
//!
//! ## Usage
//!
//! ```
//! use promptql::{PromptBuilder, PromptParams};
//!
//! let params = PromptParams::new("Answer using this context:", "Question: why?", 256);
//!
//! let mut group = PromptBuilder::new();
//! group.step("first row of context", params.clone());
//! group.step("second row of context", params);
//!
//! let prompt = group.finalize()?;
//! assert!(prompt.starts_with("Answer using this context:"));
//! assert!(prompt.ends_with("Question: why?"));
//! # Ok::<(), promptql::PromptError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core primitives
pub mod embedding;
pub mod error;
pub mod prompt;
pub mod text;
pub mod tokenizer;

// Host boundary
pub mod functions;

// Remote service collaborator
#[cfg(feature = "transport-http")]
pub mod transport;

// Re-export primary types at crate root for convenience
pub use embedding::{
    cosine_similarity, decode, encode, encoded_similarity, EMBEDDING_DIM, ENCODED_LEN,
};
pub use error::{
    PromptError, PromptqlError, PromptqlResult, ScoreError, ShapeError, TransportError,
};
pub use functions::{catalog, tokenize_json, FunctionKind, FunctionSpec};
pub use prompt::{PromptBuilder, PromptParams, DEFAULT_TOKEN_LIMIT};
pub use text::strip_tags;
pub use tokenizer::{count_tokens, tokenize};

#[cfg(feature = "transport-http")]
pub use transport::{ModelClient, TransportConfig, DEFAULT_TIMEOUT};
