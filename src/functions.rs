//! Host-facing function surface.
//!
//! A hosting query engine registers the crate's primitives under the names
//! listed in [`catalog`] and invokes them per row. Values cross the host
//! boundary as plain strings, integers, floats, and blobs; structured
//! results (the tokenizer's output) are carried as JSON.

use serde::{Deserialize, Serialize};

use crate::error::{PromptqlError, PromptqlResult};
use crate::tokenizer::tokenize;

/// How a registered function consumes rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    /// Invoked once per row, result per row.
    Scalar,

    /// Fed every row of a group, one result on group completion.
    Aggregate,
}

/// Registration entry for one host-visible function.
///
/// `arities` lists every argument count the function accepts. Only the
/// prompt aggregate carries two: the optional trailing argument is the
/// token limit, and the shorter form falls back to
/// [`crate::prompt::DEFAULT_TOKEN_LIMIT`]. Both arities resolve to the same
/// implementation: hosts register one aggregate twice rather than two
/// aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSpec {
    /// Registration name.
    pub name: &'static str,

    /// Accepted argument counts.
    pub arities: &'static [usize],

    /// Scalar or aggregate.
    pub kind: FunctionKind,
}

/// Every function the crate exposes to a hosting engine.
///
/// Transport-backed functions appear only when the `transport-http`
/// feature is enabled, since they cannot run without the remote service
/// client.
#[must_use]
pub fn catalog() -> Vec<FunctionSpec> {
    #[cfg_attr(not(feature = "transport-http"), allow(unused_mut))]
    let mut specs = vec![
        FunctionSpec {
            name: "llm_tokenize",
            arities: &[1],
            kind: FunctionKind::Scalar,
        },
        FunctionSpec {
            name: "llm_count_tokens",
            arities: &[1],
            kind: FunctionKind::Scalar,
        },
        FunctionSpec {
            name: "llm_strip_tags",
            arities: &[1],
            kind: FunctionKind::Scalar,
        },
        FunctionSpec {
            name: "llm_embedding_similarity",
            arities: &[2],
            kind: FunctionKind::Scalar,
        },
        FunctionSpec {
            name: "llm_build_prompt",
            arities: &[4, 5],
            kind: FunctionKind::Aggregate,
        },
    ];

    #[cfg(feature = "transport-http")]
    {
        specs.push(FunctionSpec {
            name: "llm_embedding",
            arities: &[2],
            kind: FunctionKind::Scalar,
        });
        specs.push(FunctionSpec {
            name: "llm_completion",
            arities: &[4],
            kind: FunctionKind::Scalar,
        });
    }

    specs
}

/// Tokenizes `text` and encodes the result as a JSON array of strings.
///
/// This is the wire form of `llm_tokenize`: hosts that cannot return list
/// values from a scalar function hand the caller this JSON string instead.
///
/// # Errors
///
/// Returns an internal error if JSON encoding fails.
///
/// # Examples
///
/// ```
/// use promptql::functions::tokenize_json;
///
/// assert_eq!(tokenize_json("Hello world!")?, r#"["Hello","world","!"]"#);
/// # Ok::<(), promptql::PromptqlError>(())
/// ```
pub fn tokenize_json(text: &str) -> PromptqlResult<String> {
    serde_json::to_string(&tokenize(text))
        .map_err(|e| PromptqlError::internal(format!("token list encoding failed: {e}")))
}
