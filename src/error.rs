//! Error types for PromptQL.
//!
//! All errors in PromptQL are strongly typed using thiserror.
//! This enables pattern matching on specific error conditions
//! and provides clear error messages.

use thiserror::Error;

/// Shape errors raised by the embedding codec.
///
/// The codec accepts exactly one vector width and one blob width;
/// anything else is rejected before any bytes are produced or consumed.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("Embedding has {actual} values, expected exactly {expected}")]
    VectorLength {
        actual: usize,
        expected: usize,
    },

    #[error("Encoded blob is {actual} bytes, expected exactly {expected}")]
    BlobLength {
        actual: usize,
        expected: usize,
    },
}

/// Errors raised during prompt assembly.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Cannot assemble a prompt from a group with no accumulated rows")]
    EmptyGroup,
}

/// Errors raised by the similarity scorer.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Cosine similarity is undefined for a zero-magnitude vector")]
    ZeroMagnitude,

    #[error("Vectors have mismatched lengths: {left} vs {right}")]
    LengthMismatch {
        left: usize,
        right: usize,
    },
}

/// Transport errors for the remote model service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {message}")]
    RequestFailed {
        message: String,
    },

    #[error("Service error (status {status}): {body}")]
    ServiceError {
        status: u16,
        body: String,
    },

    #[error("Unexpected response shape: {message}")]
    UnexpectedResponse {
        message: String,
    },
}

/// Top-level error type for PromptQL.
///
/// This enum encompasses all possible errors that can occur
/// when using PromptQL.
#[derive(Debug, Error)]
pub enum PromptqlError {
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Score error: {0}")]
    Score(#[from] ScoreError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PromptqlError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a shape error.
    #[must_use]
    pub const fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// Returns true if this is a prompt error.
    #[must_use]
    pub const fn is_prompt(&self) -> bool {
        matches!(self, Self::Prompt(_))
    }

    /// Returns true if this is a score error.
    #[must_use]
    pub const fn is_score(&self) -> bool {
        matches!(self, Self::Score(_))
    }

    /// Returns true if this is a transport error.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true if this error is retryable.
    ///
    /// Shape, prompt, and score errors are deterministic functions of their
    /// inputs and will not change on retry. Transport errors retry only on
    /// connection failures and server-side (5xx) statuses.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Shape(_) | Self::Prompt(_) | Self::Score(_) | Self::Internal { .. } => false,
            Self::Transport(e) => match e {
                TransportError::RequestFailed { .. } => true,
                TransportError::ServiceError { status, .. } => *status >= 500,
                TransportError::UnexpectedResponse { .. } => false,
            },
        }
    }
}

/// Result type alias for PromptQL operations.
pub type PromptqlResult<T> = Result<T, PromptqlError>;
