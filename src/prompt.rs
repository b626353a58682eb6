//! Token-budgeted prompt assembly.
//!
//! [`PromptBuilder`] is a streaming aggregate. The hosting query engine
//! creates one builder per aggregation group, feeds it one row at a time
//! through [`PromptBuilder::step`], and asks for the assembled prompt once
//! the group completes through [`PromptBuilder::finalize`]. The group's
//! parameters (prefix, suffix, token budget) are captured from the first
//! row and locked for the rest of the group's lifetime.
//!
//! A builder is empty, then accumulating, then finalized. `finalize` borrows
//! immutably and computes its result from scratch, so calling it repeatedly
//! returns identical output and the host never has to care about a terminal
//! state.
//!
//! Budget accounting uses [`crate::tokenizer::count_tokens`], so the tokens
//! spent on the prefix and suffix are measured with exactly the same rules
//! used to truncate the accumulated texts.

use serde::{Deserialize, Serialize};

use crate::error::PromptError;
use crate::tokenizer::{count_tokens, tokenize};

/// Token limit applied when a group does not supply one.
pub const DEFAULT_TOKEN_LIMIT: usize = 4000;

/// Per-group prompt parameters.
///
/// Captured once, from the first row a [`PromptBuilder`] accepts, and
/// locked for the remaining lifetime of the group. Hosts that register the
/// aggregate without a trailing limit argument get [`DEFAULT_TOKEN_LIMIT`].
///
/// # Examples
///
/// ```
/// use promptql::prompt::{PromptParams, DEFAULT_TOKEN_LIMIT};
///
/// let params = PromptParams::new("Context:", "Answer:", 256);
/// assert_eq!(params.token_limit, DEFAULT_TOKEN_LIMIT);
///
/// let tight = PromptParams::new("Context:", "Answer:", 256).with_token_limit(512);
/// assert_eq!(tight.token_limit, 512);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptParams {
    /// Text placed before the accumulated rows.
    pub prefix: String,

    /// Text placed after the accumulated rows.
    pub suffix: String,

    /// Tokens reserved for the model's completion.
    pub completion_tokens: usize,

    /// Total context size of the target model.
    pub token_limit: usize,
}

impl PromptParams {
    /// Creates parameters with the default token limit.
    #[must_use]
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        completion_tokens: usize,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            completion_tokens,
            token_limit: DEFAULT_TOKEN_LIMIT,
        }
    }

    /// Overrides the token limit.
    #[must_use]
    pub fn with_token_limit(mut self, token_limit: usize) -> Self {
        self.token_limit = token_limit;
        self
    }
}

impl Default for PromptParams {
    fn default() -> Self {
        Self::new("", "", 0)
    }
}

/// Streaming aggregate that assembles one token-budgeted prompt per group.
///
/// Owned exclusively by one aggregation group; the host guarantees `step`
/// calls are sequential and `finalize` runs after the last row. Memory
/// grows linearly with the accumulated text; there is no bound on the
/// number of rows.
///
/// # Examples
///
/// ```
/// use promptql::prompt::{PromptBuilder, PromptParams};
///
/// let params = PromptParams::new("Prefix", "Suffix", 50);
/// let mut group = PromptBuilder::new();
/// group.step("first row", params.clone());
/// group.step("second row", params);
///
/// let prompt = group.finalize()?;
/// assert_eq!(prompt, "Prefix first row second row Suffix");
/// # Ok::<(), promptql::PromptError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    params: Option<PromptParams>,
    texts: Vec<String>,
}

impl PromptBuilder {
    /// Creates an empty builder for a new aggregation group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts one row.
    ///
    /// The text is appended in arrival order. The `params` of the first
    /// accepted row lock the group's configuration; `params` supplied on
    /// every later row are accepted and ignored. Callers are expected to
    /// pass identical parameters for every row of a group. Divergent values
    /// are not an error here, they simply never take effect; a host can
    /// compare against [`PromptBuilder::params`] if it wants to detect
    /// them.
    pub fn step(&mut self, text: impl Into<String>, params: PromptParams) {
        if self.params.is_none() {
            self.params = Some(params);
        }
        self.texts.push(text.into());
    }

    /// Returns the locked group parameters, if any row has been accepted.
    #[must_use]
    pub fn params(&self) -> Option<&PromptParams> {
        self.params.as_ref()
    }

    /// Returns the number of accumulated rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Returns true if no row has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Assembles the prompt from every accumulated row.
    ///
    /// The remaining budget is `token_limit` minus the completion reserve
    /// and the token counts of the prefix and suffix. It is split equally
    /// across the rows with floor division; the remainder is never
    /// redistributed. Each text keeps its first share of tokens, rejoined
    /// with single spaces; original inter-token whitespace is not
    /// preserved.
    ///
    /// If the fixed parts alone exceed the limit, every text is dropped and
    /// the result is `"{prefix} {suffix}"`.
    ///
    /// Borrows immutably: calling `finalize` again returns the same string.
    ///
    /// # Errors
    ///
    /// Returns `PromptError::EmptyGroup` if no row was ever accepted.
    pub fn finalize(&self) -> Result<String, PromptError> {
        let Some(params) = &self.params else {
            return Err(PromptError::EmptyGroup);
        };
        if self.texts.is_empty() {
            return Err(PromptError::EmptyGroup);
        }

        let fixed = params.completion_tokens
            + count_tokens(&params.prefix)
            + count_tokens(&params.suffix);
        if fixed > params.token_limit {
            return Ok(format!("{} {}", params.prefix, params.suffix));
        }

        let per_text = (params.token_limit - fixed) / self.texts.len();

        let mut truncated = Vec::with_capacity(self.texts.len());
        for text in &self.texts {
            let tokens = tokenize(text);
            let take = tokens.len().min(per_text);
            truncated.push(tokens[..take].join(" "));
        }

        Ok(format!(
            "{} {} {}",
            params.prefix,
            truncated.join(" "),
            params.suffix
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_all(builder: &mut PromptBuilder, texts: &[&str], params: &PromptParams) {
        for text in texts {
            builder.step(*text, params.clone());
        }
    }

    #[test]
    fn assembles_rows_in_arrival_order() {
        let params = PromptParams::new("Prefix", "Suffix", 50);
        let mut builder = PromptBuilder::new();
        step_all(&mut builder, &["alpha", "beta", "gamma"], &params);

        assert_eq!(
            builder.finalize().unwrap(),
            "Prefix alpha beta gamma Suffix"
        );
    }

    #[test]
    fn truncates_each_text_to_its_share() {
        // prefix (1) + suffix (1) + completion (0) leaves 4 of 6 tokens,
        // split across 2 texts: 2 tokens each.
        let params = PromptParams::new("P", "S", 0).with_token_limit(6);
        let mut builder = PromptBuilder::new();
        step_all(
            &mut builder,
            &["one two three", "four five six"],
            &params,
        );

        assert_eq!(builder.finalize().unwrap(), "P one two four five S");
    }

    #[test]
    fn short_texts_keep_all_their_tokens() {
        let params = PromptParams::new("P", "S", 0).with_token_limit(100);
        let mut builder = PromptBuilder::new();
        step_all(&mut builder, &["one", "two three"], &params);

        assert_eq!(builder.finalize().unwrap(), "P one two three S");
    }

    #[test]
    fn remainder_tokens_are_not_redistributed() {
        // 5 available tokens over 2 texts floor to 2 each; the spare token
        // goes unused even though the first text could fill it.
        let params = PromptParams::new("P", "S", 0).with_token_limit(7);
        let mut builder = PromptBuilder::new();
        step_all(
            &mut builder,
            &["a b c d e", "f g h i j"],
            &params,
        );

        assert_eq!(builder.finalize().unwrap(), "P a b f g S");
    }

    #[test]
    fn exhausted_budget_drops_all_texts() {
        let params = PromptParams::new("Prefix", "Suffix", 4000).with_token_limit(100);
        let mut builder = PromptBuilder::new();
        step_all(&mut builder, &["doomed text"], &params);

        assert_eq!(builder.finalize().unwrap(), "Prefix Suffix");
    }

    #[test]
    fn zero_available_tokens_keeps_texts_as_empty_slots() {
        // Fixed parts consume the limit exactly: not the drop-everything
        // path, but each text's share floors to zero tokens.
        let params = PromptParams::new("P", "S", 0).with_token_limit(2);
        let mut builder = PromptBuilder::new();
        step_all(&mut builder, &["a", "b"], &params);

        assert_eq!(builder.finalize().unwrap(), "P   S");
    }

    #[test]
    fn first_row_parameters_lock_the_group() {
        let first = PromptParams::new("First", "Wins", 0).with_token_limit(200);
        let divergent = PromptParams::new("Later", "Loses", 3999);

        let mut builder = PromptBuilder::new();
        builder.step("one", first.clone());
        builder.step("two", divergent);

        assert_eq!(builder.params(), Some(&first));
        assert_eq!(builder.finalize().unwrap(), "First one two Wins");
    }

    #[test]
    fn empty_group_is_an_error() {
        let builder = PromptBuilder::new();
        assert!(matches!(builder.finalize(), Err(PromptError::EmptyGroup)));
    }

    #[test]
    fn finalize_is_idempotent() {
        let params = PromptParams::new("P", "S", 0).with_token_limit(6);
        let mut builder = PromptBuilder::new();
        step_all(&mut builder, &["one two three", "four five six"], &params);

        let first = builder.finalize().unwrap();
        let second = builder.finalize().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_row_text_is_kept_as_a_slot() {
        let params = PromptParams::new("P", "S", 0).with_token_limit(50);
        let mut builder = PromptBuilder::new();
        step_all(&mut builder, &["one", "", "two"], &params);

        assert_eq!(builder.len(), 3);
        assert_eq!(builder.finalize().unwrap(), "P one  two S");
    }

    #[test]
    fn default_token_limit_applies() {
        let params = PromptParams::new("P", "S", 0);
        assert_eq!(params.token_limit, DEFAULT_TOKEN_LIMIT);
    }

    #[test]
    fn builder_reports_accumulation_state() {
        let mut builder = PromptBuilder::new();
        assert!(builder.is_empty());
        assert!(builder.params().is_none());

        builder.step("row", PromptParams::default());
        assert!(!builder.is_empty());
        assert_eq!(builder.len(), 1);
        assert!(builder.params().is_some());
    }

    #[test]
    fn params_serialize_roundtrip() {
        let params = PromptParams::new("Prefix", "Suffix", 128).with_token_limit(2048);
        let json = serde_json::to_string(&params).unwrap();
        let back: PromptParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
