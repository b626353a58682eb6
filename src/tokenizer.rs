//! Sub-word tokenizer matching the GPT-2 pre-tokenization scheme.
//!
//! Segmentation is rule-based and deterministic: English contractions first,
//! then letter runs, digit runs, and punctuation runs (each absorbing one
//! optional leading space), and finally whitespace runs. Raw segments are
//! trimmed of surrounding whitespace before emission; a segment that trims
//! to empty is still emitted, so token counts stay aligned with the scheme.
//!
//! Token counts produced here drive the budget accounting in
//! [`crate::prompt`].

use std::sync::OnceLock;

use regex::Regex;

/// Pre-tokenization pattern, matched longest-leftmost per alternation order.
///
/// The published scheme carries one extra branch, `\s+(?!\S)`, ahead of the
/// final `\s+` fallback. The `regex` crate has no lookahead, so that branch
/// is realized in [`tokenize`] as a post-adjustment on whitespace-only
/// matches instead of in the pattern itself.
const SEGMENT_PATTERN: &str =
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+";

static SEGMENT_RE: OnceLock<Regex> = OnceLock::new();

fn segment_re() -> &'static Regex {
    SEGMENT_RE.get_or_init(|| Regex::new(SEGMENT_PATTERN).expect("segment pattern is valid"))
}

/// Segments `text` into an ordered sequence of sub-word tokens.
///
/// Total for any input: never fails, and an empty input yields an empty
/// sequence. Ordering within the input is preserved.
///
/// # Examples
///
/// ```
/// use promptql::tokenizer::tokenize;
///
/// assert_eq!(tokenize("Hello world"), vec!["Hello", "world"]);
/// assert_eq!(tokenize("Hello world!"), vec!["Hello", "world", "!"]);
/// assert_eq!(tokenize("don't"), vec!["don", "'t"]);
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let re = segment_re();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        // The alternation covers every character class, so a match always
        // starts exactly at `pos`.
        let Some(m) = re.find_at(text, pos) else { break };
        if m.start() != pos {
            break;
        }

        let mut end = m.end();
        let segment = &text[pos..end];

        // A whitespace run of two or more characters followed by a
        // non-whitespace character gives its last character back, so it
        // attaches to the following segment. This reproduces the scheme's
        // `\s+(?!\S)` branch.
        if segment.chars().all(char::is_whitespace) {
            if let Some((last_start, _)) = segment.char_indices().last() {
                let followed_by_ink = text[end..].chars().next().is_some_and(|c| !c.is_whitespace());
                if last_start > 0 && followed_by_ink {
                    end = pos + last_start;
                }
            }
        }

        tokens.push(text[pos..end].trim().to_string());
        pos = end;
    }

    tokens
}

/// Returns the number of tokens in `text`.
///
/// Defined as the length of [`tokenize`], not a separate algorithm, so the
/// two can never disagree.
#[must_use]
pub fn count_tokens(text: &str) -> usize {
    tokenize(text).len()
}
