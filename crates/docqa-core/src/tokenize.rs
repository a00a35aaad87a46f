//! Shared tokenizer.
//!
//! Corpus indexing and query keyword extraction must agree on vocabulary,
//! so both go through this one function.

/// Common English function words dropped from every token stream.
/// Must stay sorted; membership checks use binary search.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from",
    "had", "has", "have", "he", "in", "is", "it", "its", "not", "of", "on",
    "or", "that", "the", "their", "them", "then", "there", "these", "they",
    "this", "to", "was", "will", "with",
];

const MIN_TOKEN_CHARS: usize = 3;

#[must_use]
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.binary_search(&token).is_ok()
}

/// Lower-cases, folds punctuation to whitespace, splits, and drops tokens
/// shorter than three characters or in the stopword set. Pure and
/// deterministic; token order follows the input text.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS && !is_stopword(t))
        .map(ToOwned::to_owned)
        .collect()
}
