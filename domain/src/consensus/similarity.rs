//! Lexical similarity between response texts.
//!
//! Texts are lowercased and split on whitespace into token sets; similarity
//! is the Jaccard index of the two sets.

use std::collections::HashSet;

/// Two responses are similar when their Jaccard similarity exceeds this value.
pub const SIMILARITY_THRESHOLD: f64 = 0.6;

/// Case-insensitive set of whitespace-separated tokens
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenSet {
    tokens: HashSet<String>,
}

impl TokenSet {
    pub fn from_text(text: &str) -> Self {
        Self {
            tokens: text
                .split_whitespace()
                .map(|token| token.to_lowercase())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// |A ∩ B| / |A ∪ B|, or 0 when both sets are empty.
    pub fn jaccard(&self, other: &TokenSet) -> f64 {
        let intersection = self.tokens.intersection(&other.tokens).count();
        let union = self.tokens.len() + other.tokens.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }
}

/// Jaccard similarity of two texts' token sets.
///
/// # Example
///
/// ```
/// use orchestra_domain::jaccard_similarity;
///
/// assert_eq!(jaccard_similarity("Use Postgres", "use postgres"), 1.0);
/// assert!((jaccard_similarity("Use Postgres", "Use MongoDB") - 1.0 / 3.0).abs() < 1e-9);
/// assert_eq!(jaccard_similarity("", ""), 0.0);
/// ```
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    TokenSet::from_text(a).jaccard(&TokenSet::from_text(b))
}

/// The grouping predicate: similarity strictly above [`SIMILARITY_THRESHOLD`].
pub fn are_similar(a: &str, b: &str) -> bool {
    jaccard_similarity(a, b) > SIMILARITY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_token_sets_score_one() {
        assert_eq!(jaccard_similarity("the quick fox", "fox quick the"), 1.0);
        assert_eq!(jaccard_similarity("A  b\tc", "a B c"), 1.0);
    }

    #[test]
    fn test_duplicate_tokens_collapse() {
        let set = TokenSet::from_text("yes yes YES");
        assert_eq!(set.len(), 1);
        assert_eq!(jaccard_similarity("yes yes", "yes"), 1.0);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        assert_eq!(jaccard_similarity("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn test_empty_against_empty_is_zero() {
        assert_eq!(jaccard_similarity("", "   "), 0.0);
        assert!(!are_similar("", ""));
    }

    #[test]
    fn test_empty_against_text_is_zero() {
        assert_eq!(jaccard_similarity("", "something"), 0.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        // 3 shared of 5 total = 0.6 exactly, which is not similar
        let a = "one two three four";
        let b = "one two three five";
        assert!((jaccard_similarity(a, b) - 0.6).abs() < 1e-9);
        assert!(!are_similar(a, b));

        // 4 shared of 5 total = 0.8
        assert!(are_similar("one two three four", "one two three four five"));
    }

    #[test]
    fn test_punctuation_is_part_of_token() {
        assert!(jaccard_similarity("Postgres.", "Postgres") < 1.0);
    }
}
