//! Agreement measure for one debate round.

use crate::consensus::TokenSet;
use crate::core::response::Response;

/// Average Jaccard similarity over every unordered pair of arguments.
///
/// Defined as 1 when there is at most one argument. Unlike consensus
/// grouping, no threshold is applied: every pair contributes its raw score.
pub fn pairwise_agreement(arguments: &[Response]) -> f64 {
    if arguments.len() <= 1 {
        return 1.0;
    }

    let token_sets: Vec<TokenSet> = arguments
        .iter()
        .map(|r| TokenSet::from_text(&r.content))
        .collect();

    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, left) in token_sets.iter().enumerate() {
        for right in &token_sets[i + 1..] {
            total += left.jaccard(right);
            pairs += 1;
        }
    }

    total / pairs as f64
}
