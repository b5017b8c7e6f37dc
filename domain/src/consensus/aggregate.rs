//! Consensus result and the aggregation that produces it.

use super::grouping::{group_responses, majority_group};
use crate::core::response::Response;
use serde::{Deserialize, Serialize};

/// Confidence multiplier applied when every response joined the majority.
const UNANIMOUS_BOOST: f64 = 1.2;

/// Bookkeeping attached to a consensus result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusMetadata {
    /// Number of rounds (1 for a consensus call)
    pub rounds: usize,
    /// Wall-clock duration of the whole call in milliseconds
    pub total_time_ms: u64,
    /// Sum of every response's reported cost
    pub total_cost: f64,
}

/// Outcome of a single consensus round
///
/// `agreement` is the majority group's share of all responses and
/// `dissenting` holds exactly the responses outside the majority group
/// (absent when there are none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// Synthesized answer text
    pub result: String,
    /// In [0, 1]
    pub confidence: f64,
    /// In [0, 1]
    pub agreement: f64,
    /// Every provider that responded, in provider order
    pub providers: Vec<String>,
    /// Human-readable summary of the agreement level
    pub reasoning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dissenting: Option<Vec<Response>>,
    pub metadata: ConsensusMetadata,
}

impl ConsensusResult {
    pub fn has_dissent(&self) -> bool {
        self.dissenting.as_ref().is_some_and(|d| !d.is_empty())
    }

    pub fn dissent_count(&self) -> usize {
        self.dissenting.as_ref().map_or(0, Vec::len)
    }

    /// Replace the measured duration (the caller times the whole call).
    pub fn with_total_time_ms(mut self, total_time_ms: u64) -> Self {
        self.metadata.total_time_ms = total_time_ms;
        self
    }
}

/// Aggregate one round of responses into a consensus result.
///
/// Returns `None` for an empty response set. The synthesis is extractive:
/// the content of the majority group's first response.
///
/// # Example
///
/// ```
/// use orchestra_domain::{Response, aggregate_responses};
///
/// let responses = vec![
///     Response::new("a", "Use Postgres"),
///     Response::new("b", "Use Postgres"),
///     Response::new("c", "Use MongoDB"),
/// ];
///
/// let result = aggregate_responses(responses).unwrap();
/// assert_eq!(result.result, "Use Postgres");
/// assert_eq!(result.dissent_count(), 1);
/// ```
pub fn aggregate_responses(responses: Vec<Response>) -> Option<ConsensusResult> {
    if responses.is_empty() {
        return None;
    }

    let total = responses.len();
    let groups = group_responses(&responses);
    let (majority_index, majority) = majority_group(&groups)?;
    let majority_size = majority.len();

    let agreement = majority_size as f64 / total as f64;
    let confidence = if majority_size == total {
        (agreement * UNANIMOUS_BOOST).min(1.0)
    } else {
        agreement
    };

    let result = majority.seed().content.clone();
    let providers = responses.iter().map(|r| r.provider.clone()).collect();
    let total_cost = responses.iter().map(Response::cost_or_zero).sum();

    let dissent: Vec<Response> = groups
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != majority_index)
        .flat_map(|(_, group)| group.responses().iter().cloned())
        .collect();
    let reasoning = reasoning_for(agreement, dissent.len());
    let dissenting = (!dissent.is_empty()).then_some(dissent);

    Some(ConsensusResult {
        result,
        confidence,
        agreement,
        providers,
        reasoning,
        dissenting,
        metadata: ConsensusMetadata {
            rounds: 1,
            total_time_ms: 0,
            total_cost,
        },
    })
}

fn reasoning_for(agreement: f64, dissent_count: usize) -> String {
    let percent = (agreement * 100.0).round();
    match dissent_count {
        0 => format!("{}% of models agreed on this response.", percent),
        1 => format!(
            "{}% of models agreed on this response. 1 model provided a different perspective.",
            percent
        ),
        n => format!(
            "{}% of models agreed on this response. {} models provided different perspectives.",
            percent, n
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(provider: &str, content: &str) -> Response {
        Response::new(provider, content)
    }

    #[test]
    fn test_two_of_three_agree() {
        let result = aggregate_responses(vec![
            response("openai", "Use Postgres"),
            response("anthropic", "Use Postgres"),
            response("google", "Use MongoDB"),
        ])
        .unwrap();

        assert!((result.agreement - 2.0 / 3.0).abs() < 1e-9);
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.result, "Use Postgres");
        assert_eq!(result.providers, vec!["openai", "anthropic", "google"]);

        let dissenting = result.dissenting.unwrap();
        assert_eq!(dissenting.len(), 1);
        assert_eq!(dissenting[0].content, "Use MongoDB");
    }

    #[test]
    fn test_single_response_is_unanimous() {
        let result = aggregate_responses(vec![response("solo", "42")]).unwrap();
        assert_eq!(result.agreement, 1.0);
        assert_eq!(result.confidence, 1.0);
        assert!(result.dissenting.is_none());
        assert_eq!(result.metadata.rounds, 1);
    }

    #[test]
    fn test_agreement_matches_majority_share() {
        let result = aggregate_responses(vec![
            response("a", "alpha"),
            response("b", "beta"),
            response("c", "gamma"),
            response("d", "beta"),
        ])
        .unwrap();
        assert_eq!(result.agreement, 0.5);
        assert_eq!(result.result, "beta");
        assert_eq!(result.dissent_count(), 2);
        assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[test]
    fn test_total_cost_treats_missing_as_zero() {
        let result = aggregate_responses(vec![
            response("a", "x").with_cost(0.25),
            response("b", "x"),
            response("c", "x").with_cost(0.5),
        ])
        .unwrap();
        assert!((result.metadata.total_cost - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_reasoning_mentions_dissent() {
        let result = aggregate_responses(vec![
            response("a", "Use Postgres"),
            response("b", "Use Postgres"),
            response("c", "Use MongoDB"),
        ])
        .unwrap();
        assert_eq!(
            result.reasoning,
            "67% of models agreed on this response. 1 model provided a different perspective."
        );

        let unanimous = aggregate_responses(vec![response("a", "ok"), response("b", "ok")]).unwrap();
        assert_eq!(unanimous.reasoning, "100% of models agreed on this response.");
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_responses(Vec::new()).is_none());
    }

    #[test]
    fn test_all_empty_contents_split_apart() {
        let result = aggregate_responses(vec![response("a", ""), response("b", "")]).unwrap();
        assert_eq!(result.agreement, 0.5);
        let dissenting = result.dissenting.unwrap();
        assert_eq!(dissenting.len(), 1);
        assert_eq!(dissenting[0].provider, "b");
    }
}
