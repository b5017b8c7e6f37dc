//! Debate round records and the final result.

use crate::core::response::Response;
use serde::{Deserialize, Serialize};

/// One round of a debate
///
/// `arguments` holds one response per participating provider, in
/// participant order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateRound {
    /// Round number (1-indexed, contiguous)
    pub round: usize,
    pub arguments: Vec<Response>,
    /// Average pairwise similarity of the arguments, in [0, 1]
    pub agreement: f64,
    /// Synthesized text; set on the final round only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<String>,
}

impl DebateRound {
    pub fn new(round: usize, arguments: Vec<Response>, agreement: f64) -> Self {
        Self {
            round,
            arguments,
            agreement,
            synthesis: None,
        }
    }

    pub fn with_synthesis(mut self, synthesis: impl Into<String>) -> Self {
        self.synthesis = Some(synthesis.into());
        self
    }
}

/// Outcome of a complete debate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateResult {
    /// Decision text, taken from the first argument of the final round
    pub decision: String,
    pub rounds: Vec<DebateRound>,
    /// Final round's agreement
    pub agreement: f64,
    pub participants: Vec<String>,
    /// Equal to `agreement`
    pub confidence: f64,
    /// Whether the debate ended by reaching the threshold (as opposed to
    /// running out of rounds)
    pub converged: bool,
}

impl DebateResult {
    /// Conclude a debate from its rounds.
    ///
    /// Marks the final round with the decision. Returns `None` when no round
    /// was run.
    pub fn conclude(
        mut rounds: Vec<DebateRound>,
        participants: Vec<String>,
        threshold: f64,
    ) -> Option<Self> {
        let last = rounds.last_mut()?;
        let decision = last
            .arguments
            .first()
            .map(|r| r.content.clone())
            .unwrap_or_default();
        last.synthesis = Some(decision.clone());
        let agreement = last.agreement;

        Some(Self {
            decision,
            rounds,
            agreement,
            participants,
            confidence: agreement,
            converged: agreement >= threshold,
        })
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}
