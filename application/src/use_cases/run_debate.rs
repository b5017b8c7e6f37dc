//! Run Debate use case
//!
//! Sequential rounds over the same participants. Each round's prompt is the
//! original prompt plus a digest of the previous round, so round N never
//! starts before round N-1 has fully settled.
//!
//! ```text
//!            ┌────────────────────────────────────────────┐
//!            ▼                                            │
//!   fan_out(prompt) ─► pairwise agreement ─► record round ─┤
//!                                                │        │ agreement < threshold
//!                                                │        │ and rounds left:
//!                                                │        └─ augment prompt
//!                                                ▼
//!                                  converged or budget spent ─► decision
//! ```

use crate::error::OrchestraError;
use crate::ports::event_listener::{EventListener, NoEvents};
use crate::ports::provider::CompletionOptions;
use crate::registry::ProviderRegistry;
use crate::use_cases::fan_out::fan_out;
use orchestra_domain::{
    DEFAULT_CONSENSUS_THRESHOLD, DEFAULT_MAX_DEBATE_ROUNDS, DebateResult, DebateRound,
    DomainError, OrchestraEvent, augment_prompt, pairwise_agreement, validate_threshold,
};
use std::sync::Arc;
use tracing::info;

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub prompt: String,
    /// Explicit participant set; every registered provider when absent
    pub providers: Option<Vec<String>>,
    /// Agreement at or above which the debate stops early
    pub threshold: f64,
    /// Round budget (at least 1)
    pub max_rounds: usize,
}

impl RunDebateInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            providers: None,
            threshold: DEFAULT_CONSENSUS_THRESHOLD,
            max_rounds: DEFAULT_MAX_DEBATE_ROUNDS,
        }
    }

    pub fn with_providers(mut self, providers: Vec<String>) -> Self {
        self.providers = Some(providers);
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

/// Use case for running a multi-round debate
pub struct RunDebateUseCase {
    registry: Arc<ProviderRegistry>,
}

impl RunDebateUseCase {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Execute the use case without round notifications
    pub async fn execute(&self, input: RunDebateInput) -> Result<DebateResult, OrchestraError> {
        self.execute_with_progress(input, &NoEvents).await
    }

    /// Execute the use case, publishing a `debate:round` event after each
    /// round is recorded
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        events: &dyn EventListener,
    ) -> Result<DebateResult, OrchestraError> {
        validate_threshold(input.threshold)?;
        if input.max_rounds == 0 {
            return Err(DomainError::InvalidMaxRounds.into());
        }

        let participants = self.registry.resolve(input.providers.as_deref())?;
        let names: Vec<String> = participants.iter().map(|p| p.name.clone()).collect();
        info!(
            "Starting debate with {} participants (threshold {:.2}, max {} rounds)",
            names.len(),
            input.threshold,
            input.max_rounds
        );

        let options = CompletionOptions::default();
        let mut rounds: Vec<DebateRound> = Vec::new();
        let mut prompt = input.prompt.clone();

        loop {
            let number = rounds.len() + 1;
            let arguments = fan_out(&participants, &prompt, &options).await?;
            let agreement = pairwise_agreement(&arguments);
            info!(
                "Debate round {} finished with {:.0}% agreement",
                number,
                agreement * 100.0
            );

            rounds.push(DebateRound::new(number, arguments, agreement));
            let round = &rounds[number - 1];
            events.on_event(&OrchestraEvent::DebateRound(round.clone()));

            if agreement >= input.threshold {
                info!("Debate converged after {} rounds", number);
                break;
            }
            if number >= input.max_rounds {
                info!("Debate round budget of {} exhausted", input.max_rounds);
                break;
            }
            prompt = augment_prompt(&input.prompt, &round.arguments);
        }

        DebateResult::conclude(rounds, names, input.threshold).ok_or(OrchestraError::NoProviders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Canned, CannedFactory, Failing, RecordingListener, Scripted};

    fn registry() -> Arc<ProviderRegistry> {
        Arc::new(ProviderRegistry::new(Arc::new(CannedFactory)))
    }

    #[tokio::test]
    async fn test_stops_on_budget_without_error() {
        let registry = registry();
        registry.register_with("a", Canned::new("a", "cats are best"));
        registry.register_with("b", Canned::new("b", "dogs win always"));

        let result = RunDebateUseCase::new(registry)
            .execute(
                RunDebateInput::new("Which pet?")
                    .with_threshold(0.9)
                    .with_max_rounds(1),
            )
            .await
            .unwrap();

        assert_eq!(result.rounds.len(), 1);
        assert!(result.agreement < 0.9);
        assert!(!result.converged);
        assert_eq!(result.decision, "cats are best");
    }

    #[tokio::test]
    async fn test_converges_early() {
        let registry = registry();
        let a = Scripted::new("a", &["red", "blue"]);
        let b = Scripted::new("b", &["green", "blue"]);
        registry.register_with("a", a.clone());
        registry.register_with("b", b.clone());

        let result = RunDebateUseCase::new(registry)
            .execute(RunDebateInput::new("Pick a colour").with_max_rounds(5))
            .await
            .unwrap();

        assert_eq!(result.rounds.len(), 2);
        assert_eq!(result.agreement, 1.0);
        assert_eq!(result.confidence, 1.0);
        assert!(result.converged);
        assert_eq!(result.decision, "blue");
        assert_eq!(a.call_count(), 2);
        assert_eq!(
            result.rounds.iter().map(|r| r.round).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[tokio::test]
    async fn test_never_exceeds_max_rounds() {
        let registry = registry();
        registry.register_with("a", Canned::new("a", "north"));
        registry.register_with("b", Canned::new("b", "south"));

        let result = RunDebateUseCase::new(registry)
            .execute(RunDebateInput::new("Direction?").with_max_rounds(3))
            .await
            .unwrap();

        assert_eq!(result.rounds.len(), 3);
        assert_eq!(result.agreement, 0.0);
    }

    #[tokio::test]
    async fn test_later_rounds_see_previous_arguments() {
        let registry = registry();
        let a = Scripted::new("a", &["tabs"]);
        let b = Scripted::new("b", &["spaces"]);
        registry.register_with("a", a.clone());
        registry.register_with("b", b.clone());

        RunDebateUseCase::new(registry)
            .execute(RunDebateInput::new("Indentation?").with_max_rounds(2))
            .await
            .unwrap();

        let prompts = a.prompts();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], "Indentation?");
        assert!(prompts[1].starts_with("Indentation?\n\nPrevious round responses:"));
        assert!(prompts[1].contains("- a: tabs"));
        assert!(prompts[1].contains("- b: spaces"));
        assert_eq!(b.prompts()[1], prompts[1]);
    }

    #[tokio::test]
    async fn test_digest_is_rebuilt_from_original_prompt() {
        let registry = registry();
        let a = Scripted::new("a", &["one", "two", "three"]);
        registry.register_with("a", a.clone());
        registry.register_with("b", Canned::new("b", "zero"));

        RunDebateUseCase::new(registry)
            .execute(RunDebateInput::new("Count").with_max_rounds(3))
            .await
            .unwrap();

        let third = &a.prompts()[2];
        assert!(third.contains("- a: two"));
        assert!(!third.contains("- a: one"));
        assert_eq!(third.matches("Previous round responses:").count(), 1);
    }

    #[tokio::test]
    async fn test_single_participant_converges_immediately() {
        let registry = registry();
        registry.register_with("solo", Canned::new("solo", "only view"));

        let result = RunDebateUseCase::new(registry)
            .execute(RunDebateInput::new("q"))
            .await
            .unwrap();

        assert_eq!(result.rounds.len(), 1);
        assert_eq!(result.agreement, 1.0);
        assert_eq!(result.participants, vec!["solo"]);
    }

    #[tokio::test]
    async fn test_round_events_follow_each_round() {
        let registry = registry();
        registry.register_with("a", Canned::new("a", "x"));
        registry.register_with("b", Canned::new("b", "y"));
        let listener = RecordingListener::default();

        RunDebateUseCase::new(registry)
            .execute_with_progress(RunDebateInput::new("q").with_max_rounds(2), &listener)
            .await
            .unwrap();

        let events = listener.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], OrchestraEvent::DebateRound(round) if round.round == 2));
    }

    #[tokio::test]
    async fn test_failure_aborts_debate() {
        let registry = registry();
        registry.register_with("a", Canned::new("a", "x"));
        registry.register_with("down", Failing::new("down"));

        let error = RunDebateUseCase::new(registry)
            .execute(RunDebateInput::new("q"))
            .await
            .unwrap_err();
        assert_eq!(error.failed_provider(), Some("down"));
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let registry = registry();
        registry.register_with("a", Canned::new("a", "x"));
        let use_case = RunDebateUseCase::new(registry);

        assert!(matches!(
            use_case
                .execute(RunDebateInput::new("q").with_max_rounds(0))
                .await,
            Err(OrchestraError::Config(DomainError::InvalidMaxRounds))
        ));
        assert!(matches!(
            use_case
                .execute(RunDebateInput::new("q").with_threshold(1.5))
                .await,
            Err(OrchestraError::Config(DomainError::InvalidThreshold(_)))
        ));
    }

    #[tokio::test]
    async fn test_no_participants() {
        assert!(matches!(
            RunDebateUseCase::new(registry())
                .execute(RunDebateInput::new("q"))
                .await,
            Err(OrchestraError::NoProviders)
        ));
    }
}
