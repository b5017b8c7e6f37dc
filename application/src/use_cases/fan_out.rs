//! Parallel dispatch of one prompt to a set of providers.
//!
//! All calls are issued together on the current task and joined with
//! all-or-nothing semantics: the first failure to settle aborts the whole
//! fan-out and the calls still in flight are dropped. Responses come back in
//! participant order, never in arrival order.

use crate::error::OrchestraError;
use crate::ports::provider::CompletionOptions;
use crate::registry::Participant;
use futures::future::try_join_all;
use orchestra_domain::Response;
use std::time::Instant;
use tracing::{debug, info, warn};

pub async fn fan_out(
    participants: &[Participant],
    prompt: &str,
    options: &CompletionOptions,
) -> Result<Vec<Response>, OrchestraError> {
    info!("Dispatching prompt to {} providers", participants.len());

    let calls = participants.iter().map(|participant| async move {
        let started = Instant::now();
        match participant.provider.complete(prompt, options).await {
            Ok(mut response) => {
                if response.latency_ms.is_none() {
                    response.latency_ms = Some(started.elapsed().as_millis() as u64);
                }
                debug!("Provider {} responded", participant.name);
                Ok(response)
            }
            Err(source) => {
                warn!("Provider {} failed: {}", participant.name, source);
                Err(OrchestraError::ProviderCall {
                    provider: participant.name.clone(),
                    source,
                })
            }
        }
    });

    try_join_all(calls).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Canned, Failing, Scripted};
    use std::sync::Arc;
    use std::time::Duration;

    fn participant(provider: Arc<dyn crate::ports::provider::Provider>) -> Participant {
        Participant {
            name: provider.name().to_string(),
            provider,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_follows_participants_not_arrival() {
        let participants = vec![
            participant(Scripted::delayed("slow", &["slow answer"], Duration::from_millis(50))),
            participant(Canned::new("fast", "fast answer")),
        ];

        let responses = fan_out(&participants, "q", &CompletionOptions::default())
            .await
            .unwrap();

        assert_eq!(responses[0].provider, "slow");
        assert_eq!(responses[1].provider, "fast");
        assert!(responses.iter().all(|r| r.latency_ms.is_some()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_run_concurrently() {
        let participants: Vec<Participant> = (0..3)
            .map(|i| {
                participant(Scripted::delayed(
                    &format!("p{}", i),
                    &["x"],
                    Duration::from_millis(100),
                ))
            })
            .collect();

        let started = tokio::time::Instant::now();
        fan_out(&participants, "q", &CompletionOptions::default())
            .await
            .unwrap();
        assert!(started.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_one_failure_fails_everything() {
        let participants = vec![
            participant(Canned::new("a", "x")),
            participant(Failing::new("b")),
            participant(Canned::new("c", "x")),
        ];

        let error = fan_out(&participants, "q", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert_eq!(error.failed_provider(), Some("b"));
    }
}
