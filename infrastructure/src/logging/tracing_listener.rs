use orchestra_application::EventListener;
use orchestra_domain::OrchestraEvent;
use tracing::{debug, info};

/// Forwards orchestration events to `tracing`.
pub struct TracingEventListener;

impl EventListener for TracingEventListener {
    fn on_event(&self, event: &OrchestraEvent) {
        match event {
            OrchestraEvent::Initialized {
                providers,
                default_provider,
            } => info!(
                providers = ?providers,
                default_provider = default_provider.as_deref().unwrap_or("-"),
                "Orchestra initialized"
            ),
            OrchestraEvent::ConsensusStart { providers, .. } => {
                info!(providers = ?providers, "Consensus started")
            }
            OrchestraEvent::ConsensusComplete { result } => info!(
                agreement = result.agreement,
                confidence = result.confidence,
                dissenting = result.dissent_count(),
                "Consensus complete"
            ),
            OrchestraEvent::DebateStart {
                providers,
                threshold,
                max_rounds,
                ..
            } => info!(
                providers = ?providers,
                threshold,
                max_rounds,
                "Debate started"
            ),
            OrchestraEvent::DebateRound(round) => info!(
                round = round.round,
                agreement = round.agreement,
                arguments = round.arguments.len(),
                "Debate round finished"
            ),
            OrchestraEvent::DebateComplete { result } => info!(
                rounds = result.round_count(),
                agreement = result.agreement,
                converged = result.converged,
                "Debate complete"
            ),
            OrchestraEvent::ProviderAdded { name } => debug!(provider = %name, "Provider added"),
            OrchestraEvent::ProviderRemoved { name } => {
                debug!(provider = %name, "Provider removed")
            }
        }
    }
}
