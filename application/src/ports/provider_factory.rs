//! Provider factory port

use super::provider::Provider;
use orchestra_domain::{DomainError, ProviderConfig};
use std::sync::Arc;

/// Builds a live provider from its configuration.
///
/// Called synchronously at registration time, so configuration errors
/// (such as a missing API key) surface from `register`/`add_provider`.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, name: &str, config: &ProviderConfig)
    -> Result<Arc<dyn Provider>, DomainError>;
}
