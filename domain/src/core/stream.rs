//! Streaming events for provider output.

use super::response::Response;

/// An event in a streaming provider response.
///
/// Providers that cannot stream emit a single `Completed` event carrying the
/// full response.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// A text chunk from the provider.
    Delta(String),
    /// The complete response (signals stream end).
    Completed(Response),
    /// An error that occurred during streaming.
    Error(String),
}

impl StreamEvent {
    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}
