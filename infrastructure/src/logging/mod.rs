//! Logging infrastructure: event transcripts and tracing output.
//!
//! Provides [`JsonlEventLogger`], a JSONL file writer, and
//! [`TracingEventListener`], which forwards events to `tracing`. Both
//! implement the [`EventListener`](orchestra_application::EventListener) port.

mod jsonl_logger;
mod tracing_listener;

pub use jsonl_logger::JsonlEventLogger;
pub use tracing_listener::TracingEventListener;
