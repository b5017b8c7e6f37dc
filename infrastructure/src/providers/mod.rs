//! Provider adapters
//!
//! Concrete [`Provider`](orchestra_application::Provider) implementations and
//! the factory that builds them from configuration.

mod factory;
mod http;
mod scripted;

pub use factory::DefaultProviderFactory;
pub use http::{ApiFlavor, HttpProvider};
pub use scripted::ScriptedProvider;
