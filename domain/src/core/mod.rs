//! Core domain concepts shared across all subdomains.
//!
//! - [`response::Response`]: one provider's answer to one prompt
//! - [`stream::StreamEvent`]: incremental output of a streaming call
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod response;
pub mod stream;
