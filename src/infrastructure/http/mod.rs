//! HTTP delivery of the login request.
//!
//! Provides a [`LoginTransport`] trait with a reqwest-backed
//! implementation, [`HttpTransport`].

mod reqwest_transport;
mod transport;

pub use reqwest_transport::HttpTransport;
pub use transport::{LoginTransport, TransportError, TransportResult};

#[cfg(test)]
pub use transport::MockLoginTransport;
