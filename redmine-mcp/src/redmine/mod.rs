//! Access to the Redmine REST API
//!
//! The [`client::RedmineClient`] exposes one method per supported operation
//! and talks to the service through a [`transport::RedmineTransport`].

pub mod client;
pub mod mock_transport;
pub mod transport;
pub mod types;

pub use client::RedmineClient;
pub use mock_transport::{MockResponse, MockTransport};
pub use transport::{HttpTransport, RedmineTransport, RemoteRequest};
