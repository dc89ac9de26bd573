//! Remote client implementations for the LinkedIn MCP gateway.
//!
//! Provides:
//! - `HttpConnector` - JSON-over-HTTP client for a LinkedIn REST bridge
//! - `MockConnector` - In-process client with canned data and call recording

pub mod http;
pub mod mock;

pub use http::{HttpClient, HttpConnector};
pub use mock::{MockClient, MockConnector, RemoteCall};
