//! HTTP access to the planets API.
//!
//! [`NetworkService`] is the seam the repository depends on; [`HttpClient`] is
//! the reqwest implementation. Every failure is reported as a [`NetworkError`].

pub mod client;
pub mod endpoint;
pub mod error;
pub mod headers;
mod logger;
pub mod request;

pub use client::{HttpClient, NetworkService};
pub use endpoint::{ApiEndpoint, HttpMethod};
pub use error::NetworkError;
pub use request::RequestConfiguration;
