use std::collections::BTreeMap;

use super::endpoint::ApiEndpoint;
use super::headers;

/// Everything needed to perform one HTTP call.
#[derive(Debug, Clone)]
pub struct RequestConfiguration {
  endpoint: ApiEndpoint,
  headers: Option<BTreeMap<String, String>>,
  body: Option<Vec<u8>>,
}

impl RequestConfiguration {
  /// Create a configuration for `endpoint`, using the endpoint's own body.
  pub fn new(endpoint: ApiEndpoint) -> Self {
    let body = endpoint.body();
    Self {
      endpoint,
      headers: None,
      body,
    }
  }

  /// Replace the default headers.
  pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
    self.headers = Some(headers);
    self
  }

  /// Replace the request body.
  pub fn with_body(mut self, body: Vec<u8>) -> Self {
    self.body = Some(body);
    self
  }

  pub fn endpoint(&self) -> &ApiEndpoint {
    &self.endpoint
  }

  /// Headers to send: the caller's, or [`headers::common`] when none were given.
  pub fn headers(&self) -> BTreeMap<String, String> {
    self.headers.clone().unwrap_or_else(headers::common)
  }

  pub fn body(&self) -> Option<&[u8]> {
    self.body.as_deref()
  }
}
