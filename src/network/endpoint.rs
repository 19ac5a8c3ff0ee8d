//! API endpoints and URL construction.

use url::Url;

use super::error::NetworkError;
use crate::planet::types::NewPlanet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Delete,
  Patch,
}

impl From<HttpMethod> for reqwest::Method {
  fn from(method: HttpMethod) -> Self {
    match method {
      HttpMethod::Get => reqwest::Method::GET,
      HttpMethod::Post => reqwest::Method::POST,
      HttpMethod::Put => reqwest::Method::PUT,
      HttpMethod::Delete => reqwest::Method::DELETE,
      HttpMethod::Patch => reqwest::Method::PATCH,
    }
  }
}

/// Endpoints of the planets API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEndpoint {
  /// List all planets
  GetPlanets,
  /// Create a planet
  CreatePlanet(NewPlanet),
  /// Search planets by name
  SearchPlanets { query: String },
}

impl ApiEndpoint {
  pub fn path(&self) -> &'static str {
    match self {
      Self::GetPlanets | Self::CreatePlanet(_) | Self::SearchPlanets { .. } => "/planets",
    }
  }

  pub fn method(&self) -> HttpMethod {
    match self {
      Self::GetPlanets | Self::SearchPlanets { .. } => HttpMethod::Get,
      Self::CreatePlanet(_) => HttpMethod::Post,
    }
  }

  pub fn query(&self) -> Vec<(&'static str, &str)> {
    match self {
      Self::SearchPlanets { query } => vec![("search", query.as_str())],
      _ => Vec::new(),
    }
  }

  /// Default JSON body for the endpoint, if it has one.
  pub fn body(&self) -> Option<Vec<u8>> {
    match self {
      Self::CreatePlanet(data) => serde_json::to_vec(data).ok(),
      _ => None,
    }
  }

  /// Build the full URL for this endpoint under `base_url`.
  ///
  /// Fails with [`NetworkError::InvalidUrl`] when the base does not parse or
  /// is not an http(s) URL.
  pub fn url(&self, base_url: &str) -> Result<Url, NetworkError> {
    let base = base_url.trim_end_matches('/');
    let mut url =
      Url::parse(&format!("{}{}", base, self.path())).map_err(|_| NetworkError::InvalidUrl)?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
      return Err(NetworkError::InvalidUrl);
    }

    let query = self.query();
    if !query.is_empty() {
      url.query_pairs_mut().extend_pairs(query);
    }

    Ok(url)
  }
}
