//! Serde-deserializable types matching the planets API responses.
//!
//! These types are separate from domain types so the wire shape can change
//! without touching [`Planet`].

use serde::Deserialize;

use super::types::Planet;

#[derive(Debug, Deserialize)]
pub struct ApiPlanet {
  pub name: String,
}

/// List/search endpoint response. Fields other than `results` are ignored.
#[derive(Debug, Deserialize)]
pub struct ApiPlanetsResponse {
  pub results: Vec<ApiPlanet>,
}

impl From<ApiPlanet> for Planet {
  fn from(api: ApiPlanet) -> Self {
    Planet::new(api.name)
  }
}

impl ApiPlanetsResponse {
  pub fn into_planets(self) -> Vec<Planet> {
    self.results.into_iter().map(Planet::from).collect()
  }
}
