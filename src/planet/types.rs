use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A named planet.
///
/// Identity is the name alone (case-sensitive). The `id` exists only so list
/// renderers have a stable row key; it is never serialized or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
  #[serde(skip, default = "Uuid::new_v4")]
  id: Uuid,
  name: String,
}

impl Planet {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      id: Uuid::new_v4(),
      name: name.into(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn id(&self) -> Uuid {
    self.id
  }
}

impl PartialEq for Planet {
  fn eq(&self, other: &Self) -> bool {
    self.name == other.name
  }
}

impl Eq for Planet {}

impl Hash for Planet {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.name.hash(state);
  }
}

/// Body of a create-planet request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPlanet {
  pub name: String,
}
