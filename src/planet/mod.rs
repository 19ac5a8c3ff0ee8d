pub mod api_types;
pub mod repository;
pub mod types;

pub use repository::PlanetRepository;
pub use types::{NewPlanet, Planet};
