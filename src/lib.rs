//! Planet data access: a reqwest network client, a SQLite read-through cache,
//! and the repository that decides between them.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod network;
pub mod planet;
pub mod storage;

pub use planet::{Planet, PlanetRepository};
