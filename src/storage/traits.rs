//! Storage trait and the no-op backend.

use super::error::StorageResult;
use crate::planet::types::Planet;

/// Trait for planet storage backends.
///
/// All operations are synchronous and each runs as one unit against the
/// underlying store.
pub trait PlanetStorage: Send + Sync {
  /// Get every stored planet. Order is not meaningful.
  fn fetch_planets(&self) -> StorageResult<Vec<Planet>>;

  /// Store planets, skipping empty names and names already present.
  fn save_planets(&self, planets: &[Planet]) -> StorageResult<()>;

  /// Whether a planet with exactly this name is stored.
  ///
  /// Read failures yield `false`.
  fn planet_exists(&self, name: &str) -> bool;
}

/// Storage implementation that doesn't cache anything.
/// Used when caching is disabled - all operations are no-ops.
pub struct NoopStorage;

impl PlanetStorage for NoopStorage {
  fn fetch_planets(&self) -> StorageResult<Vec<Planet>> {
    Ok(Vec::new()) // Always miss
  }

  fn save_planets(&self, _planets: &[Planet]) -> StorageResult<()> {
    Ok(()) // Discard
  }

  fn planet_exists(&self, _name: &str) -> bool {
    false
  }
}
