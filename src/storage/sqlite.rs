//! SQLite-backed planet storage.

use rusqlite::{params, Connection};
use tracing::{debug, warn};

use super::error::{StorageError, StorageResult};
use super::traits::PlanetStorage;
use crate::db::Database;
use crate::planet::types::Planet;

/// SQLite-based planet storage over a shared [`Database`] handle.
///
/// Each call holds the database lock for its whole duration, so the
/// existence check and insert in [`save_planets`](PlanetStorage::save_planets)
/// cannot interleave with another caller.
#[derive(Clone)]
pub struct SqliteStorage {
  db: Database,
}

impl SqliteStorage {
  pub fn new(db: Database) -> Self {
    Self { db }
  }
}

fn exists_in(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
  conn.query_row(
    "SELECT EXISTS(SELECT 1 FROM planets WHERE name = ? LIMIT 1)",
    params![name],
    |row| row.get(0),
  )
}

impl PlanetStorage for SqliteStorage {
  fn fetch_planets(&self) -> StorageResult<Vec<Planet>> {
    let conn = self.db.lock();

    let mut stmt = conn
      .prepare("SELECT name FROM planets ORDER BY id")
      .map_err(StorageError::fetch)?;

    let planets = stmt
      .query_map([], |row| row.get::<_, String>(0))
      .map_err(StorageError::fetch)?
      .map(|name| name.map(Planet::new))
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(|e| {
        warn!(error = %e, "Failed to fetch planets");
        StorageError::fetch(e)
      })?;

    Ok(planets)
  }

  fn save_planets(&self, planets: &[Planet]) -> StorageResult<()> {
    let mut conn = self.db.lock();

    // Dropping the transaction without commit rolls it back
    let tx = conn.transaction().map_err(StorageError::save)?;

    let mut inserted = 0usize;
    for planet in planets {
      let name = planet.name();
      if name.is_empty() {
        debug!("Skipping a planet with an empty name");
        continue;
      }

      if exists_in(&tx, name).map_err(StorageError::save)? {
        continue;
      }

      tx.execute("INSERT INTO planets (name) VALUES (?)", params![name])
        .map_err(StorageError::save)?;
      inserted += 1;
    }

    tx.commit().map_err(|e| {
      warn!(error = %e, "Failed to save planets");
      StorageError::save(e)
    })?;

    debug!(inserted, offered = planets.len(), "Saved planets");
    Ok(())
  }

  fn planet_exists(&self, name: &str) -> bool {
    let conn = self.db.lock();

    exists_in(&conn, name).unwrap_or_else(|e| {
      warn!(error = %e, name, "Error checking for existing planet");
      false
    })
  }
}
