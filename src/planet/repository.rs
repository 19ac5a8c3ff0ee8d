//! Planet repository that orchestrates cache reads with network fetching.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::api_types::ApiPlanetsResponse;
use super::types::{NewPlanet, Planet};
use crate::network::{ApiEndpoint, NetworkError, NetworkService, RequestConfiguration};
use crate::storage::PlanetStorage;

/// Planet repository with transparent read-through caching.
///
/// Collaborators only see this type; the network client and storage are
/// injected and never exposed.
pub struct PlanetRepository<N, S> {
  network: Arc<N>,
  storage: Arc<S>,
  /// Header override for every request (e.g. bearer auth)
  headers: Option<BTreeMap<String, String>>,
}

impl<N, S> PlanetRepository<N, S>
where
  N: NetworkService,
  S: PlanetStorage + 'static,
{
  pub fn new(network: Arc<N>, storage: Arc<S>) -> Self {
    Self {
      network,
      storage,
      headers: None,
    }
  }

  /// Send `headers` instead of the defaults on every request.
  pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
    self.headers = Some(headers);
    self
  }

  /// Fetch all planets, cache first.
  ///
  /// 1. Non-empty cache - return it, no network call
  /// 2. Empty cache or cache read failure - fetch from network
  /// 3. Network success - write back to cache in the background, return data
  /// 4. Network failure - return the network error
  ///
  /// An empty cache is treated like a failed read, so an empty remote list is
  /// never cached as "confirmed empty" and every call goes back to the network.
  ///
  /// The cache read is synchronous and runs on the calling task. It may wait
  /// on the database lock while an earlier write-back is still committing.
  pub async fn fetch_planets(&self) -> Result<Vec<Planet>, NetworkError> {
    match self.storage.fetch_planets() {
      Ok(cached) if !cached.is_empty() => {
        debug!(count = cached.len(), "Serving planets from cache");
        return Ok(cached);
      }
      Ok(_) => debug!("Planet cache is empty, fetching from network"),
      Err(e) => warn!(error = ?e, "Planet cache read failed, fetching from network"),
    }

    let response: ApiPlanetsResponse = self
      .network
      .request(&self.request(ApiEndpoint::GetPlanets))
      .await
      .map_err(|e| {
        warn!(error = ?e, "Failed to fetch planets");
        e
      })?;

    let planets = response.into_planets();
    // Fire and forget; the result never depends on the cache write
    self.store_in_background(planets.clone());

    Ok(planets)
  }

  /// Whether a planet with exactly this name is cached.
  pub fn planet_exists(&self, name: &str) -> bool {
    self.storage.planet_exists(name)
  }

  /// Search planets by name (not cached - results depend on the query).
  pub async fn search_planets(&self, query: &str) -> Result<Vec<Planet>, NetworkError> {
    let endpoint = ApiEndpoint::SearchPlanets {
      query: query.to_string(),
    };

    let response: ApiPlanetsResponse = self.network.request(&self.request(endpoint)).await?;
    Ok(response.into_planets())
  }

  /// Create a planet on the server (not cached - write operation).
  pub async fn create_planet(&self, name: &str) -> Result<Planet, NetworkError> {
    let endpoint = ApiEndpoint::CreatePlanet(NewPlanet {
      name: name.to_string(),
    });

    self.network.request(&self.request(endpoint)).await
  }

  fn request(&self, endpoint: ApiEndpoint) -> RequestConfiguration {
    let config = RequestConfiguration::new(endpoint);
    match &self.headers {
      Some(headers) => config.with_headers(headers.clone()),
      None => config,
    }
  }

  /// Write planets to the cache on tokio's blocking pool.
  ///
  /// Outside a tokio runtime the write runs inline instead. Its outcome is
  /// only logged either way.
  fn store_in_background(&self, planets: Vec<Planet>) {
    let storage = Arc::clone(&self.storage);
    let store = move || match storage.save_planets(&planets) {
      Ok(()) => debug!(count = planets.len(), "Cached planets"),
      Err(e) => warn!(error = ?e, "Failed to cache planets"),
    };

    match tokio::runtime::Handle::try_current() {
      Ok(handle) => {
        handle.spawn_blocking(store);
      }
      Err(_) => store(),
    }
  }
}

impl<N, S> Clone for PlanetRepository<N, S> {
  fn clone(&self) -> Self {
    Self {
      network: Arc::clone(&self.network),
      storage: Arc::clone(&self.storage),
      headers: self.headers.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::Database;
  use crate::network::headers;
  use crate::storage::{NoopStorage, SqliteStorage, StorageError, StorageResult};
  use async_trait::async_trait;
  use serde::de::DeserializeOwned;
  use serde_json::{json, Value};
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Mutex;
  use std::time::Duration;

  enum Reply {
    Json(Value),
    Fail(fn() -> NetworkError),
  }

  struct MockNetwork {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<RequestConfiguration>>,
  }

  impl MockNetwork {
    fn json(value: Value) -> Arc<Self> {
      Arc::new(Self {
        reply: Reply::Json(value),
        calls: AtomicUsize::new(0),
        last_request: Mutex::new(None),
      })
    }

    fn failing(error: fn() -> NetworkError) -> Arc<Self> {
      Arc::new(Self {
        reply: Reply::Fail(error),
        calls: AtomicUsize::new(0),
        last_request: Mutex::new(None),
      })
    }

    fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> RequestConfiguration {
      self.last_request.lock().unwrap().clone().unwrap()
    }
  }

  #[async_trait]
  impl NetworkService for MockNetwork {
    async fn request<T>(&self, config: &RequestConfiguration) -> Result<T, NetworkError>
    where
      T: DeserializeOwned + Send + 'static,
    {
      self.calls.fetch_add(1, Ordering::SeqCst);
      *self.last_request.lock().unwrap() = Some(config.clone());

      match &self.reply {
        Reply::Json(value) => {
          serde_json::from_value(value.clone()).map_err(|_| NetworkError::DecodingFailed)
        }
        Reply::Fail(error) => Err(error()),
      }
    }
  }

  #[derive(Default)]
  struct MockStorage {
    planets: Mutex<Vec<Planet>>,
    fail_fetch: bool,
    fail_save: bool,
    save_calls: AtomicUsize,
  }

  impl PlanetStorage for MockStorage {
    fn fetch_planets(&self) -> StorageResult<Vec<Planet>> {
      if self.fail_fetch {
        return Err(StorageError::fetch("database is locked"));
      }
      Ok(self.planets.lock().unwrap().clone())
    }

    fn save_planets(&self, planets: &[Planet]) -> StorageResult<()> {
      self.save_calls.fetch_add(1, Ordering::SeqCst);
      if self.fail_save {
        return Err(StorageError::save("disk full"));
      }
      self.planets.lock().unwrap().extend_from_slice(planets);
      Ok(())
    }

    fn planet_exists(&self, name: &str) -> bool {
      self.planets.lock().unwrap().iter().any(|p| p.name() == name)
    }
  }

  fn sqlite() -> Arc<SqliteStorage> {
    Arc::new(SqliteStorage::new(Database::open_in_memory().unwrap()))
  }

  fn names(planets: &[Planet]) -> Vec<&str> {
    planets.iter().map(Planet::name).collect()
  }

  /// Poll `check` until it holds, for background writes to land.
  async fn eventually(check: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
      if check() {
        return true;
      }
      tokio::time::sleep(Duration::from_millis(5)).await;
    }
    false
  }

  #[tokio::test]
  async fn test_cache_hit_skips_network() {
    let storage = sqlite();
    storage.save_planets(&[Planet::new("Earth")]).unwrap();
    let network = MockNetwork::failing(|| NetworkError::InternetNotConnected);

    let repo = PlanetRepository::new(Arc::clone(&network), storage);
    let planets = repo.fetch_planets().await.unwrap();

    assert_eq!(names(&planets), vec!["Earth"]);
    assert_eq!(network.calls(), 0);
  }

  #[tokio::test]
  async fn test_empty_cache_falls_back_to_network_and_writes_back() {
    let storage = sqlite();
    let network = MockNetwork::json(json!({
      "results": [{ "name": "Venus" }, { "name": "Jupiter" }]
    }));

    let repo = PlanetRepository::new(Arc::clone(&network), Arc::clone(&storage));
    let planets = repo.fetch_planets().await.unwrap();

    assert_eq!(names(&planets), vec!["Venus", "Jupiter"]);
    assert_eq!(network.calls(), 1);
    assert_eq!(network.last_request().endpoint(), &ApiEndpoint::GetPlanets);

    assert!(eventually(|| storage.planet_exists("Venus") && storage.planet_exists("Jupiter")).await);

    // Second call is served from cache
    let planets = repo.fetch_planets().await.unwrap();
    assert_eq!(planets.len(), 2);
    assert_eq!(network.calls(), 1);
  }

  #[tokio::test]
  async fn test_cache_read_failure_falls_back_to_network() {
    let storage = Arc::new(MockStorage {
      fail_fetch: true,
      ..Default::default()
    });
    let network = MockNetwork::json(json!({ "results": [{ "name": "Hoth" }] }));

    let repo = PlanetRepository::new(Arc::clone(&network), storage);
    let planets = repo.fetch_planets().await.unwrap();

    assert_eq!(planets, vec![Planet::new("Hoth")]);
    assert_eq!(network.calls(), 1);
  }

  #[tokio::test]
  async fn test_network_failure_surfaces() {
    let network = MockNetwork::failing(|| NetworkError::InternetNotConnected);
    let repo = PlanetRepository::new(network, sqlite());

    let result = repo.fetch_planets().await;
    assert!(matches!(result, Err(NetworkError::InternetNotConnected)));
  }

  #[tokio::test]
  async fn test_server_error_surfaces_unchanged() {
    let network = MockNetwork::failing(|| NetworkError::ServerError(503));
    let repo = PlanetRepository::new(network, sqlite());

    let result = repo.fetch_planets().await;
    assert!(matches!(result, Err(NetworkError::ServerError(503))));
  }

  #[tokio::test]
  async fn test_write_back_failure_is_swallowed() {
    let storage = Arc::new(MockStorage {
      fail_save: true,
      ..Default::default()
    });
    let network = MockNetwork::json(json!({ "results": [{ "name": "Naboo" }] }));

    let repo = PlanetRepository::new(network, Arc::clone(&storage));
    let planets = repo.fetch_planets().await.unwrap();

    assert_eq!(names(&planets), vec!["Naboo"]);
    assert!(eventually(|| storage.save_calls.load(Ordering::SeqCst) == 1).await);
  }

  #[test]
  fn test_fetch_without_tokio_runtime() {
    let storage = sqlite();
    let network = MockNetwork::json(json!({ "results": [{ "name": "Tatooine" }] }));
    let repo = PlanetRepository::new(network, Arc::clone(&storage));

    let planets = futures::executor::block_on(repo.fetch_planets()).unwrap();

    assert_eq!(names(&planets), vec!["Tatooine"]);
    // Written inline, so it is visible immediately
    assert!(storage.planet_exists("Tatooine"));
  }

  #[test]
  fn test_inline_write_back_failure_is_swallowed() {
    let storage = Arc::new(MockStorage {
      fail_save: true,
      ..Default::default()
    });
    let network = MockNetwork::json(json!({ "results": [{ "name": "Naboo" }] }));
    let repo = PlanetRepository::new(network, Arc::clone(&storage));

    let planets = futures::executor::block_on(repo.fetch_planets()).unwrap();

    assert_eq!(names(&planets), vec!["Naboo"]);
    assert_eq!(storage.save_calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_empty_remote_list_is_refetched() {
    let network = MockNetwork::json(json!({ "results": [] }));
    let repo = PlanetRepository::new(Arc::clone(&network), sqlite());

    assert!(repo.fetch_planets().await.unwrap().is_empty());
    assert!(repo.fetch_planets().await.unwrap().is_empty());
    assert_eq!(network.calls(), 2);
  }

  #[tokio::test]
  async fn test_noop_storage_always_hits_network() {
    let network = MockNetwork::json(json!({ "results": [{ "name": "Kamino" }] }));
    let repo = PlanetRepository::new(Arc::clone(&network), Arc::new(NoopStorage));

    repo.fetch_planets().await.unwrap();
    repo.fetch_planets().await.unwrap();
    assert_eq!(network.calls(), 2);
    assert!(!repo.planet_exists("Kamino"));
  }

  #[tokio::test]
  async fn test_concurrent_fetches_run_independently() {
    let network = MockNetwork::json(json!({ "results": [{ "name": "Endor" }] }));
    let repo = PlanetRepository::new(Arc::clone(&network), Arc::new(NoopStorage));

    let (a, b) = futures::future::join(repo.fetch_planets(), repo.fetch_planets()).await;
    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(network.calls(), 2);
  }

  #[tokio::test]
  async fn test_planet_exists_passthrough() {
    let storage = sqlite();
    storage.save_planets(&[Planet::new("Earth")]).unwrap();
    let repo = PlanetRepository::new(MockNetwork::json(json!({})), storage);

    assert!(repo.planet_exists("Earth"));
    assert!(!repo.planet_exists("Mars"));
  }

  #[tokio::test]
  async fn test_search_bypasses_cache() {
    let storage = sqlite();
    storage.save_planets(&[Planet::new("Earth")]).unwrap();
    let network = MockNetwork::json(json!({ "results": [{ "name": "Yavin IV" }] }));

    let repo = PlanetRepository::new(Arc::clone(&network), Arc::clone(&storage));
    let planets = repo.search_planets("yavin").await.unwrap();

    assert_eq!(names(&planets), vec!["Yavin IV"]);
    assert_eq!(
      network.last_request().endpoint(),
      &ApiEndpoint::SearchPlanets {
        query: "yavin".to_string()
      }
    );
    assert!(!storage.planet_exists("Yavin IV"));
  }

  #[tokio::test]
  async fn test_create_planet_is_not_cached() {
    let storage = sqlite();
    let network = MockNetwork::json(json!({ "name": "Dagobah" }));

    let repo = PlanetRepository::new(Arc::clone(&network), Arc::clone(&storage));
    let created = repo.create_planet("Dagobah").await.unwrap();

    assert_eq!(created.name(), "Dagobah");
    let request = network.last_request();
    assert_eq!(
      request.endpoint(),
      &ApiEndpoint::CreatePlanet(NewPlanet {
        name: "Dagobah".to_string()
      })
    );
    assert!(request.body().is_some());
    assert!(!storage.planet_exists("Dagobah"));
  }

  #[tokio::test]
  async fn test_custom_headers_are_sent() {
    let network = MockNetwork::json(json!({ "results": [{ "name": "Bespin" }] }));
    let repo = PlanetRepository::new(Arc::clone(&network), Arc::new(NoopStorage))
      .with_headers(headers::with_auth("tok"));

    repo.fetch_planets().await.unwrap();
    assert_eq!(
      network.last_request().headers()["Authorization"],
      "Bearer tok"
    );
  }
}
