use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use planets::config::Config;
use planets::db::Database;
use planets::network::{headers, HttpClient};
use planets::storage::{NoopStorage, PlanetStorage, SqliteStorage};
use planets::{logging, PlanetRepository};

#[derive(Parser, Debug)]
#[command(name = "planets")]
#[command(about = "List planets from the planets API, with a local cache")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/planets/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Override the API base URL
  #[arg(long)]
  base_url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List all planets (cached after the first fetch)
  List,
  /// Check whether a planet is in the local cache
  Exists { name: String },
  /// Search planets by name on the server
  Search { query: String },
  /// Create a planet on the server
  Create { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let mut config = Config::load(args.config.as_deref())?;
  if let Some(base_url) = args.base_url {
    config.api.base_url = base_url;
  }

  let _log_guard = logging::init(&config)?;
  info!(base_url = %config.api.base_url, cache = config.cache.enabled, "Starting planets");

  let network = Arc::new(HttpClient::new(config.api.base_url.clone())?);

  if config.cache.enabled {
    // One database handle for the whole process
    let db = Database::open(&config.cache.database_path()?)?;
    run(network, Arc::new(SqliteStorage::new(db)), args.command).await
  } else {
    run(network, Arc::new(NoopStorage), args.command).await
  }
}

async fn run<S: PlanetStorage + 'static>(
  network: Arc<HttpClient>,
  storage: Arc<S>,
  command: Command,
) -> Result<()> {
  let mut repository = PlanetRepository::new(network, storage);
  if let Some(token) = Config::get_api_token() {
    repository = repository.with_headers(headers::with_auth(&token));
  }

  match command {
    Command::List => {
      for planet in repository.fetch_planets().await? {
        println!("{}", planet.name());
      }
    }
    Command::Exists { name } => {
      let exists = repository.planet_exists(&name);
      println!("{}", if exists { "yes" } else { "no" });
    }
    Command::Search { query } => {
      for planet in repository.search_planets(&query).await? {
        println!("{}", planet.name());
      }
    }
    Command::Create { name } => {
      let planet = repository.create_planet(&name).await?;
      println!("Created {}", planet.name());
    }
  }

  Ok(())
}
