use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::NetworkError;
use super::logger;
use super::request::RequestConfiguration;

/// Performs one typed HTTP request per call.
#[async_trait]
pub trait NetworkService: Send + Sync {
  /// Send the request described by `config` and decode the response body as `T`.
  async fn request<T>(&self, config: &RequestConfiguration) -> Result<T, NetworkError>
  where
    T: DeserializeOwned + Send + 'static;
}

/// reqwest-backed network client
#[derive(Clone)]
pub struct HttpClient {
  client: reqwest::Client,
  base_url: String,
}

impl HttpClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = reqwest::Client::builder()
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self::with_client(client, base_url))
  }

  /// Use an already configured reqwest client.
  pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
    Self {
      client,
      base_url: base_url.into(),
    }
  }

  fn build_request(&self, config: &RequestConfiguration) -> Result<reqwest::Request, NetworkError> {
    let endpoint = config.endpoint();
    let url = endpoint.url(&self.base_url)?;

    let mut builder = self.client.request(endpoint.method().into(), url);
    for (name, value) in config.headers() {
      builder = builder.header(name, value);
    }
    if let Some(body) = config.body() {
      builder = builder.body(body.to_vec());
    }

    builder
      .build()
      .map_err(|e| NetworkError::Unknown(Box::new(e)))
  }
}

#[async_trait]
impl NetworkService for HttpClient {
  async fn request<T>(&self, config: &RequestConfiguration) -> Result<T, NetworkError>
  where
    T: DeserializeOwned + Send + 'static,
  {
    let request = self.build_request(config)?;
    logger::log_request(&request);

    let response = self
      .client
      .execute(request)
      .await
      .map_err(NetworkError::from_transport)?;

    let status = response.status();
    if !status.is_success() {
      // Body is read only for logging
      let body = response.bytes().await.unwrap_or_default();
      logger::log_response(status, &body);
      return Err(NetworkError::ServerError(status.as_u16()));
    }

    let body = response
      .bytes()
      .await
      .map_err(NetworkError::from_transport)?;
    logger::log_response(status, &body);

    decode(&body)
  }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, NetworkError> {
  if body.is_empty() {
    return Err(NetworkError::NoData);
  }

  serde_json::from_slice(body).map_err(|e| {
    debug!(error = %e, "Response body did not match expected shape");
    NetworkError::DecodingFailed
  })
}
