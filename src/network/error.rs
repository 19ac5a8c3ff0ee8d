//! Typed errors for network operations.

use std::error::Error as StdError;
use std::io;
use thiserror::Error;

use crate::error::BoxError;

/// Errors that can occur while performing a network request
#[derive(Error, Debug)]
pub enum NetworkError {
  /// The endpoint could not produce a valid target URL
  #[error("Invalid request URL")]
  InvalidUrl,

  /// The server answered successfully but sent no body
  #[error("No data received from server")]
  NoData,

  /// The response body did not match the expected shape
  #[error("Failed to decode server response")]
  DecodingFailed,

  /// The device is not connected to a network
  #[error("Not connected to the internet")]
  InternetNotConnected,

  /// Non-2xx HTTP status, or a transport error carrying one
  #[error("Server error (status {0})")]
  ServerError(u16),

  #[error("Unknown network error")]
  Unknown(#[source] BoxError),
}

impl NetworkError {
  /// Classify a transport-level failure from the HTTP client.
  pub fn from_transport(error: reqwest::Error) -> Self {
    if let Some(status) = error.status() {
      return NetworkError::ServerError(status.as_u16());
    }

    if error.is_connect() && is_offline(&error) {
      return NetworkError::InternetNotConnected;
    }

    NetworkError::Unknown(Box::new(error))
  }
}

/// Walk an error chain looking for an I/O cause that means "no network".
///
/// Resolver failures do not count; a nonexistent host on a working
/// connection is not an offline device.
fn is_offline(error: &(dyn StdError + 'static)) -> bool {
  let mut current = Some(error);

  while let Some(cause) = current {
    if let Some(io_error) = cause.downcast_ref::<io::Error>() {
      if matches!(
        io_error.kind(),
        io::ErrorKind::NetworkUnreachable
          | io::ErrorKind::NetworkDown
          | io::ErrorKind::HostUnreachable
      ) {
        return true;
      }
    }

    current = cause.source();
  }

  false
}
