//! Request/response tracing. Observes only; never alters a request or result.

use tracing::debug;

pub fn log_request(request: &reqwest::Request) {
  let headers: Vec<String> = request
    .headers()
    .iter()
    .map(|(name, value)| {
      if *name == reqwest::header::AUTHORIZATION {
        format!("{}: <redacted>", name)
      } else {
        format!("{}: {}", name, value.to_str().unwrap_or("<binary>"))
      }
    })
    .collect();

  let body = request
    .body()
    .and_then(|b| b.as_bytes())
    .map(String::from_utf8_lossy);

  debug!(
    method = %request.method(),
    url = %request.url(),
    headers = ?headers,
    body = body.as_deref().unwrap_or(""),
    "Sending request"
  );
}

pub fn log_response(status: reqwest::StatusCode, body: &[u8]) {
  debug!(
    status = status.as_u16(),
    body = %String::from_utf8_lossy(body),
    "Received response"
  );
}
