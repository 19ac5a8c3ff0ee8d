//! Default request headers.

use std::collections::BTreeMap;

/// Headers sent with every request unless the caller overrides them.
pub fn common() -> BTreeMap<String, String> {
  BTreeMap::from([
    ("Content-Type".to_string(), "application/json".to_string()),
    ("Accept".to_string(), "application/json".to_string()),
  ])
}

/// Common headers plus a bearer `Authorization` header.
pub fn with_auth(token: &str) -> BTreeMap<String, String> {
  let mut headers = common();
  headers.insert("Authorization".to_string(), format!("Bearer {}", token));
  headers
}
