//! Types shared by the network and storage error taxonomies.

/// Boxed underlying cause carried by error variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
