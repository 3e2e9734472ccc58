//! Error types for the reconciler
//!
//! Per-answer problems are never errors here; they are reported inside the
//! validation results. Only configuration loading can fail.

/// Errors while loading a [`ReconcileConfig`](crate::ReconcileConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed JSON
    #[error("invalid JSON config: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Malformed YAML
    #[error("invalid YAML config: {0}")]
    InvalidYaml(#[source] serde_yaml::Error),

    /// Value outside its allowed range
    #[error("config value {field} = {value} is out of range")]
    OutOfRange { field: &'static str, value: f64 },
}
