//! Error types for the test tree synchronization engine.
//!
//! Stale references, unavailable children and missing host capabilities are
//! ordinary outcomes and never show up here. Only real failures of the provider
//! or of the host tree propagate to the caller.

use thiserror::Error;

/// Failure reported by a test item provider backend
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider backend failed: {0}")]
    Backend(String),
}

/// Failure reported by the host tree container
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Test tree has been disposed")]
    Disposed,
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Test tree error: {0}")]
    Host(#[from] HostError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
