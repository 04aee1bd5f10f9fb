//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Provider creation error
    #[error("failed to create provider '{id}': {message}")]
    ProviderCreation { id: String, message: String },

    /// Contract-level error (config validation, delivery)
    #[error("contract error: {0}")]
    Contract(#[from] contracts::ContractError),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DispatcherError {
    /// Create a provider creation error
    pub fn provider_creation(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderCreation {
            id: id.into(),
            message: message.into(),
        }
    }
}
