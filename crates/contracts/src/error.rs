//! Layered error definitions
//!
//! Categorized by source: config / delivery / io

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Delivery Errors =====
    /// Provider delivery error
    #[error("provider '{provider_id}' delivery error: {message}")]
    Delivery {
        provider_id: String,
        message: String,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create provider delivery error
    pub fn delivery(provider_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            provider_id: provider_id.into(),
            message: message.into(),
        }
    }
}
