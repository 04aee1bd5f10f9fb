//! ProviderConfig - Built-in provider construction config
//!
//! Describes the built-in providers the dispatcher crate can construct by
//! itself. External backends implement `AnalyticsProvider` directly and are
//! registered as values, not through config.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ContractError;

/// Built-in provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider id (stable, caller-assigned)
    pub id: String,

    /// Provider kind
    pub kind: ProviderKind,

    /// Only reachable via explicit per-event targeting
    #[serde(default)]
    pub manual_only: bool,

    /// Kind-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Built-in provider kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Structured tracing output
    Log,
    /// In-memory recording (tests, inspection)
    Memory,
    /// JSON-lines file output
    JsonFile,
}

/// Validate a set of provider configs
///
/// Returns the first error encountered, or Ok(()). Duplicate ids are legal
/// (they simply yield duplicate delivery targets), so only per-entry shape
/// is checked here.
pub fn validate_provider_configs(configs: &[ProviderConfig]) -> Result<(), ContractError> {
    for (idx, config) in configs.iter().enumerate() {
        if config.id.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("providers[{idx}].id"),
                "provider id must not be empty",
            ));
        }
    }
    Ok(())
}
