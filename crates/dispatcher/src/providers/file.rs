//! JsonFileProvider - appends accepted events to a JSON-lines file

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use contracts::{AnalyticsProvider, ContractError, EventParams};
use serde_json::json;
use tracing::{debug, error};

/// Configuration for JsonFileProvider
#[derive(Debug, Clone)]
pub struct JsonFileConfig {
    /// Output file path
    pub path: PathBuf,
}

impl JsonFileConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let path = params
            .get("path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./analytics.jsonl"));

        Self { path }
    }
}

/// Provider that appends one JSON object per accepted event
pub struct JsonFileProvider {
    id: String,
    manual_only: bool,
    file: Mutex<File>,
}

impl JsonFileProvider {
    /// Create a new JsonFileProvider, opening the output file for append
    pub fn new(id: impl Into<String>, config: JsonFileConfig) -> std::io::Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)?;

        let id = id.into();
        debug!(provider = %id, path = %config.path.display(), "JsonFileProvider opened");

        Ok(Self {
            id,
            manual_only: false,
            file: Mutex::new(file),
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        id: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        let config = JsonFileConfig::from_params(params);
        Self::new(id, config)
    }

    /// Make this provider reachable only via explicit targeting
    pub fn with_manual_only(mut self, manual_only: bool) -> Self {
        self.manual_only = manual_only;
        self
    }

    fn append_record(
        &self,
        event_name: &str,
        parameters: Option<&EventParams>,
    ) -> std::io::Result<()> {
        let record = json!({
            "provider": self.id,
            "event": event_name,
            "time": Utc::now().to_rfc3339(),
            "parameters": parameters,
        });

        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        serde_json::to_writer(&mut *file, &record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        file.write_all(b"\n")?;
        Ok(())
    }
}

impl AnalyticsProvider for JsonFileProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn manual_only(&self) -> bool {
        self.manual_only
    }

    fn log(&self, event_name: &str, parameters: Option<&EventParams>) -> Result<(), ContractError> {
        self.append_record(event_name, parameters).map_err(|e| {
            error!(provider = %self.id, event = event_name, error = %e, "Append failed");
            ContractError::delivery(&self.id, e.to_string())
        })
    }
}
