//! Pipeline configuration, loaded from TOML.
//!
//! ```toml
//! debounce_ms = 25
//! integration_mode = "s2s"
//!
//! [integration]
//! name = "placard"
//! platform = "iOS"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EventError;

/// Default batching window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 25;

/// How the host reports events to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationMode {
    /// Client SDK: every signal goes through the pipeline.
    #[default]
    Sdk,
    /// Server-to-server: the partner reports load signals itself.
    S2s,
}

/// Static integration/device metadata attached to every batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationInfo {
    pub name: String,
    pub version: String,
    pub framework: String,
    pub platform: String,
    pub layout_schema_version: String,
    pub device_type: String,
    pub operating_system: String,
    pub operating_system_version: String,
    pub device_model: String,
    pub package_name: String,
    pub package_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub debounce_ms: u64,
    pub integration_mode: IntegrationMode,
    pub integration: IntegrationInfo,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            integration_mode: IntegrationMode::Sdk,
            integration: IntegrationInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..IntegrationInfo::default()
            },
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, EventError> {
        toml::from_str(s).map_err(|e| EventError::Config(e.to_string()))
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, EventError> {
        let text = std::fs::read_to_string(path).map_err(|e| EventError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn with_integration_mode(mut self, mode: IntegrationMode) -> Self {
        self.integration_mode = mode;
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }
}
