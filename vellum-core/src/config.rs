//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::capability::Backend;
use crate::CoreResult;

/// Tunables for editing commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Scalar snap tolerance in scene pixels (guides, edges).
    pub snap_threshold: f64,
    /// Point snap tolerance in scene pixels.
    pub vector_snap_threshold: f64,
    /// Backend consulted when a command does not name one.
    pub default_backend: Backend,
    /// Prefix for generated gradient definition ids.
    pub gradient_id_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 4.0,
            vector_snap_threshold: 8.0,
            default_backend: Backend::Dom,
            gradient_id_prefix: "paint".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
