use crate::error::FormConversionError;
use serde::{Deserialize, Serialize};
use std::fs;

/// Session behaviour knobs. Loadable from JSON; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Mark card-to-card transitions for animation.
    #[serde(default = "enabled", alias = "animateCardTransitions")]
    pub animate_card_transitions: bool,
    /// Format a human-readable reason for every route (logged at debug level).
    #[serde(default = "enabled", alias = "explainRoutes")]
    pub explain_routes: bool,
}

fn enabled() -> bool {
    true
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            animate_card_transitions: true,
            explain_routes: true,
        }
    }
}

impl NavigationConfig {
    pub fn from_json(json: &str) -> Result<Self, FormConversionError> {
        serde_json::from_str(json).map_err(|e| FormConversionError::JsonParseError(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self, FormConversionError> {
        let content = fs::read_to_string(path).map_err(|e| FormConversionError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}
