use crate::error::FormConversionError;
use crate::graph::{OptionId, StepId, StepKind};
use crate::logic::{LogicAction, LogicRule};
use serde::{Deserialize, Serialize};
use std::fs;

/// The complete, canonical read of a form from the authoring store.
/// This is the target structure for any custom store format conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormDefinition {
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
    #[serde(default)]
    pub options: Vec<OptionDefinition>,
    #[serde(default, alias = "stepLogic")]
    pub step_logic: Vec<StepLogicDefinition>,
}

/// Defines a single step (one question screen).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    pub id: StepId,
    pub order: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub required: bool,
    pub kind: StepKind,
}

/// Defines a selectable option and the step that owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDefinition {
    pub id: OptionId,
    #[serde(alias = "stepId")]
    pub step_id: StepId,
    #[serde(default)]
    pub label: String,
    #[serde(default, alias = "jumpToStep")]
    pub jump_to_step: Option<u32>,
}

/// Defines the branching rules of one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLogicDefinition {
    #[serde(alias = "stepId")]
    pub step_id: StepId,
    #[serde(default)]
    pub rules: Vec<LogicRule>,
    #[serde(default, alias = "defaultAction")]
    pub default_action: Option<LogicAction>,
}

impl FormDefinition {
    pub fn from_json(json: &str) -> Result<Self, FormConversionError> {
        serde_json::from_str(json).map_err(|e| FormConversionError::JsonParseError(e.to_string()))
    }

    /// Load a form definition from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, FormConversionError> {
        let content = fs::read_to_string(path).map_err(|e| FormConversionError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}
