use super::LogicCondition;
use crate::graph::StepId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a rule or default branch sends the respondent.
///
/// `target_step_id` is the current form; `target_step_order` is the legacy one.
/// With neither resolvable the action is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogicAction {
    #[serde(default, alias = "targetStepId")]
    pub target_step_id: Option<StepId>,
    #[serde(default, alias = "targetStepOrder")]
    pub target_step_order: Option<u32>,
}

impl LogicAction {
    pub fn to_step(id: impl Into<StepId>) -> Self {
        Self {
            target_step_id: Some(id.into()),
            target_step_order: None,
        }
    }

    pub fn to_order(order: u32) -> Self {
        Self {
            target_step_id: None,
            target_step_order: Some(order),
        }
    }
}

impl fmt::Display for LogicAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.target_step_id, self.target_step_order) {
            (Some(id), _) => write!(f, "step '{}'", id),
            (None, Some(order)) => write!(f, "step #{}", order),
            (None, None) => write!(f, "nowhere"),
        }
    }
}

/// An If-AND-conditions-Then-action branch.
///
/// A rule without conditions never matches. Route unconditionally through
/// `StepLogic::default_action` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicRule {
    #[serde(default)]
    pub id: String,
    /// Rules are tried lowest order first.
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub conditions: Vec<LogicCondition>,
    pub action: LogicAction,
}

impl LogicRule {
    pub fn new(
        id: impl Into<String>,
        order: i32,
        conditions: Vec<LogicCondition>,
        action: LogicAction,
    ) -> Self {
        Self {
            id: id.into(),
            order,
            conditions,
            action,
        }
    }
}

/// The complete rule set of one step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepLogic {
    #[serde(default)]
    pub rules: Vec<LogicRule>,
    #[serde(default, alias = "defaultAction")]
    pub default_action: Option<LogicAction>,
}
