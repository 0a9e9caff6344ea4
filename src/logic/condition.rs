use crate::answer::Answer;
use crate::error::RouteFault;
use crate::graph::OptionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operators reserved for the text, scale and dimension condition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    #[serde(other)]
    Unknown,
}

impl Comparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Equals => "==",
            Comparator::NotEquals => "!=",
            Comparator::Contains => "contains",
            Comparator::GreaterThan => ">",
            Comparator::LessThan => "<",
            Comparator::GreaterThanOrEqual => ">=",
            Comparator::LessThanOrEqual => "<=",
            Comparator::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionAxis {
    Width,
    Height,
    Depth,
    #[serde(other)]
    Unknown,
}

/// A predicate over the answer of the step that owns the rule.
///
/// Only `OptionSelected` is evaluated. The other kinds are reserved: they load
/// from authored data but never match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field_type", rename_all = "snake_case")]
pub enum LogicCondition {
    #[serde(rename = "option")]
    OptionSelected {
        #[serde(alias = "optionId")]
        option_id: OptionId,
    },
    Text {
        #[serde(default)]
        operator: Option<Comparator>,
        #[serde(default)]
        value: Option<String>,
    },
    Scale {
        #[serde(default)]
        operator: Option<Comparator>,
        #[serde(default)]
        value: Option<f64>,
    },
    Dimension {
        #[serde(default)]
        axis: Option<DimensionAxis>,
        #[serde(default)]
        operator: Option<Comparator>,
        #[serde(default)]
        value: Option<f64>,
    },
    /// Any field kind this engine does not know.
    #[serde(other)]
    Unrecognized,
}

impl LogicCondition {
    pub fn option(id: impl Into<OptionId>) -> Self {
        LogicCondition::OptionSelected {
            option_id: id.into(),
        }
    }

    pub fn field_type(&self) -> &'static str {
        match self {
            LogicCondition::OptionSelected { .. } => "option",
            LogicCondition::Text { .. } => "text",
            LogicCondition::Scale { .. } => "scale",
            LogicCondition::Dimension { .. } => "dimension",
            LogicCondition::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for LogicCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicCondition::OptionSelected { option_id } => write!(f, "option == {}", option_id),
            LogicCondition::Text { operator, value } => write!(
                f,
                "text {} {:?}",
                operator.map_or("?", |o| o.symbol()),
                value.as_deref().unwrap_or_default()
            ),
            LogicCondition::Scale { operator, value } => write!(
                f,
                "scale {} {}",
                operator.map_or("?", |o| o.symbol()),
                value.map_or_else(|| "?".to_string(), |v| v.to_string())
            ),
            LogicCondition::Dimension {
                axis,
                operator,
                value,
            } => write!(
                f,
                "{:?} {} {}",
                axis.unwrap_or(DimensionAxis::Unknown),
                operator.map_or("?", |o| o.symbol()),
                value.map_or_else(|| "?".to_string(), |v| v.to_string())
            ),
            LogicCondition::Unrecognized => write!(f, "unrecognized condition"),
        }
    }
}

/// The outcome of checking one condition against one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionCheck {
    pub held: bool,
    /// What the answer carried in the slot the condition inspects.
    pub observed: Option<String>,
    pub fault: Option<RouteFault>,
}

/// Decides whether a single condition holds.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    pub fn matches(condition: &LogicCondition, answer: &Answer) -> bool {
        Self::check(condition, answer).held
    }

    /// Like `matches`, but also reports what was observed and why a condition
    /// was rejected without being evaluated.
    pub fn check(condition: &LogicCondition, answer: &Answer) -> ConditionCheck {
        match condition {
            LogicCondition::OptionSelected { option_id } => ConditionCheck {
                held: answer.selected_option_id.as_ref() == Some(option_id),
                observed: Some(
                    answer
                        .selected_option_id
                        .as_ref()
                        .map_or_else(|| "nothing".to_string(), ToString::to_string),
                ),
                fault: None,
            },
            LogicCondition::Text { .. }
            | LogicCondition::Scale { .. }
            | LogicCondition::Dimension { .. } => ConditionCheck {
                held: false,
                observed: None,
                fault: Some(RouteFault::ReservedCondition(condition.field_type())),
            },
            LogicCondition::Unrecognized => ConditionCheck {
                held: false,
                observed: None,
                fault: Some(RouteFault::MalformedCondition),
            },
        }
    }
}
