use super::{OptionId, StepId, StepKind};

/// One question screen, positioned in the navigation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub id: StepId,
    /// Authored 1-based display order.
    pub order: u32,
    /// 0-based position in the navigation order. This is what the controller walks.
    pub index: usize,
    pub title: String,
    pub required: bool,
    pub kind: StepKind,
}

/// A selectable choice owned by exactly one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOption {
    pub id: OptionId,
    pub step_id: StepId,
    pub label: String,
    /// Legacy shortcut: jump to the step with this display order.
    pub jump_to_step: Option<u32>,
}
