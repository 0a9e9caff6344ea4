//! The step graph: the static, read-only substrate the engine walks.
//!
//! A `StepGraph` is built once per form from a `FormDefinition` and can be
//! shared by every respondent session of that form. All lookups are O(1) and
//! return `Option`, so a dangling reference is a value the caller handles
//! rather than a panic.

use crate::logic::{LogicAction, StepLogic};
use ahash::AHashMap;

mod builder;
mod ids;
mod kind;
mod model;

pub use builder::GraphBuilder;
pub use ids::{OptionId, StepId};
pub use kind::{Dimensionality, FrameConfig, StepKind, StepKindTag};
pub use model::{Step, StepOption};

#[derive(Debug, Clone)]
pub struct StepGraph {
    /// Steps sorted by display order; a step's position is its navigation index.
    steps: Vec<Step>,
    by_id: AHashMap<StepId, usize>,
    by_order: AHashMap<u32, usize>,
    /// Options per step index, in authored order.
    options: Vec<Vec<StepOption>>,
    option_index: AHashMap<OptionId, (usize, usize)>,
    logic: AHashMap<StepId, StepLogic>,
}

impl StepGraph {
    pub fn builder(definition: crate::form::FormDefinition) -> GraphBuilder {
        GraphBuilder::new(definition)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a built graph; construction rejects empty forms.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_at(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn step_by_id(&self, id: &StepId) -> Option<&Step> {
        self.index_of(id).and_then(|i| self.steps.get(i))
    }

    pub fn step_by_order(&self, order: u32) -> Option<&Step> {
        self.index_of_order(order).and_then(|i| self.steps.get(i))
    }

    pub fn index_of(&self, id: &StepId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn index_of_order(&self, order: u32) -> Option<usize> {
        self.by_order.get(&order).copied()
    }

    /// Options of the step at `index`. Unknown indices have no options.
    pub fn options_of(&self, index: usize) -> &[StepOption] {
        self.options.get(index).map_or(&[], Vec::as_slice)
    }

    pub fn option(&self, id: &OptionId) -> Option<&StepOption> {
        self.option_index
            .get(id)
            .and_then(|&(step, slot)| self.options.get(step)?.get(slot))
    }

    /// The rule set of a step. `None` means no logic entry exists at all,
    /// which is what enables the legacy per-option jump.
    pub fn logic_for(&self, id: &StepId) -> Option<&StepLogic> {
        self.logic.get(id)
    }

    /// Resolves an action to a navigation index.
    ///
    /// The stable id is tried first; when it is absent or dangling the legacy
    /// order is tried. `None` means the action is invalid.
    pub fn resolve_action(&self, action: &LogicAction) -> Option<usize> {
        action
            .target_step_id
            .as_ref()
            .and_then(|id| self.index_of(id))
            .or_else(|| action.target_step_order.and_then(|o| self.index_of_order(o)))
    }
}
