use super::{Step, StepGraph, StepId, StepOption};
use crate::error::GraphError;
use crate::form::FormDefinition;
use crate::logic::StepLogic;
use ahash::AHashMap;
use itertools::Itertools;
use tracing::{debug, warn};

/// Builds a `StepGraph` from a `FormDefinition`.
///
/// By default only structural impossibilities fail the build. Authored forms
/// regularly carry dangling references, so those are logged and dropped.
/// Strict mode turns them into errors, which suits authoring-time checks.
pub struct GraphBuilder {
    definition: FormDefinition,
    strict: bool,
}

impl GraphBuilder {
    pub fn new(definition: FormDefinition) -> Self {
        Self {
            definition,
            strict: false,
        }
    }

    pub fn with_strict_references(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(self) -> Result<StepGraph, GraphError> {
        let FormDefinition {
            steps,
            options,
            step_logic,
        } = self.definition;

        if steps.is_empty() {
            return Err(GraphError::EmptyForm);
        }

        let sorted: Vec<_> = steps.into_iter().sorted_by_key(|s| s.order).collect();

        let mut built = Vec::with_capacity(sorted.len());
        let mut by_id = AHashMap::with_capacity(sorted.len());
        let mut by_order: AHashMap<u32, usize> = AHashMap::with_capacity(sorted.len());

        for (index, def) in sorted.into_iter().enumerate() {
            if by_id.contains_key(&def.id) {
                return Err(GraphError::DuplicateStepId(def.id));
            }
            if let Some(&first) = by_order.get(&def.order) {
                let first: &Step = &built[first];
                return Err(GraphError::DuplicateOrder {
                    order: def.order,
                    first: first.id.clone(),
                    second: def.id,
                });
            }
            if def.order as usize != index + 1 {
                warn!(step_id = %def.id, order = def.order, index, "Step order is not dense");
            }
            by_id.insert(def.id.clone(), index);
            by_order.insert(def.order, index);
            built.push(Step {
                id: def.id,
                order: def.order,
                index,
                title: def.title,
                required: def.required,
                kind: def.kind,
            });
        }

        let mut options_per_step: Vec<Vec<StepOption>> = vec![Vec::new(); built.len()];
        let mut option_index = AHashMap::with_capacity(options.len());
        for def in options {
            if option_index.contains_key(&def.id) {
                return Err(GraphError::DuplicateOptionId(def.id));
            }
            let Some(&step_index) = by_id.get(&def.step_id) else {
                if self.strict {
                    return Err(GraphError::DanglingOption {
                        option_id: def.id,
                        step_id: def.step_id,
                    });
                }
                warn!(option_id = %def.id, step_id = %def.step_id, "Dropping option of unknown step");
                continue;
            };
            let slot = options_per_step[step_index].len();
            option_index.insert(def.id.clone(), (step_index, slot));
            options_per_step[step_index].push(StepOption {
                id: def.id,
                step_id: def.step_id,
                label: def.label,
                jump_to_step: def.jump_to_step,
            });
        }

        let mut logic: AHashMap<StepId, StepLogic> = AHashMap::with_capacity(step_logic.len());
        for def in step_logic {
            if !by_id.contains_key(&def.step_id) {
                if self.strict {
                    return Err(GraphError::DanglingLogic(def.step_id));
                }
                warn!(step_id = %def.step_id, "Dropping logic of unknown step");
                continue;
            }
            if logic.contains_key(&def.step_id) {
                if self.strict {
                    return Err(GraphError::DuplicateLogic {
                        step_id: def.step_id,
                    });
                }
                warn!(step_id = %def.step_id, "Ignoring duplicate logic entry, keeping the first");
                continue;
            }
            logic.insert(
                def.step_id,
                StepLogic {
                    rules: def.rules,
                    default_action: def.default_action,
                },
            );
        }

        let graph = StepGraph {
            steps: built,
            by_id,
            by_order,
            options: options_per_step,
            option_index,
            logic,
        };

        if self.strict {
            check_targets(&graph)?;
        }

        debug!(
            steps = graph.steps.len(),
            options = graph.option_index.len(),
            logic = graph.logic.len(),
            "Built step graph"
        );
        Ok(graph)
    }
}

/// Every rule, default and legacy jump must resolve.
fn check_targets(graph: &StepGraph) -> Result<(), GraphError> {
    for step in &graph.steps {
        if let Some(logic) = graph.logic.get(&step.id) {
            for rule in &logic.rules {
                if graph.resolve_action(&rule.action).is_none() {
                    return Err(GraphError::DanglingTarget {
                        step_id: step.id.clone(),
                        origin: format!("rule '{}'", rule.id),
                    });
                }
            }
            if let Some(default) = &logic.default_action {
                if graph.resolve_action(default).is_none() {
                    return Err(GraphError::DanglingTarget {
                        step_id: step.id.clone(),
                        origin: "default action".to_string(),
                    });
                }
            }
        }
        for option in graph.options_of(step.index) {
            if let Some(order) = option.jump_to_step {
                if graph.index_of_order(order).is_none() {
                    return Err(GraphError::DanglingTarget {
                        step_id: step.id.clone(),
                        origin: format!("option '{}' jump to order {}", option.id, order),
                    });
                }
            }
        }
    }
    Ok(())
}
