use super::{RouteDecision, RouteSource, RuleEvaluator};
use crate::answer::Answer;
use crate::error::RouteFault;
use crate::graph::StepGraph;
use crate::trace::TraceFormatter;
use tracing::{debug, warn};

/// Where an advance leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Index(usize),
    /// Past the last step: the form is ready to submit.
    End,
}

/// A fully resolved advance, with the explanation of how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub next: NextStep,
    pub source: RouteSource,
    /// Present when the step had a logic entry and the rule evaluator ran.
    pub decision: Option<RouteDecision>,
    pub faults: Vec<RouteFault>,
}

impl Route {
    /// A human-readable explanation of the branch that was taken.
    pub fn reason(&self) -> String {
        TraceFormatter::format_route(self)
    }
}

/// Applies the full routing precedence for one step:
///
/// 1. a logic entry exists for the step: the rule evaluator decides;
/// 2. no logic entry at all: the selected option's legacy `jump_to_step`;
/// 3. otherwise, or when nothing resolves: the next step in order.
///
/// Legacy jumps are gated on the presence of the logic entry, not per rule, so
/// an option's `jump_to_step` is ignored as soon as its step has any logic.
pub struct Router;

impl Router {
    pub fn route(graph: &StepGraph, current_index: usize, answer: &Answer) -> Route {
        let sequential = Self::sequential(graph, current_index);
        let Some(step) = graph.step_at(current_index) else {
            return Route {
                next: sequential,
                source: RouteSource::Sequential,
                decision: None,
                faults: Vec::new(),
            };
        };

        if let Some(logic) = graph.logic_for(&step.id) {
            let decision = RuleEvaluator::evaluate(logic, answer, graph);
            let next = decision.target_index.map_or(sequential, NextStep::Index);
            debug!(step_id = %step.id, ?next, source = ?decision.source, "Routed by step logic");
            return Route {
                next,
                source: decision.source.clone(),
                faults: decision.faults.clone(),
                decision: Some(decision),
            };
        }

        let mut faults = Vec::new();
        if let Some(option) = answer
            .selected_option_id
            .as_ref()
            .and_then(|id| graph.option(id))
            .filter(|o| o.step_id == step.id)
        {
            if let Some(order) = option.jump_to_step {
                match graph.index_of_order(order) {
                    Some(index) => {
                        debug!(step_id = %step.id, option_id = %option.id, order, "Routed by legacy option jump");
                        return Route {
                            next: NextStep::Index(index),
                            source: RouteSource::LegacyJump {
                                option_id: option.id.clone(),
                                order,
                            },
                            decision: None,
                            faults,
                        };
                    }
                    None => {
                        warn!(option_id = %option.id, order, "Legacy jump targets no step");
                        faults.push(RouteFault::UnresolvableLegacyJump {
                            option_id: option.id.clone(),
                            order,
                        });
                    }
                }
            }
        }

        debug!(step_id = %step.id, next = ?sequential, "Routed sequentially");
        Route {
            next: sequential,
            source: RouteSource::Sequential,
            decision: None,
            faults,
        }
    }

    /// The step after `current_index` in display order, or the end of the form.
    pub fn sequential(graph: &StepGraph, current_index: usize) -> NextStep {
        let next = current_index + 1;
        if next < graph.len() {
            NextStep::Index(next)
        } else {
            NextStep::End
        }
    }
}
