use super::{ConditionEvaluator, LogicCondition, LogicRule, StepLogic};
use crate::answer::Answer;
use crate::error::RouteFault;
use crate::graph::{StepGraph, StepId};
use itertools::Itertools;
use tracing::{debug, warn};

/// The outcome of a single condition inside a rule trace.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionOutcome {
    Held,
    Failed,
    /// Skipped because an earlier condition of the same rule failed.
    NotEvaluated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionTrace {
    pub condition: LogicCondition,
    pub outcome: ConditionOutcome,
    pub observed: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// Every condition held and the target resolved. Evaluation stopped here.
    Matched { target_index: usize },
    NoMatch,
    /// Every condition held but the target matches no step. Scanning continued.
    UnresolvableTarget,
    /// Not reached because an earlier rule matched.
    NotEvaluated,
}

/// A record of how one rule was evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTrace {
    pub rule_id: String,
    pub order: i32,
    pub conditions: Vec<ConditionTrace>,
    pub outcome: RuleOutcome,
}

/// Which branch produced a routing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSource {
    Rule { rule_id: String, order: i32 },
    Default,
    /// The per-option `jump_to_step` shortcut, used only for steps without logic.
    LegacyJump { option_id: crate::graph::OptionId, order: u32 },
    /// Nothing resolved; advance to the next step in order.
    Sequential,
}

/// The result of evaluating one step's rule set against one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDecision {
    pub target: Option<StepId>,
    pub target_index: Option<usize>,
    pub source: RouteSource,
    pub rules: Vec<RuleTrace>,
    pub faults: Vec<RouteFault>,
}

/// Turns (rule set, answer, graph) into the next step.
///
/// Rules are tried in ascending `order` (stable for ties), conditions are ANDed
/// with short-circuit, and the first rule whose conditions all hold and whose
/// target resolves wins. Later rules are never consulted, even if they would
/// match too. A matched rule with a dangling target does not stop the scan.
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// The id of the step to present next, or `None` to advance sequentially.
    pub fn next_step_id(logic: &StepLogic, answer: &Answer, graph: &StepGraph) -> Option<StepId> {
        Self::evaluate(logic, answer, graph).target
    }

    pub fn evaluate(logic: &StepLogic, answer: &Answer, graph: &StepGraph) -> RouteDecision {
        let mut traces = Vec::with_capacity(logic.rules.len());
        let mut faults = Vec::new();
        let mut winner: Option<(usize, &LogicRule)> = None;

        for rule in logic.rules.iter().sorted_by_key(|r| r.order) {
            if winner.is_some() {
                traces.push(RuleTrace {
                    rule_id: rule.id.clone(),
                    order: rule.order,
                    conditions: Vec::new(),
                    outcome: RuleOutcome::NotEvaluated,
                });
                continue;
            }

            let (held, conditions) = Self::evaluate_conditions(&rule.conditions, answer, &mut faults);
            let outcome = if !held {
                RuleOutcome::NoMatch
            } else if let Some(index) = graph.resolve_action(&rule.action) {
                winner = Some((index, rule));
                RuleOutcome::Matched {
                    target_index: index,
                }
            } else {
                warn!(rule_id = %rule.id, action = %rule.action, "Matched rule has an unresolvable target, skipping");
                faults.push(RouteFault::UnresolvableTarget {
                    origin: format!("Rule '{}'", rule.id),
                    target_step_id: rule.action.target_step_id.clone(),
                    target_step_order: rule.action.target_step_order,
                });
                RuleOutcome::UnresolvableTarget
            };
            traces.push(RuleTrace {
                rule_id: rule.id.clone(),
                order: rule.order,
                conditions,
                outcome,
            });
        }

        if let Some((index, rule)) = winner {
            debug!(rule_id = %rule.id, target_index = index, "Rule matched");
            return RouteDecision {
                target: graph.step_at(index).map(|s| s.id.clone()),
                target_index: Some(index),
                source: RouteSource::Rule {
                    rule_id: rule.id.clone(),
                    order: rule.order,
                },
                rules: traces,
                faults,
            };
        }

        if let Some(default) = &logic.default_action {
            if let Some(index) = graph.resolve_action(default) {
                debug!(target_index = index, "No rule matched, taking default action");
                return RouteDecision {
                    target: graph.step_at(index).map(|s| s.id.clone()),
                    target_index: Some(index),
                    source: RouteSource::Default,
                    rules: traces,
                    faults,
                };
            }
            warn!(action = %default, "Default action has an unresolvable target");
            faults.push(RouteFault::UnresolvableTarget {
                origin: "Default action".to_string(),
                target_step_id: default.target_step_id.clone(),
                target_step_order: default.target_step_order,
            });
        }

        debug!("Nothing resolved, falling through to sequential advance");
        RouteDecision {
            target: None,
            target_index: None,
            source: RouteSource::Sequential,
            rules: traces,
            faults,
        }
    }

    /// ANDs the conditions of one rule, stopping at the first failure.
    ///
    /// A rule without conditions never matches: it is an unfinished branch.
    fn evaluate_conditions(
        conditions: &[LogicCondition],
        answer: &Answer,
        faults: &mut Vec<RouteFault>,
    ) -> (bool, Vec<ConditionTrace>) {
        if conditions.is_empty() {
            return (false, Vec::new());
        }

        let mut traces = Vec::with_capacity(conditions.len());
        let mut held = true;
        for condition in conditions {
            if !held {
                traces.push(ConditionTrace {
                    condition: condition.clone(),
                    outcome: ConditionOutcome::NotEvaluated,
                    observed: None,
                });
                continue;
            }
            let check = ConditionEvaluator::check(condition, answer);
            if let Some(fault) = check.fault {
                warn!(%fault, "Condition failed closed");
                faults.push(fault);
            }
            held = check.held;
            traces.push(ConditionTrace {
                condition: condition.clone(),
                outcome: if check.held {
                    ConditionOutcome::Held
                } else {
                    ConditionOutcome::Failed
                },
                observed: check.observed,
            });
        }
        (held, traces)
    }
}
