use crate::logic::{
    ConditionOutcome, ConditionTrace, Route, RouteDecision, RouteSource, RuleOutcome, RuleTrace,
};
use itertools::Itertools;

/// Formats routing traces into human-readable explanations.
pub struct TraceFormatter;

impl TraceFormatter {
    /// Explains a complete route, whichever branch produced it.
    pub fn format_route(route: &Route) -> String {
        let mut result = match (&route.decision, &route.source) {
            (Some(decision), _) => return Self::format_decision(decision),
            (None, RouteSource::LegacyJump { option_id, order }) => {
                format!("option '{}' jumps to step #{}", option_id, order)
            }
            (None, _) => "no step logic, advancing sequentially".to_string(),
        };
        Self::push_faults(&mut result, route.faults.iter());
        result
    }

    /// Explains a rule evaluation: every rule that was looked at, then the fallback taken.
    pub fn format_decision(decision: &RouteDecision) -> String {
        let mut parts: Vec<String> = decision
            .rules
            .iter()
            .filter_map(Self::format_rule)
            .collect();

        match &decision.source {
            RouteSource::Rule { .. } | RouteSource::LegacyJump { .. } => {}
            RouteSource::Default => parts.push("no rule matched, default action taken".to_string()),
            RouteSource::Sequential => {
                parts.push("no branch resolved, advancing sequentially".to_string())
            }
        }

        let mut result = parts.join("; ");
        Self::push_faults(&mut result, decision.faults.iter());
        result
    }

    /// Formats one rule. Rules skipped after an earlier match produce nothing.
    pub fn format_rule(trace: &RuleTrace) -> Option<String> {
        let outcome = match trace.outcome {
            RuleOutcome::NotEvaluated => return None,
            RuleOutcome::Matched { target_index } => format!("matched, go to index {}", target_index),
            RuleOutcome::NoMatch => "no match".to_string(),
            RuleOutcome::UnresolvableTarget => "matched, but target is unresolvable".to_string(),
        };

        let conditions = if trace.conditions.is_empty() {
            "no conditions".to_string()
        } else {
            // Only the conditions that were actually checked decide the outcome.
            trace
                .conditions
                .iter()
                .filter_map(Self::format_condition)
                .join(" AND ")
        };

        Some(format!(
            "rule #{} '{}': {} -> {}",
            trace.order, trace.rule_id, conditions, outcome
        ))
    }

    fn format_condition(trace: &ConditionTrace) -> Option<String> {
        match (&trace.outcome, &trace.observed) {
            (ConditionOutcome::NotEvaluated, _) => None,
            (_, Some(observed)) => Some(format!("{} (was {})", trace.condition, observed)),
            (_, None) => Some(format!("{} (never matches)", trace.condition)),
        }
    }

    fn push_faults<'a, I>(result: &mut String, mut faults: I)
    where
        I: Iterator<Item = &'a crate::error::RouteFault>,
    {
        let faults = faults.join("; ");
        if !faults.is_empty() {
            result.push_str(" [");
            result.push_str(&faults);
            result.push(']');
        }
    }
}
