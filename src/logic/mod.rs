//! Branching logic: conditions, rules and the evaluators over them.

mod condition;
mod evaluator;
mod router;
mod rule;

pub use condition::{Comparator, ConditionCheck, ConditionEvaluator, DimensionAxis, LogicCondition};
pub use evaluator::{
    ConditionOutcome, ConditionTrace, RouteDecision, RouteSource, RuleEvaluator, RuleOutcome,
    RuleTrace,
};
pub use router::{NextStep, Route, Router};
pub use rule::{LogicAction, LogicRule, StepLogic};
