//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the keiro crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use keiro::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let form = FormDefinition::from_file("path/to/form.json")?;
//! let graph = StepGraph::builder(form).build()?;
//!
//! let mut session = NavigationController::builder(graph)
//!     .with_submission_handler(|answers: &AnswerSet| {
//!         println!("Submitting {} answers", answers.len());
//!         Ok::<(), SubmissionError>(())
//!     })
//!     .build();
//!
//! match session.advance(Answer::option("opt-a"))? {
//!     AdvanceOutcome::Moved { to, route, .. } => println!("-> step {} ({})", to, route.reason()),
//!     AdvanceOutcome::Completed { .. } => println!("-> submitted"),
//! }
//! # Ok(())
//! # }
//! ```

// Form model and conversion
pub use crate::form::{FormDefinition, IntoForm, OptionDefinition, StepDefinition, StepLogicDefinition};

// Step graph
pub use crate::graph::{OptionId, Step, StepGraph, StepId, StepKind, StepOption};

// Answers
pub use crate::answer::{Answer, AnswerSet, FrameAnswer};

// Branching logic
pub use crate::logic::{LogicAction, LogicCondition, LogicRule, NextStep, Route, RuleEvaluator, StepLogic};

// Navigation
pub use crate::navigation::{
    AdvanceOutcome, NavigationConfig, NavigationController, RetreatOutcome, SessionPhase,
    SessionSnapshot, SubmissionHandler,
};
pub use crate::presentation::{Direction, TransitionEvent, TransitionObserver};

// Error types
pub use crate::error::{GraphError, NavigationError, SubmissionError, ValidationFailure};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
