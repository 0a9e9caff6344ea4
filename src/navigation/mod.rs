//! The session state machine: position, history, answers and the gates between steps.

mod config;
mod controller;
mod history;
mod snapshot;
mod submission;
mod validation;

pub use config::NavigationConfig;
pub use controller::{
    AdvanceOutcome, ControllerBuilder, NavigationController, RetreatOutcome, SessionPhase,
};
pub use history::NavigationHistory;
pub use snapshot::SessionSnapshot;
pub use submission::{NoopSubmission, SubmissionHandler};
pub use validation::RequirementGate;
