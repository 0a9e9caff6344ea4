use crate::graph::{OptionId, StepId};
use itertools::Itertools;
use thiserror::Error;

/// Errors that can occur while building a `StepGraph` from a form definition.
///
/// Only structural impossibilities are errors by default. Dangling references
/// are tolerated unless the builder runs in strict mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Form definition contains no steps")]
    EmptyForm,

    #[error("Step id '{0}' is used by more than one step")]
    DuplicateStepId(StepId),

    #[error("Steps '{first}' and '{second}' share display order {order}")]
    DuplicateOrder {
        order: u32,
        first: StepId,
        second: StepId,
    },

    #[error("Option id '{0}' is used by more than one option")]
    DuplicateOptionId(OptionId),

    #[error("Option '{option_id}' belongs to unknown step '{step_id}'")]
    DanglingOption { option_id: OptionId, step_id: StepId },

    #[error("Step logic references unknown step '{0}'")]
    DanglingLogic(StepId),

    #[error("Step '{step_id}' has more than one logic entry")]
    DuplicateLogic { step_id: StepId },

    #[error("Step '{step_id}' routes to a target that matches no step ({origin})")]
    DanglingTarget { step_id: StepId, origin: String },
}

/// Errors that can occur when converting a custom store format into a `FormDefinition`.
#[derive(Error, Debug, Clone)]
pub enum FormConversionError {
    #[error("Failed to parse form JSON: {0}")]
    JsonParseError(String),

    #[error("Could not read form file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// A non-fatal routing defect.
///
/// Faults are never returned as errors: the evaluator records them on the
/// decision it produces and keeps going. The worst outcome of any fault is a
/// sequential advance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteFault {
    #[error("{origin} targets a step that does not exist (id: {}, order: {})", display_opt(.target_step_id), display_opt(.target_step_order))]
    UnresolvableTarget {
        origin: String,
        target_step_id: Option<StepId>,
        target_step_order: Option<u32>,
    },

    #[error("Option '{option_id}' jumps to order {order}, which matches no step")]
    UnresolvableLegacyJump { option_id: OptionId, order: u32 },

    #[error("Condition kind '{0}' is reserved and never matches")]
    ReservedCondition(&'static str),

    #[error("Condition has an unrecognized field kind and never matches")]
    MalformedCondition,
}

fn display_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

/// The required fields a gate can report as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// The shared answer slot of choice, text, file and contact steps.
    Answer,
    Image,
    Location,
    Measurement,
    Width,
    Height,
    Depth,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::Answer => "an answer",
            RequiredField::Image => "image",
            RequiredField::Location => "location",
            RequiredField::Measurement => "measurement",
            RequiredField::Width => "width",
            RequiredField::Height => "height",
            RequiredField::Depth => "depth",
        }
    }
}

/// One missing field on one step, optionally inside a numbered repetition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub step_id: StepId,
    /// 1-based repetition number for repeatable groups.
    pub repetition: Option<usize>,
    pub field: RequiredField,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.repetition, self.field) {
            (Some(n), field) => write!(f, "Frame {}: {} is required", n, field.label()),
            (None, RequiredField::Answer) => write!(f, "An answer is required"),
            (None, field) => write!(f, "{} is required", capitalize(field.label())),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A rejected required-field gate, carrying every missing field at once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Required fields missing: {}", .reasons.iter().join("; "))]
pub struct ValidationFailure {
    pub reasons: Vec<MissingField>,
}

impl ValidationFailure {
    /// The human-readable message of every reason, in report order.
    pub fn messages(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

/// Errors returned by the navigation controller. None of them mutate the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("The session has already been submitted")]
    SessionClosed,

    #[error("Step '{0}' is not a repeatable group")]
    NotRepeatable(StepId),

    #[error("Step '{step_id}' allows at most {max} repetitions")]
    RepetitionLimit { step_id: StepId, max: usize },

    #[error("Current index {0} does not point at a step")]
    IndexOutOfRange(usize),
}

/// Errors reported by a submission side effect. They never reopen a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Submission rejected: {0}")]
    Rejected(String),

    #[error("Submission could not be delivered: {0}")]
    Delivery(String),
}

/// Errors that can occur while saving or restoring a session snapshot.
#[derive(Error, Debug, Clone)]
pub enum SnapshotError {
    #[error("Serialization failed: {0}")]
    Encode(String),

    #[error("Deserialization failed: {0}")]
    Decode(String),

    #[error("Snapshot does not fit this form: {0}")]
    Incompatible(String),
}
