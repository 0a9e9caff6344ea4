use super::{
    NavigationConfig, NavigationHistory, NoopSubmission, RequirementGate, SessionSnapshot,
    SubmissionHandler,
};
use crate::answer::{Answer, AnswerSet, FrameAnswer};
use crate::error::{NavigationError, SnapshotError, SubmissionError};
use crate::graph::{Step, StepGraph, StepId, StepKind};
use crate::logic::{NextStep, Route, Router};
use crate::presentation::{Direction, NoopObserver, TransitionEvent, TransitionObserver};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Active { current_index: usize },
    /// Transient: the submission side effect is running.
    Submitting,
    /// Terminal. A completed session never becomes active again.
    Complete,
}

impl SessionPhase {
    pub fn current_index(&self) -> Option<usize> {
        match self {
            SessionPhase::Active { current_index } => Some(*current_index),
            SessionPhase::Submitting | SessionPhase::Complete => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    Moved { from: usize, to: usize, route: Route },
    /// The respondent advanced past the last step and the submission ran.
    Completed {
        route: Route,
        submission: Result<(), SubmissionError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetreatOutcome {
    pub from: usize,
    pub to: usize,
    /// The history had a single entry and the fallback `current - 1` was used.
    pub clamped: bool,
}

pub struct ControllerBuilder {
    graph: Arc<StepGraph>,
    config: NavigationConfig,
    observer: Box<dyn TransitionObserver>,
    submission: Box<dyn SubmissionHandler>,
}

impl ControllerBuilder {
    pub fn new(graph: impl Into<Arc<StepGraph>>) -> Self {
        Self {
            graph: graph.into(),
            config: NavigationConfig::default(),
            observer: Box::new(NoopObserver),
            submission: Box::new(NoopSubmission),
        }
    }

    pub fn with_config(mut self, config: NavigationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: impl TransitionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn with_submission_handler(mut self, handler: impl SubmissionHandler + 'static) -> Self {
        self.submission = Box::new(handler);
        self
    }

    /// Starts a fresh session at the first step.
    pub fn build(self) -> NavigationController {
        NavigationController {
            graph: self.graph,
            config: self.config,
            phase: SessionPhase::Active { current_index: 0 },
            history: NavigationHistory::new(0),
            answers: AnswerSet::new(),
            observer: self.observer,
            submission: self.submission,
        }
    }

    /// Resumes a session from a snapshot taken against the same form.
    pub fn resume(self, snapshot: SessionSnapshot) -> Result<NavigationController, SnapshotError> {
        snapshot.validate_against(&self.graph)?;
        let mut controller = self.build();
        controller.phase = snapshot.phase;
        controller.history = snapshot.history;
        controller.answers = snapshot.answers;
        Ok(controller)
    }
}

/// The navigation state machine of one respondent session.
///
/// State changes only through `advance`, `retreat` and `add_another`. Every
/// error leaves position, history and answers untouched.
pub struct NavigationController {
    graph: Arc<StepGraph>,
    config: NavigationConfig,
    phase: SessionPhase,
    history: NavigationHistory,
    answers: AnswerSet,
    observer: Box<dyn TransitionObserver>,
    submission: Box<dyn SubmissionHandler>,
}

impl NavigationController {
    pub fn builder(graph: impl Into<Arc<StepGraph>>) -> ControllerBuilder {
        ControllerBuilder::new(graph)
    }

    pub fn graph(&self) -> &StepGraph {
        &self.graph
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_index(&self) -> Option<usize> {
        self.phase.current_index()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.current_index().and_then(|i| self.graph.step_at(i))
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// The stored answer of a step, e.g. to prefill it after going back.
    pub fn answer_for(&self, step_id: &StepId) -> Option<&Answer> {
        self.answers.get(step_id)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    /// Runs the required-field gate of the current step without moving.
    pub fn can_advance(&self, answer: &Answer) -> Result<(), NavigationError> {
        let (_, step) = self.active_step()?;
        RequirementGate::check(step, answer).map_err(NavigationError::from)
    }

    /// Validates the answer, records it and moves to the routed step.
    ///
    /// Advancing past the last step runs the submission side effect once and
    /// completes the session.
    pub fn advance(&mut self, answer: Answer) -> Result<AdvanceOutcome, NavigationError> {
        let (from, step) = self.active_step()?;
        RequirementGate::check(step, &answer)?;

        let route = Router::route(&self.graph, from, &answer);
        if self.config.explain_routes {
            debug!(step_id = %step.id, reason = %route.reason(), "Route resolved");
        }

        let step_id = step.id.clone();
        self.answers.insert(step_id, answer);
        self.history.push(from);

        match route.next {
            NextStep::Index(to) => {
                self.notify(Direction::Forward, from, to);
                self.phase = SessionPhase::Active { current_index: to };
                Ok(AdvanceOutcome::Moved { from, to, route })
            }
            NextStep::End => {
                self.phase = SessionPhase::Submitting;
                let submission = self.submission.submit(&self.answers);
                match &submission {
                    Ok(()) => info!(answers = self.answers.len(), "Form submitted"),
                    Err(e) => warn!(error = %e, "Submission side effect failed"),
                }
                self.phase = SessionPhase::Complete;
                Ok(AdvanceOutcome::Completed { route, submission })
            }
        }
    }

    /// Goes back to the previously visited step.
    ///
    /// With a single-entry history the index is clamped to `current - 1`
    /// (never below zero) instead of failing.
    pub fn retreat(&mut self) -> Result<RetreatOutcome, NavigationError> {
        let (from, _) = self.active_step()?;
        let (to, clamped) = match self.history.pop() {
            Some(previous) => (previous, false),
            None => (from.saturating_sub(1), true),
        };
        if clamped {
            debug!(from, to, "History underflow, clamping retreat");
        }
        if to != from {
            self.notify(Direction::Backward, from, to);
        }
        self.phase = SessionPhase::Active { current_index: to };
        Ok(RetreatOutcome { from, to, clamped })
    }

    /// "Add another" on a frame group: validates the repetitions entered so far,
    /// stores them plus a fresh blank repetition, and stays on the same step.
    ///
    /// Returns the number of repetitions now present.
    pub fn add_another(&mut self, mut answer: Answer) -> Result<usize, NavigationError> {
        let (_, step) = self.active_step()?;
        let StepKind::Frames(config) = &step.kind else {
            return Err(NavigationError::NotRepeatable(step.id.clone()));
        };
        RequirementGate::check(step, &answer).map_err(NavigationError::from)?;

        if answer.frames.is_empty() {
            answer.frames.push(FrameAnswer::default());
        }
        if let Some(max) = config.max_frames {
            if answer.frames.len() >= max {
                return Err(NavigationError::RepetitionLimit {
                    step_id: step.id.clone(),
                    max,
                });
            }
        }
        answer.frames.push(FrameAnswer::default());
        let count = answer.frames.len();
        let step_id = step.id.clone();
        debug!(step_id = %step_id, repetitions = count, "Added repetition");
        self.answers.insert(step_id, answer);
        Ok(count)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            history: self.history.clone(),
            answers: self.answers.clone(),
        }
    }

    fn active_step(&self) -> Result<(usize, &Step), NavigationError> {
        let index = self
            .phase
            .current_index()
            .ok_or(NavigationError::SessionClosed)?;
        let step = self
            .graph
            .step_at(index)
            .ok_or(NavigationError::IndexOutOfRange(index))?;
        Ok((index, step))
    }

    fn notify(&mut self, direction: Direction, from: usize, to: usize) {
        let (Some(from_step), Some(to_step)) = (self.graph.step_at(from), self.graph.step_at(to))
        else {
            return;
        };
        let event = TransitionEvent::new(
            direction,
            (from, from_step.kind.tag()),
            (to, to_step.kind.tag()),
            self.config.animate_card_transitions,
        );
        self.observer.on_transition(&event);
    }
}
