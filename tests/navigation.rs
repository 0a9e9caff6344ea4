//! Navigation controller tests: routing, history, gating, transitions and submission
mod common;
use common::*;
use keiro::error::NavigationError;
use keiro::graph::StepKindTag;
use keiro::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn moved_to(outcome: AdvanceOutcome) -> usize {
    match outcome {
        AdvanceOutcome::Moved { to, .. } => to,
        AdvanceOutcome::Completed { .. } => panic!("Expected a move, got completion"),
    }
}

/// Walks the quote form down the `opt-a` branch up to the last step.
fn walk_to_contact(session: &mut NavigationController) {
    session.advance(Answer::option("opt-a")).expect("kind");
    session
        .advance(Answer::frames(vec![complete_frame("kitchen")]))
        .expect("photos");
    session.advance(Answer::option("opt-d")).expect("style");
    session.advance(Answer::empty()).expect("notes");
    assert_eq!(session.current_index(), Some(5));
}

#[cfg(test)]
mod routing_tests {
    use super::*;

    #[test]
    fn test_matching_rule_skips_ahead_and_back_returns() {
        let mut session = NavigationController::builder(create_quote_graph()).build();

        let to = moved_to(session.advance(Answer::option("opt-a")).expect("Failed to advance"));
        assert_eq!(to, 2);
        assert_eq!(session.current_step().map(|s| s.id.as_str()), Some("photos"));

        let back = session.retreat().expect("Failed to retreat");
        assert_eq!(back.to, 0);
        assert!(!back.clamped);
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn test_default_action_routes_unmatched_selection() {
        let mut session = NavigationController::builder(create_quote_graph()).build();
        let to = moved_to(session.advance(Answer::option("opt-b")).expect("Failed to advance"));
        assert_eq!(to, 1);
    }

    #[test]
    fn test_legacy_jump_and_sequential_advance() {
        let mut session = NavigationController::builder(create_quote_graph()).build();
        session.advance(Answer::option("opt-b")).expect("kind");
        session
            .advance(Answer::dimensions(Some(90.0), Some(210.0), Some(4.0)))
            .expect("size");
        assert_eq!(session.current_index(), Some(2));
        session
            .advance(Answer::frames(vec![complete_frame("hall")]))
            .expect("photos");
        assert_eq!(session.current_index(), Some(3));

        let to = moved_to(session.advance(Answer::option("opt-c")).expect("style"));
        assert_eq!(to, 5);
    }

    #[test]
    fn test_route_reason_is_reported() {
        let mut session = NavigationController::builder(create_quote_graph()).build();
        match session.advance(Answer::option("opt-b")).expect("Failed to advance") {
            AdvanceOutcome::Moved { route, .. } => {
                assert!(route.reason().contains("default action taken"));
            }
            other => panic!("Unexpected outcome: {:?}", other),
        }
    }
}

#[cfg(test)]
mod history_tests {
    use super::*;

    #[test]
    fn test_back_replays_visited_path_not_rules() {
        let mut session = NavigationController::builder(create_quote_graph()).build();
        walk_to_contact(&mut session);

        let mut visited = Vec::new();
        for _ in 0..4 {
            visited.push(session.retreat().expect("Failed to retreat").to);
        }
        assert_eq!(visited, [4, 3, 2, 0]);
    }

    #[test]
    fn test_n_advances_then_n_retreats_returns_to_start() {
        let mut session = NavigationController::builder(create_quote_graph()).build();
        walk_to_contact(&mut session);
        let advances = 4;

        for _ in 0..advances {
            session.retreat().expect("Failed to retreat");
        }
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.history().entries(), [0]);
    }

    #[test]
    fn test_history_push_and_pop() {
        let mut session = NavigationController::builder(create_quote_graph()).build();
        assert_eq!(session.history().entries(), [0]);

        session.advance(Answer::option("opt-a")).expect("Failed to advance");
        assert_eq!(session.history().entries(), [0, 0]);

        session.retreat().expect("Failed to retreat");
        assert_eq!(session.history().entries(), [0]);
    }

    #[test]
    fn test_retreat_on_first_step_stays_put() {
        let (mut session, events) = session_with_events(create_quote_graph());
        let outcome = session.retreat().expect("Retreat should clamp, not fail");
        assert_eq!(outcome, RetreatOutcome { from: 0, to: 0, clamped: true });
        assert_eq!(session.current_index(), Some(0));
        assert!(events.try_recv().is_err(), "No transition without a move");
    }

    #[test]
    fn test_resumed_single_entry_history_clamps_to_previous_index() {
        let graph = create_quote_graph();
        let snapshot = SessionSnapshot {
            phase: SessionPhase::Active { current_index: 3 },
            history: Default::default(),
            answers: AnswerSet::new(),
        };
        let mut session = NavigationController::builder(graph)
            .resume(snapshot)
            .expect("Snapshot should fit the form");

        let outcome = session.retreat().expect("Failed to retreat");
        assert_eq!(outcome.to, 2);
        assert!(outcome.clamped);
    }

    #[test]
    fn test_answers_survive_going_back() {
        let mut session = NavigationController::builder(create_quote_graph()).build();
        session.advance(Answer::option("opt-a")).expect("Failed to advance");
        session.retreat().expect("Failed to retreat");

        assert_eq!(
            session.answer_for(&StepId::new("kind")),
            Some(&Answer::option("opt-a"))
        );
    }
}

#[cfg(test)]
mod gating_tests {
    use super::*;

    #[test]
    fn test_validation_failure_leaves_session_untouched() {
        let (mut session, events) = session_with_events(create_quote_graph());
        session.advance(Answer::option("opt-a")).expect("Failed to advance");
        let _ = events.try_recv();

        let bad = Answer::frames(vec![FrameAnswer::default(), complete_frame("attic")]);
        let err = session.advance(bad).unwrap_err();

        match err {
            NavigationError::Validation(failure) => assert_eq!(failure.reasons.len(), 2),
            other => panic!("Unexpected error: {:?}", other),
        }
        assert_eq!(session.current_index(), Some(2));
        assert_eq!(session.history().entries(), [0, 0]);
        assert!(session.answer_for(&StepId::new("photos")).is_none());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_can_advance_does_not_move() {
        let session = NavigationController::builder(create_quote_graph()).build();
        assert!(session.can_advance(&Answer::empty()).is_err());
        assert!(session.can_advance(&Answer::option("opt-a")).is_ok());
        assert_eq!(session.current_index(), Some(0));
    }
}

#[cfg(test)]
mod repetition_tests {
    use super::*;

    fn session_on_photos() -> NavigationController {
        let mut session = NavigationController::builder(create_quote_graph()).build();
        session.advance(Answer::option("opt-a")).expect("Failed to advance");
        session
    }

    #[test]
    fn test_add_another_appends_blank_repetition() {
        let mut session = session_on_photos();
        let count = session
            .add_another(Answer::frames(vec![complete_frame("kitchen")]))
            .expect("Failed to add repetition");

        assert_eq!(count, 2);
        assert_eq!(session.current_index(), Some(2));
        let stored = session.answer_for(&StepId::new("photos")).expect("stored answer");
        assert_eq!(stored.frames[1], FrameAnswer::default());
        assert_eq!(session.history().entries(), [0, 0]);
    }

    #[test]
    fn test_add_another_validates_current_repetitions() {
        let mut session = session_on_photos();
        let err = session.add_another(Answer::frames(vec![FrameAnswer::default()]));
        assert!(matches!(err, Err(NavigationError::Validation(_))));
        assert!(session.answer_for(&StepId::new("photos")).is_none());
    }

    #[test]
    fn test_add_another_respects_limit() {
        let mut session = session_on_photos();
        let frames = vec![complete_frame("a"), complete_frame("b"), complete_frame("c")];
        let err = session.add_another(Answer::frames(frames)).unwrap_err();
        assert_eq!(
            err,
            NavigationError::RepetitionLimit {
                step_id: StepId::new("photos"),
                max: 3
            }
        );
    }

    #[test]
    fn test_add_another_on_non_repeatable_step() {
        let mut session = NavigationController::builder(create_quote_graph()).build();
        let err = session.add_another(Answer::option("opt-a")).unwrap_err();
        assert_eq!(err, NavigationError::NotRepeatable(StepId::new("kind")));
    }
}

#[cfg(test)]
mod transition_tests {
    use super::*;

    #[test]
    fn test_card_to_card_transition_is_animated() {
        let mut form = create_linear_form();
        form.steps[2].kind = StepKind::CardSelection;
        let graph = StepGraph::builder(form).build().expect("Failed to build graph");
        let (mut session, events) = session_with_events(graph);

        session.advance(Answer::empty()).expect("Failed to advance");
        let event = events.try_recv().expect("Expected a transition");
        assert_eq!(event.direction, Direction::Forward);
        assert_eq!((event.from_index, event.to_index), (0, 1));
        assert!(event.animate);

        session.retreat().expect("Failed to retreat");
        let event = events.try_recv().expect("Expected a transition");
        assert_eq!(event.direction, Direction::Backward);
        assert_eq!((event.from_index, event.to_index), (1, 0));
        assert!(event.animate);
    }

    #[test]
    fn test_mixed_kinds_swap_without_animation() {
        let (mut session, events) = session_with_events(create_quote_graph());
        session.advance(Answer::option("opt-a")).expect("Failed to advance");

        let event = events.try_recv().expect("Expected a transition");
        assert_eq!(event.from_kind, StepKindTag::CardSelection);
        assert_eq!(event.to_kind, StepKindTag::Frames);
        assert!(!event.animate);
    }

    #[test]
    fn test_animation_can_be_disabled() {
        let (sender, events) = std::sync::mpsc::channel();
        let mut session = NavigationController::builder(
            StepGraph::builder(create_linear_form()).build().expect("graph"),
        )
        .with_config(NavigationConfig {
            animate_card_transitions: false,
            ..Default::default()
        })
        .with_observer(keiro::presentation::ChannelObserver::new(sender))
        .build();

        session.advance(Answer::empty()).expect("Failed to advance");
        assert!(!events.try_recv().expect("Expected a transition").animate);
    }

    #[test]
    fn test_closure_observer_sees_one_event_per_move() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut session = NavigationController::builder(create_quote_graph())
            .with_observer(move |event: &TransitionEvent| sink.borrow_mut().push(event.to_index))
            .build();

        walk_to_contact(&mut session);
        session.retreat().expect("Failed to retreat");
        assert_eq!(*seen.borrow(), vec![2, 3, 4, 5, 4]);
    }

    #[test]
    fn test_dropped_receiver_does_not_affect_navigation() {
        let (session, events) = session_with_events(create_quote_graph());
        drop(events);
        let mut session = session;
        session.advance(Answer::option("opt-b")).expect("Failed to advance");
        assert_eq!(session.current_index(), Some(1));
    }
}

#[cfg(test)]
mod submission_tests {
    use super::*;
    use keiro::error::SubmissionError;

    #[test]
    fn test_advancing_past_last_step_submits_once() {
        let calls = Rc::new(RefCell::new(0usize));
        let counter = Rc::clone(&calls);
        let mut session = NavigationController::builder(create_quote_graph())
            .with_submission_handler(move |answers: &AnswerSet| {
                *counter.borrow_mut() += 1;
                assert_eq!(answers.len(), 5);
                Ok::<(), SubmissionError>(())
            })
            .build();

        walk_to_contact(&mut session);
        let outcome = session
            .advance(Answer::contact(Some("Ada"), Some("ada@example.com")))
            .expect("Failed to submit");

        assert!(matches!(
            outcome,
            AdvanceOutcome::Completed { submission: Ok(()), .. }
        ));
        assert!(session.is_complete());
        assert_eq!(session.current_index(), None);
        assert_eq!(*calls.borrow(), 1);

        assert_eq!(
            session.advance(Answer::empty()).unwrap_err(),
            NavigationError::SessionClosed
        );
        assert_eq!(session.retreat().unwrap_err(), NavigationError::SessionClosed);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_failed_submission_still_completes() {
        let mut session = NavigationController::builder(create_quote_graph())
            .with_submission_handler(|_: &AnswerSet| {
                Err::<(), _>(SubmissionError::Delivery("webhook timed out".to_string()))
            })
            .build();

        walk_to_contact(&mut session);
        let outcome = session
            .advance(Answer::contact(Some("Ada"), None))
            .expect("Advance itself succeeds");

        match outcome {
            AdvanceOutcome::Completed { submission, .. } => {
                assert_eq!(
                    submission,
                    Err(SubmissionError::Delivery("webhook timed out".to_string()))
                );
            }
            other => panic!("Unexpected outcome: {:?}", other),
        }
        assert_eq!(session.phase(), SessionPhase::Complete);
    }

    #[test]
    fn test_last_step_is_gated_like_any_other() {
        let mut session = NavigationController::builder(create_quote_graph()).build();
        walk_to_contact(&mut session);
        assert!(session.advance(Answer::empty()).is_err());
        assert!(!session.is_complete());
    }
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn test_snapshot_restores_session_mid_form() {
        let graph = std::sync::Arc::new(create_quote_graph());
        let mut session = NavigationController::builder(graph.clone()).build();
        session.advance(Answer::option("opt-b")).expect("kind");
        session
            .advance(Answer::dimensions(Some(1.0), Some(2.0), Some(3.0)))
            .expect("size");

        let bytes = session.snapshot().to_bytes().expect("Failed to encode snapshot");
        let snapshot = SessionSnapshot::from_bytes(&bytes).expect("Failed to decode snapshot");
        let mut resumed = NavigationController::builder(graph)
            .resume(snapshot)
            .expect("Snapshot should fit the form");

        assert_eq!(resumed.current_index(), Some(2));
        assert_eq!(resumed.answers(), session.answers());
        assert_eq!(resumed.retreat().expect("retreat").to, 1);
        assert_eq!(resumed.retreat().expect("retreat").to, 0);
    }

    #[test]
    fn test_snapshot_for_another_form_is_rejected() {
        let snapshot = SessionSnapshot {
            phase: SessionPhase::Active { current_index: 4 },
            history: Default::default(),
            answers: AnswerSet::new(),
        };
        let graph = StepGraph::builder(create_linear_form()).build().expect("graph");
        assert!(NavigationController::builder(graph).resume(snapshot).is_err());
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(SessionSnapshot::from_bytes(&[0xff, 0xff, 0xff]).is_err());
    }
}
