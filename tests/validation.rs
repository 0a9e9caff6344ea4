//! Required-field gating tests
mod common;
use common::*;
use keiro::answer::{ContactAnswer, FileReference};
use keiro::error::{MissingField, RequiredField};
use keiro::graph::{Dimensionality, FrameConfig};
use keiro::navigation::RequirementGate;
use keiro::prelude::*;

fn built_step(required: bool, kind: StepKind) -> Step {
    let graph = StepGraph::builder(FormDefinition {
        steps: vec![step("only", 1, required, kind)],
        ..Default::default()
    })
    .build()
    .expect("Failed to build single-step graph");
    graph.steps()[0].clone()
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_optional_step_always_passes() {
        let step = built_step(false, StepKind::CardSelection);
        assert!(RequirementGate::check(&step, &Answer::empty()).is_ok());
    }

    #[test]
    fn test_required_card_selection_needs_an_answer() {
        let step = built_step(true, StepKind::CardSelection);
        let err = RequirementGate::check(&step, &Answer::empty()).unwrap_err();
        assert_eq!(err.messages(), vec!["An answer is required".to_string()]);
        assert!(RequirementGate::check(&step, &Answer::option("opt-a")).is_ok());
    }

    #[test]
    fn test_shared_slots_satisfy_any_loose_kind() {
        let step = built_step(true, StepKind::Text);
        let answers = [
            Answer::text("hello"),
            Answer::options(["opt-a"]),
            Answer::option("opt-a"),
            Answer::file("plan.pdf", "https://files.example/plan.pdf"),
            Answer::contact(Some("Ada"), None),
            Answer::contact(None, Some("ada@example.com")),
            Answer::rating(3),
        ];
        for answer in answers {
            assert!(RequirementGate::check(&step, &answer).is_ok(), "{:?}", answer);
        }
    }

    #[test]
    fn test_blank_text_counts_as_missing() {
        let step = built_step(true, StepKind::Text);
        assert!(RequirementGate::check(&step, &Answer::text("   ")).is_err());
        assert!(RequirementGate::check(&step, &Answer::text("")).is_err());
    }

    #[test]
    fn test_contact_with_only_phone_is_missing() {
        let step = built_step(true, StepKind::Contact);
        let answer = Answer {
            contact: Some(ContactAnswer {
                name: Some(" ".to_string()),
                email: None,
                phone: Some("+31 20 123 4567".to_string()),
            }),
            ..Answer::default()
        };
        assert!(RequirementGate::check(&step, &answer).is_err());
    }

    #[test]
    fn test_empty_file_reference_is_missing() {
        let step = built_step(true, StepKind::FileUpload { allowed_types: vec![] });
        let answer = Answer {
            file: Some(FileReference::default()),
            ..Answer::default()
        };
        assert!(RequirementGate::check(&step, &answer).is_err());
    }

    #[test]
    fn test_required_2d_dimensions_need_width_and_height() {
        let step = built_step(
            true,
            StepKind::Dimensions {
                dimensionality: Dimensionality::TwoD,
                unit: None,
            },
        );

        let err = RequirementGate::check(&step, &Answer::empty()).unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["Width is required".to_string(), "Height is required".to_string()]
        );

        let answer = Answer::dimensions(Some(80.0), Some(200.0), None);
        assert!(RequirementGate::check(&step, &answer).is_ok());
    }

    #[test]
    fn test_required_3d_dimensions_need_depth() {
        let step = built_step(
            true,
            StepKind::Dimensions {
                dimensionality: Dimensionality::ThreeD,
                unit: None,
            },
        );
        let err = RequirementGate::check(&step, &Answer::dimensions(Some(80.0), Some(200.0), None))
            .unwrap_err();
        assert_eq!(
            err.reasons,
            vec![MissingField {
                step_id: StepId::new("only"),
                repetition: None,
                field: RequiredField::Depth,
            }]
        );
    }

    #[test]
    fn test_optional_dimensions_pass_when_empty() {
        let step = built_step(
            false,
            StepKind::Dimensions {
                dimensionality: Dimensionality::ThreeD,
                unit: None,
            },
        );
        assert!(RequirementGate::check(&step, &Answer::empty()).is_ok());
    }

    #[test]
    fn test_frame_failures_are_batched_per_repetition() {
        let step = built_step(true, StepKind::Frames(frame_config()));
        let answer = Answer::frames(vec![
            complete_frame("kitchen"),
            FrameAnswer {
                image: None,
                location: Some("hall".to_string()),
                measurement: None,
            },
            FrameAnswer {
                image: Some(FileReference {
                    name: "attic.jpg".to_string(),
                    url: "https://files.example/attic.jpg".to_string(),
                }),
                location: None,
                measurement: None,
            },
        ]);

        let err = RequirementGate::check(&step, &answer).unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "Frame 2: image is required".to_string(),
                "Frame 3: location is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_image_reference_in_frame_is_missing() {
        let step = built_step(true, StepKind::Frames(frame_config()));
        let answer = Answer::frames(vec![FrameAnswer {
            image: Some(FileReference::default()),
            location: Some("hall".to_string()),
            measurement: None,
        }]);

        let err = RequirementGate::check(&step, &answer).unwrap_err();
        assert_eq!(err.messages(), vec!["Frame 1: image is required".to_string()]);
    }

    #[test]
    fn test_frame_reports_every_missing_field_of_a_repetition() {
        let step = built_step(true, StepKind::Frames(frame_config()));
        let err = RequirementGate::check(&step, &Answer::frames(vec![FrameAnswer::default()]))
            .unwrap_err();
        assert_eq!(err.reasons.len(), 2);
        assert!(err.reasons.iter().all(|r| r.repetition == Some(1)));
    }

    #[test]
    fn test_frame_group_without_repetitions_checks_one_blank() {
        let step = built_step(true, StepKind::Frames(frame_config()));
        let err = RequirementGate::check(&step, &Answer::empty()).unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "Frame 1: image is required".to_string(),
                "Frame 1: location is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_frame_flags_apply_even_on_optional_step() {
        let step = built_step(false, StepKind::Frames(frame_config()));
        assert!(RequirementGate::check(&step, &Answer::empty()).is_err());

        let lenient = built_step(false, StepKind::Frames(FrameConfig::default()));
        assert!(RequirementGate::check(&lenient, &Answer::empty()).is_ok());
    }

    #[test]
    fn test_failure_display_joins_reasons() {
        let step = built_step(
            true,
            StepKind::Dimensions {
                dimensionality: Dimensionality::TwoD,
                unit: None,
            },
        );
        let err = RequirementGate::check(&step, &Answer::empty()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Required fields missing: Width is required; Height is required"
        );
    }
}
