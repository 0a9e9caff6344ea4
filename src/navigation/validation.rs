use crate::answer::{Answer, FileReference, FrameAnswer};
use crate::error::{MissingField, RequiredField, ValidationFailure};
use crate::graph::{Dimensionality, FrameConfig, Step, StepKind};

/// Kind-specific required-field gating.
///
/// Failures are collected, never short-circuited: a frame group with several
/// incomplete repetitions reports every missing field of every repetition.
pub struct RequirementGate;

impl RequirementGate {
    pub fn check(step: &Step, answer: &Answer) -> Result<(), ValidationFailure> {
        let reasons = Self::missing_fields(step, answer);
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { reasons })
        }
    }

    pub fn missing_fields(step: &Step, answer: &Answer) -> Vec<MissingField> {
        match &step.kind {
            StepKind::Frames(config) => Self::check_frames(step, config, &answer.frames),
            StepKind::Dimensions { dimensionality, .. } => {
                if !step.required {
                    return Vec::new();
                }
                let dims = answer.dimensions.clone().unwrap_or_default();
                let mut required = vec![
                    (RequiredField::Width, dims.width),
                    (RequiredField::Height, dims.height),
                ];
                if *dimensionality == Dimensionality::ThreeD {
                    required.push((RequiredField::Depth, dims.depth));
                }
                required
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(field, _)| MissingField {
                        step_id: step.id.clone(),
                        repetition: None,
                        field,
                    })
                    .collect()
            }
            StepKind::CardSelection
            | StepKind::MultipleChoice
            | StepKind::Text
            | StepKind::FileUpload { .. }
            | StepKind::Rating { .. }
            | StepKind::Contact => {
                if !step.required || Self::has_shared_answer(answer) {
                    Vec::new()
                } else {
                    vec![MissingField {
                        step_id: step.id.clone(),
                        repetition: None,
                        field: RequiredField::Answer,
                    }]
                }
            }
        }
    }

    /// The loose union shared by every kind without a dedicated gate. Several
    /// kinds write into the same answer slots, so any filled slot counts.
    fn has_shared_answer(answer: &Answer) -> bool {
        let contact = answer.contact.as_ref();
        answer.has_selection()
            || filled(answer.text.as_deref())
            || answer.file.as_ref().is_some_and(FileReference::is_present)
            || filled(contact.and_then(|c| c.name.as_deref()))
            || filled(contact.and_then(|c| c.email.as_deref()))
            || answer.rating.is_some()
    }

    fn check_frames(step: &Step, config: &FrameConfig, frames: &[FrameAnswer]) -> Vec<MissingField> {
        // A group always presents at least one repetition.
        let blank = [FrameAnswer::default()];
        let frames = if frames.is_empty() { &blank[..] } else { frames };

        let mut reasons = Vec::new();
        for (i, frame) in frames.iter().enumerate() {
            let checks = [
                (
                    config.require_image,
                    RequiredField::Image,
                    frame.image.as_ref().is_some_and(FileReference::is_present),
                ),
                (
                    config.require_location,
                    RequiredField::Location,
                    filled(frame.location.as_deref()),
                ),
                (
                    config.require_measurement,
                    RequiredField::Measurement,
                    filled(frame.measurement.as_deref()),
                ),
            ];
            for (required, field, present) in checks {
                if required && !present {
                    reasons.push(MissingField {
                        step_id: step.id.clone(),
                        repetition: Some(i + 1),
                        field,
                    });
                }
            }
        }
        reasons
    }
}

fn filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
