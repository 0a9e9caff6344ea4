//! Common test utilities for building form definitions and sessions.
use keiro::graph::{Dimensionality, FrameConfig};
use keiro::prelude::*;
use keiro::presentation::ChannelObserver;
use std::sync::mpsc::{self, Receiver};

#[allow(dead_code)]
pub fn step(id: &str, order: u32, required: bool, kind: StepKind) -> StepDefinition {
    StepDefinition {
        id: StepId::new(id),
        order,
        title: id.to_string(),
        required,
        kind,
    }
}

#[allow(dead_code)]
pub fn option(id: &str, step_id: &str, jump_to_step: Option<u32>) -> OptionDefinition {
    OptionDefinition {
        id: OptionId::new(id),
        step_id: StepId::new(step_id),
        label: id.to_string(),
        jump_to_step,
    }
}

#[allow(dead_code)]
pub fn rule(id: &str, order: i32, options: &[&str], target: &str) -> LogicRule {
    LogicRule::new(
        id,
        order,
        options.iter().map(|o| LogicCondition::option(*o)).collect(),
        LogicAction::to_step(target),
    )
}

#[allow(dead_code)]
pub fn frame_config() -> FrameConfig {
    FrameConfig {
        require_image: true,
        require_location: true,
        require_measurement: false,
        max_frames: Some(3),
    }
}

/// A six-step quote form exercising every routing path.
///
/// | index | id        | kind           | routing                                   |
/// |-------|-----------|----------------|-------------------------------------------|
/// | 0     | `kind`    | card selection | `opt-a` -> `photos`, default -> `size`    |
/// | 1     | `size`    | dimensions 3d  | sequential                                |
/// | 2     | `photos`  | frames         | sequential                                |
/// | 3     | `style`   | card selection | no logic; `opt-c` jumps to order 6        |
/// | 4     | `notes`   | text, optional | sequential                                |
/// | 5     | `contact` | contact        | last step                                 |
#[allow(dead_code)]
pub fn create_quote_form() -> FormDefinition {
    FormDefinition {
        steps: vec![
            step("kind", 1, true, StepKind::CardSelection),
            step(
                "size",
                2,
                true,
                StepKind::Dimensions {
                    dimensionality: Dimensionality::ThreeD,
                    unit: Some("cm".to_string()),
                },
            ),
            step("photos", 3, true, StepKind::Frames(frame_config())),
            step("style", 4, true, StepKind::CardSelection),
            step("notes", 5, false, StepKind::Text),
            step("contact", 6, true, StepKind::Contact),
        ],
        options: vec![
            option("opt-a", "kind", None),
            option("opt-b", "kind", None),
            option("opt-c", "style", Some(6)),
            option("opt-d", "style", None),
        ],
        step_logic: vec![StepLogicDefinition {
            step_id: StepId::new("kind"),
            rules: vec![rule("r1", 0, &["opt-a"], "photos")],
            default_action: Some(LogicAction::to_step("size")),
        }],
    }
}

#[allow(dead_code)]
pub fn create_quote_graph() -> StepGraph {
    StepGraph::builder(create_quote_form())
        .build()
        .expect("Failed to build quote graph")
}

/// Three plain card steps with no logic and no jumps.
#[allow(dead_code)]
pub fn create_linear_form() -> FormDefinition {
    FormDefinition {
        steps: vec![
            step("first", 1, false, StepKind::CardSelection),
            step("second", 2, false, StepKind::CardSelection),
            step("third", 3, false, StepKind::Text),
        ],
        ..Default::default()
    }
}

/// A complete frame repetition for `frame_config()`.
#[allow(dead_code)]
pub fn complete_frame(location: &str) -> FrameAnswer {
    FrameAnswer {
        image: Some(keiro::answer::FileReference {
            name: format!("{}.jpg", location),
            url: format!("https://files.example/{}.jpg", location),
        }),
        location: Some(location.to_string()),
        measurement: None,
    }
}

#[allow(dead_code)]
pub fn session_with_events(graph: StepGraph) -> (NavigationController, Receiver<TransitionEvent>) {
    let (sender, receiver) = mpsc::channel();
    let controller = NavigationController::builder(graph)
        .with_observer(ChannelObserver::new(sender))
        .build();
    (controller, receiver)
}

/// The quote form as authored JSON, in the camelCase shape older stores emit.
#[allow(dead_code)]
pub const QUOTE_FORM_JSON: &str = r#"{
    "steps": [
        { "id": "kind", "title": "kind", "order": 1, "required": true, "kind": { "type": "card_selection" } },
        { "id": "size", "title": "size", "order": 2, "required": true, "kind": { "type": "dimensions", "dimensionality": "3d", "unit": "cm" } },
        { "id": "photos", "title": "photos", "order": 3, "required": true, "kind": { "type": "frames", "requireImage": true, "requireLocation": true, "maxFrames": 3 } },
        { "id": "style", "title": "style", "order": 4, "required": true, "kind": { "type": "card_selection" } },
        { "id": "notes", "title": "notes", "order": 5, "kind": { "type": "text" } },
        { "id": "contact", "title": "contact", "order": 6, "required": true, "kind": { "type": "contact" } }
    ],
    "options": [
        { "id": "opt-a", "stepId": "kind", "label": "Window" },
        { "id": "opt-b", "stepId": "kind", "label": "Door" },
        { "id": "opt-c", "stepId": "style", "label": "Modern", "jumpToStep": 6 },
        { "id": "opt-d", "stepId": "style", "label": "Classic" }
    ],
    "stepLogic": [
        {
            "stepId": "kind",
            "rules": [
                {
                    "id": "r1",
                    "order": 0,
                    "conditions": [{ "field_type": "option", "optionId": "opt-a" }],
                    "action": { "targetStepId": "photos" }
                }
            ],
            "defaultAction": { "targetStepId": "size" }
        }
    ]
}"#;
