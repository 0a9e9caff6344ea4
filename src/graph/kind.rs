use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a dimensions step asks for a depth in addition to width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dimensionality {
    #[default]
    #[serde(rename = "2d", alias = "two_d")]
    TwoD,
    #[serde(rename = "3d", alias = "three_d")]
    ThreeD,
}

/// Which fields each repetition of a frame group must carry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameConfig {
    #[serde(default, alias = "requireImage")]
    pub require_image: bool,
    #[serde(default, alias = "requireLocation")]
    pub require_location: bool,
    #[serde(default, alias = "requireMeasurement")]
    pub require_measurement: bool,
    /// Upper bound on repetitions. `None` means unbounded.
    #[serde(default, alias = "maxFrames")]
    pub max_frames: Option<usize>,
}

/// The closed set of question kinds, with kind-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    /// Single choice rendered as visual option cards.
    CardSelection,
    MultipleChoice,
    Text,
    FileUpload {
        #[serde(default, alias = "allowedTypes")]
        allowed_types: Vec<String>,
    },
    Dimensions {
        #[serde(default)]
        dimensionality: Dimensionality,
        #[serde(default)]
        unit: Option<String>,
    },
    Rating {
        #[serde(default = "default_rating_min")]
        min: i32,
        #[serde(default = "default_rating_max")]
        max: i32,
    },
    /// Repeatable group ("add another / continue").
    Frames(FrameConfig),
    Contact,
}

fn default_rating_min() -> i32 {
    1
}

fn default_rating_max() -> i32 {
    5
}

/// Fieldless mirror of `StepKind`, carried by transition events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKindTag {
    CardSelection,
    MultipleChoice,
    Text,
    FileUpload,
    Dimensions,
    Rating,
    Frames,
    Contact,
}

impl StepKind {
    pub fn tag(&self) -> StepKindTag {
        match self {
            StepKind::CardSelection => StepKindTag::CardSelection,
            StepKind::MultipleChoice => StepKindTag::MultipleChoice,
            StepKind::Text => StepKindTag::Text,
            StepKind::FileUpload { .. } => StepKindTag::FileUpload,
            StepKind::Dimensions { .. } => StepKindTag::Dimensions,
            StepKind::Rating { .. } => StepKindTag::Rating,
            StepKind::Frames(_) => StepKindTag::Frames,
            StepKind::Contact => StepKindTag::Contact,
        }
    }

    pub fn is_visual_card(&self) -> bool {
        self.tag().is_visual_card()
    }

    /// Option-bearing kinds are the only ones whose answers select an option.
    pub fn has_options(&self) -> bool {
        matches!(self, StepKind::CardSelection | StepKind::MultipleChoice)
    }
}

impl StepKindTag {
    pub fn is_visual_card(&self) -> bool {
        matches!(self, StepKindTag::CardSelection)
    }
}

impl fmt::Display for StepKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKindTag::CardSelection => "card_selection",
            StepKindTag::MultipleChoice => "multiple_choice",
            StepKindTag::Text => "text",
            StepKindTag::FileUpload => "file_upload",
            StepKindTag::Dimensions => "dimensions",
            StepKindTag::Rating => "rating",
            StepKindTag::Frames => "frames",
            StepKindTag::Contact => "contact",
        };
        f.write_str(name)
    }
}
