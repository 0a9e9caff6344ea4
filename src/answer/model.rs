use crate::graph::{OptionId, StepId};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A reference to a file the (external) upload layer already stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl FileReference {
    /// An all-empty reference counts as no file.
    pub fn is_present(&self) -> bool {
        !self.url.is_empty() || !self.name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionAnswer {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub depth: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactAnswer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// One repetition of a frame group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameAnswer {
    #[serde(default)]
    pub image: Option<FileReference>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub measurement: Option<String>,
}

/// A respondent's answer to one step.
///
/// Several step kinds share slots here. Which slots are meaningful depends on
/// the kind of the step being answered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, alias = "selectedOptionId")]
    pub selected_option_id: Option<OptionId>,
    #[serde(default, alias = "selectedOptionIds")]
    pub selected_option_ids: Vec<OptionId>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub file: Option<FileReference>,
    #[serde(default)]
    pub dimensions: Option<DimensionAnswer>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub contact: Option<ContactAnswer>,
    #[serde(default)]
    pub frames: Vec<FrameAnswer>,
}

impl Answer {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn option(id: impl Into<OptionId>) -> Self {
        Self {
            selected_option_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn options<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OptionId>,
    {
        Self {
            selected_option_ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn file(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file: Some(FileReference {
                name: name.into(),
                url: url.into(),
            }),
            ..Self::default()
        }
    }

    pub fn dimensions(width: Option<f64>, height: Option<f64>, depth: Option<f64>) -> Self {
        Self {
            dimensions: Some(DimensionAnswer {
                width,
                height,
                depth,
            }),
            ..Self::default()
        }
    }

    pub fn rating(value: i32) -> Self {
        Self {
            rating: Some(value),
            ..Self::default()
        }
    }

    pub fn contact(name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            contact: Some(ContactAnswer {
                name: name.map(str::to_string),
                email: email.map(str::to_string),
                phone: None,
            }),
            ..Self::default()
        }
    }

    pub fn frames(frames: Vec<FrameAnswer>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    /// Whether any option is selected, single or multiple.
    pub fn has_selection(&self) -> bool {
        self.selected_option_id.is_some() || !self.selected_option_ids.is_empty()
    }
}

/// The accumulated answers of one session, keyed by step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnswerSet {
    answers: AHashMap<StepId, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the answer of a step, replacing any earlier answer.
    pub fn insert(&mut self, step_id: StepId, answer: Answer) -> Option<Answer> {
        self.answers.insert(step_id, answer)
    }

    pub fn get(&self, step_id: &StepId) -> Option<&Answer> {
        self.answers.get(step_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StepId, &Answer)> {
        self.answers.iter()
    }
}
