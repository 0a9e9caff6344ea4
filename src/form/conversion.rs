use super::definition::FormDefinition;
use crate::error::FormConversionError;

/// A trait for custom store formats that can be converted into a `FormDefinition`.
///
/// This is the extension point that keeps the engine independent of how forms
/// are persisted. Implement it on the structs your store returns and the rest of
/// the engine only ever sees the canonical model.
///
/// # Example
///
/// ```rust
/// use keiro::error::FormConversionError;
/// use keiro::form::{FormDefinition, IntoForm, StepDefinition};
/// use keiro::graph::{StepId, StepKind};
///
/// struct Question { key: String, position: u32 }
/// struct Survey { questions: Vec<Question> }
///
/// impl IntoForm for Survey {
///     fn into_form(self) -> Result<FormDefinition, FormConversionError> {
///         let steps = self
///             .questions
///             .into_iter()
///             .map(|q| StepDefinition {
///                 id: StepId::new(q.key),
///                 order: q.position,
///                 title: String::new(),
///                 required: false,
///                 kind: StepKind::Text,
///             })
///             .collect();
///         Ok(FormDefinition { steps, ..Default::default() })
///     }
/// }
///
/// let form = Survey { questions: vec![Question { key: "name".into(), position: 1 }] }
///     .into_form()
///     .unwrap();
/// assert_eq!(form.steps.len(), 1);
/// ```
pub trait IntoForm {
    /// Consumes the object and converts it into the engine's canonical form model.
    fn into_form(self) -> Result<FormDefinition, FormConversionError>;
}

impl IntoForm for FormDefinition {
    fn into_form(self) -> Result<FormDefinition, FormConversionError> {
        Ok(self)
    }
}
