use crate::answer::AnswerSet;
use crate::error::SubmissionError;

/// The terminal side effect: persisting the response, firing webhooks, sending mail.
///
/// Invoked exactly once per session, when the respondent advances past the
/// last step. Its result is reported but never reopens the session.
pub trait SubmissionHandler {
    fn submit(&mut self, answers: &AnswerSet) -> Result<(), SubmissionError>;
}

impl<F> SubmissionHandler for F
where
    F: FnMut(&AnswerSet) -> Result<(), SubmissionError>,
{
    fn submit(&mut self, answers: &AnswerSet) -> Result<(), SubmissionError> {
        self(answers)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSubmission;

impl SubmissionHandler for NoopSubmission {
    fn submit(&mut self, _answers: &AnswerSet) -> Result<(), SubmissionError> {
        Ok(())
    }
}
